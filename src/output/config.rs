use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl OutputConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("CAMPFEED_OUTPUT_FORMAT").ok().as_deref(),
            env::var("CAMPFEED_OUTPUT_PRETTY").ok().as_deref(),
        )
    }

    fn from_values(format: Option<&str>, pretty: Option<&str>) -> Self {
        let format = match format {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        let pretty = match pretty {
            Some(v) if v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => true,
            _ => false,
        };
        OutputConfig { format, pretty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_compact_text() {
        let cfg = OutputConfig::from_values(None, None);
        assert_eq!(cfg, OutputConfig { format: OutputFormat::Text, pretty: false });
    }

    #[test]
    fn accepts_json_and_truthy_pretty() {
        let cfg = OutputConfig::from_values(Some("json"), Some("YES"));
        assert_eq!(cfg.format, OutputFormat::Json);
        assert!(cfg.pretty);
    }
}
