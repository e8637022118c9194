use serde::{Deserialize, Serialize};

/// Ordered channel groups; order is preserved into the rendered report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub groups: Vec<CatalogGroup>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogGroup {
    pub name: String,
    pub channels: Vec<CatalogEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub display_name: String,
    pub external_id: String,
    #[serde(default)]
    pub highlighted: bool,
}

impl Catalog {
    pub fn channel_count(&self) -> usize {
        self.groups.iter().map(|g| g.channels.len()).sum()
    }

    pub fn highlighted_count(&self) -> usize {
        self.groups.iter().flat_map(|g| &g.channels).filter(|c| c.highlighted).count()
    }
}

// List envelope types
#[derive(Serialize)]
pub struct CatalogList<'a> {
    pub groups: usize,
    pub channels: usize,
    pub highlighted: usize,
    pub catalog: &'a Catalog,
}
