use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "campfeed.v1";

#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

/// One structured stdout record per command invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    fn new(op: &'static str, apply: bool, body: Value, meta: Option<Meta>) -> Self {
        let (plan, result) = if apply { (None, Some(body)) } else { (Some(body), None) };
        Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            apply,
            plan,
            result,
            meta,
        }
    }

    pub fn plan<T: Serialize>(op: &'static str, plan: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        Ok(Self::new(op, false, serde_json::to_value(plan)?, meta))
    }

    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        Ok(Self::new(op, true, serde_json::to_value(result)?, meta))
    }
}
