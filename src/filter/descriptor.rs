//! Request descriptor handed to the filter by the proxy host.
//!
//! # Design Decisions
//! - Owned by the host, borrowed by the filter for a single call
//! - Header names are kept exactly as provided (lookup is case-sensitive)
//! - Deserialization is lenient: a malformed field degrades to "absent"
//!   instead of rejecting the whole descriptor

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Header carrying the fetch destination hint.
pub const SEC_FETCH_DEST: &str = "Sec-Fetch-Dest";

/// One intercepted request as seen by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Destination hostname, possibly with a port.
    #[serde(default, alias = "Host", deserialize_with = "lenient_host")]
    pub host: String,

    /// Header name to first value.
    #[serde(default, alias = "Header", deserialize_with = "lenient_headers")]
    pub headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    /// Create a descriptor with no headers.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Builder-style header insertion.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Exact-name header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Value of `Sec-Fetch-Dest`, if the host supplied one.
    pub fn fetch_dest(&self) -> Option<&str> {
        self.header(SEC_FETCH_DEST)
    }
}

fn lenient_host<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(host) => host,
        _ => String::new(),
    })
}

fn lenient_headers<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };

    let headers = map
        .into_iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::String(v) => v,
                // Multi-valued headers arrive as lists; the first value wins.
                Value::Array(values) => match values.into_iter().next() {
                    Some(Value::String(v)) => v,
                    _ => return None,
                },
                _ => return None,
            };
            Some((name, value))
        })
        .collect();

    Ok(headers)
}
