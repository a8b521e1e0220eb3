//! Document and timestamp types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker key for the server-timestamp sentinel.
pub(crate) const SERVER_TIMESTAMP_KEY: &str = "__server_timestamp__";

/// Field value that the store replaces with its own clock at write time.
///
/// Submitting clients use this instead of their local clock, so creation
/// times are always assigned by the store.
pub fn server_timestamp() -> Value {
    let mut map = Map::new();
    map.insert(SERVER_TIMESTAMP_KEY.to_string(), Value::Bool(true));
    Value::Object(map)
}

/// Store-native timestamp: whole seconds since the Unix epoch plus a
/// nanosecond remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl StoreTimestamp {
    /// Capture the store clock.
    pub fn now() -> Self {
        Utc::now().into()
    }

    /// Convert to a chrono datetime, if in range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }
}

impl From<DateTime<Utc>> for StoreTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanoseconds: dt.timestamp_subsec_nanos(),
        }
    }
}

/// One stored document: an opaque store-assigned identifier plus
/// schemaless fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by the store at creation, never reassigned.
    pub id: String,

    /// Document fields. The store does not validate their shape.
    pub fields: Map<String, Value>,
}

impl Document {
    /// Get a field value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
