/// Episode, character and location identifiers as issued by the API.
pub type EntityId = i64;

/// All parsed timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
