use serde::{Deserialize, Serialize};

/// One point in a precipitation batch.
///
/// `time` is unix seconds; when absent, the instant the batch is encoded is
/// used instead. The library performs no range validation on coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub time: Option<i64>,
}

impl PrecipitationQuery {
    /// A query for the current time.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, time: None }
    }

    /// A query pinned to an explicit unix timestamp.
    pub fn at(latitude: f64, longitude: f64, time: i64) -> Self {
        Self { latitude, longitude, time: Some(time) }
    }
}
