use serde::{Deserialize, Serialize};

use crate::domain::SensorId;

pub const CHAT_PATH: &str = "/api/chat";
pub const SENSORS_PATH: &str = "/api/sensors";
pub const SENSOR_QUERY_PATH: &str = "/api/sensor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Query string for `GET /api/sensor`. The backend ignores `start`/`end`
/// whenever `window` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorQuery {
    pub sensor_id: SensorId,
    pub window: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl SensorQuery {
    pub fn new(sensor_id: SensorId, window: impl Into<String>) -> Self {
        Self {
            sensor_id,
            window: window.into(),
            start: None,
            end: None,
        }
    }

    pub fn with_range(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start = start.filter(|value| !value.trim().is_empty());
        self.end = end.filter(|value| !value.trim().is_empty());
        self
    }

    /// Ordered `(key, value)` pairs, ready for a query serializer.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("sensor_id", self.sensor_id.as_str()),
            ("window", self.window.as_str()),
        ];
        if let Some(start) = &self.start {
            pairs.push(("start", start.as_str()));
        }
        if let Some(end) = &self.end {
            pairs.push(("end", end.as_str()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_unset_range() {
        let query = SensorQuery::new(SensorId::from("s1"), "1h")
            .with_range(Some(" ".to_string()), Some("2024-01-02T00:00:00Z".to_string()));

        assert_eq!(
            query.query_pairs(),
            vec![
                ("sensor_id", "s1"),
                ("window", "1h"),
                ("end", "2024-01-02T00:00:00Z"),
            ]
        );
    }
}
