use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Window presets offered by the sensor panel. The backend parses `<n><s|m|h|d>`.
pub const WINDOW_PRESETS: &[&str] = &["15m", "1h", "6h", "24h", "7d"];
pub const DEFAULT_WINDOW: &str = "1h";

/// Backend ids come straight out of the metadata table, so they may arrive as
/// JSON numbers as well as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SensorId(pub String);

impl SensorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SensorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for SensorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub sensor_id: SensorId,
    #[serde(default)]
    pub name: Option<String>,
}

impl Sensor {
    pub fn new(sensor_id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            sensor_id: SensorId(sensor_id.into()),
            name: name.map(str::to_string),
        }
    }

    /// Display label for the selection control; blank names fall back to the id.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.sensor_id.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAuthor {
    Me,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub author: ChatAuthor,
}

impl ChatMessage {
    pub fn me(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: ChatAuthor::Me,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: ChatAuthor::Bot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_ids_accept_numbers_and_strings() {
        let sensors: Vec<Sensor> = serde_json::from_str(
            r#"[{"sensor_id":"s1","name":"Temp"},{"sensor_id":42,"name":null,"unit":"C"}]"#,
        )
        .expect("sensor list");

        assert_eq!(sensors[0].sensor_id, SensorId::from("s1"));
        assert_eq!(sensors[1].sensor_id, SensorId::from("42"));
        assert_eq!(sensors[1].name, None);
    }

    #[test]
    fn label_falls_back_to_id_when_name_missing_or_blank() {
        assert_eq!(Sensor::new("s1", Some("Temp")).label(), "Temp");
        assert_eq!(Sensor::new("s2", None).label(), "s2");
        assert_eq!(Sensor::new("s3", Some("")).label(), "s3");
    }
}
