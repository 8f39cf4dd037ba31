//! User-facing text for action outcomes, shared by the desktop and terminal front-ends.

use std::fmt::Display;

pub const CHAT_ERROR_TAG: &str = "[chat error]";
pub const LIST_ERROR_TAG: &str = "[list error]";
pub const QUERY_ERROR_TAG: &str = "[query error]";

pub const LOADING_SENSORS: &str = "Loading sensors…";
pub const PICK_SENSOR_FIRST: &str = "Pick a sensor first.";

pub fn chat_failure(failure: impl Display) -> String {
    format!("{CHAT_ERROR_TAG} {failure}")
}

pub fn list_failure(failure: impl Display) -> String {
    format!("{LIST_ERROR_TAG} {failure}")
}

pub fn query_failure(failure: impl Display) -> String {
    format!("{QUERY_ERROR_TAG} {failure}")
}

pub fn sensors_loaded(count: usize) -> String {
    format!("Loaded {count} sensors.")
}

pub fn querying(sensor_id: &str, window: &str) -> String {
    format!("Querying {sensor_id} (window={window})…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestFailure;

    #[test]
    fn tags_failures_by_action() {
        let failure = RequestFailure::Status {
            status: 502,
            reason: "Bad Gateway".to_string(),
        };
        assert_eq!(chat_failure(&failure), "[chat error] 502 Bad Gateway");
        assert_eq!(list_failure(&failure), "[list error] 502 Bad Gateway");
        assert_eq!(query_failure(&failure), "[query error] 502 Bad Gateway");
    }

    #[test]
    fn progress_texts() {
        assert_eq!(sensors_loaded(1), "Loaded 1 sensors.");
        assert_eq!(querying("s1", "1h"), "Querying s1 (window=1h)…");
    }
}
