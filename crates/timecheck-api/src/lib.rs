//! Wire types shared between the timecheck frontend and backend.

#![deny(clippy::all)]
#![deny(missing_debug_implementations)]
#![deny(unsafe_code)]
#![deny(non_snake_case)]
#![deny(missing_docs)]

use serde::{Deserialize, Serialize};

/// The path of the time endpoint.
pub const API_PATH: &str = "/api";

/// The body returned by `GET /api`.
///
/// The `time` field is required, a body without it fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeResponse {
    /// The server time, already formatted for display.
    pub time: String,
}

impl TimeResponse {
    /// Creates a response carrying `time`.
    pub fn new<S>(time: S) -> Self
    where
        S: Into<String>,
    {
        Self { time: time.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let s = serde_json::to_string(&TimeResponse::new("12:00:00")).unwrap();
        assert_eq!(s, r#"{"time":"12:00:00"}"#);
    }

    #[test]
    fn test_missing_time_is_rejected() {
        assert!(serde_json::from_str::<TimeResponse>("{}").is_err());
        assert!(serde_json::from_str::<TimeResponse>(r#"{"time": 5}"#).is_err());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let m: TimeResponse = serde_json::from_str(r#"{"time": " x ", "zone": "UTC"}"#).unwrap();
        assert_eq!(m.time, " x ");
    }
}
