use std::time::Duration;

use serde::Serialize;

/// Reachability verdict for a single probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Down,
}

/// Which of the three race arms settled the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Code {
    Connect,
    Timeout,
    Error,
}

/// The outcome of one probe, serialized verbatim to the caller as
/// `{"status":...,"code":...,"message":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub status: Status,
    pub code: Code,
    pub message: String,
}

impl ProbeResult {
    pub fn connected() -> Self {
        ProbeResult {
            status: Status::Up,
            code: Code::Connect,
            message: "connection established".to_string(),
        }
    }

    pub fn timed_out(deadline: Duration) -> Self {
        ProbeResult {
            status: Status::Down,
            code: Code::Timeout,
            message: format!("no response after {} ms", deadline.as_millis()),
        }
    }

    pub fn failed(err: &std::io::Error) -> Self {
        ProbeResult {
            status: Status::Down,
            code: Code::Error,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_for_connect() {
        let json = serde_json::to_string(&ProbeResult::connected()).expect("serializable");
        assert_eq!(
            json,
            r#"{"status":"up","code":"CONNECT","message":"connection established"}"#
        );
    }

    #[test]
    fn test_wire_shape_for_timeout() {
        let json = serde_json::to_string(&ProbeResult::timed_out(Duration::from_millis(2000)))
            .expect("serializable");
        assert_eq!(
            json,
            r#"{"status":"down","code":"TIMEOUT","message":"no response after 2000 ms"}"#
        );
    }

    #[test]
    fn test_error_carries_underlying_text() {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let result = ProbeResult::failed(&err);
        assert_eq!(result.status, Status::Down);
        assert_eq!(result.code, Code::Error);
        assert_eq!(result.message, "Connection refused");
    }
}
