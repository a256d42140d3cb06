use url::form_urlencoded;

/// Port used whenever the caller supplies none, or one that does not parse
/// into [1, 65535].
pub const DEFAULT_TARGET_PORT: u16 = 80;

/// A sanitized probe target, built fresh for each incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub host: String,
    pub port: u16,
}

impl ProbeRequest {
    /// Build a request from raw (already percent-decoded) parameters.
    ///
    /// Literal carets are stripped from the host; some legacy dashboards
    /// smuggle them into hostnames and they can never be valid there.
    /// A missing or invalid port silently falls back to
    /// [`DEFAULT_TARGET_PORT`] rather than failing the request.
    pub fn new(host: &str, port: Option<&str>) -> Self {
        ProbeRequest {
            host: host.replace('^', ""),
            port: normalize_port(port),
        }
    }

    /// Parse `host` and `port` out of an HTTP query string such as
    /// `host=10.0.0.4&port=8080`. Percent-decoding happens here; absent
    /// parameters behave like empty/invalid ones.
    pub fn from_query(query: &str) -> Self {
        let mut host = String::new();
        let mut port = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "host" => host = value.into_owned(),
                "port" => port = Some(value.into_owned()),
                _ => {}
            }
        }

        ProbeRequest::new(&host, port.as_deref())
    }
}

fn normalize_port(raw: Option<&str>) -> u16 {
    // Parse as u32 so out-of-range values like 99999 are seen (and
    // rejected) instead of failing the narrower u16 parse for a
    // different reason.
    match raw.and_then(|s| s.trim().parse::<u32>().ok()) {
        Some(port) if (1..=65535).contains(&port) => port as u16,
        _ => DEFAULT_TARGET_PORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults() {
        // absent, non-numeric, zero, negative, out of range: all become 80
        assert_eq!(ProbeRequest::new("h", None).port, 80);
        assert_eq!(ProbeRequest::new("h", Some("")).port, 80);
        assert_eq!(ProbeRequest::new("h", Some("abc")).port, 80);
        assert_eq!(ProbeRequest::new("h", Some("0")).port, 80);
        assert_eq!(ProbeRequest::new("h", Some("-22")).port, 80);
        assert_eq!(ProbeRequest::new("h", Some("65536")).port, 80);
        assert_eq!(ProbeRequest::new("h", Some("99999")).port, 80);
    }

    #[test]
    fn test_valid_ports_pass_through() {
        assert_eq!(ProbeRequest::new("h", Some("1")).port, 1);
        assert_eq!(ProbeRequest::new("h", Some("8080")).port, 8080);
        assert_eq!(ProbeRequest::new("h", Some("65535")).port, 65535);
    }

    #[test]
    fn test_caret_stripped_from_host() {
        assert_eq!(ProbeRequest::new("my^host^", Some("80")).host, "myhost");
    }

    #[test]
    fn test_query_parsing_decodes_and_sanitizes() {
        let request = ProbeRequest::from_query("host=my%2Dserver%2Elan&port=8443");
        assert_eq!(request.host, "my-server.lan");
        assert_eq!(request.port, 8443);

        // encoded caret is decoded first, then stripped
        let request = ProbeRequest::from_query("host=bad%5Ehost&port=nope");
        assert_eq!(request.host, "badhost");
        assert_eq!(request.port, 80);
    }

    #[test]
    fn test_missing_host_is_empty_string() {
        let request = ProbeRequest::from_query("port=443");
        assert_eq!(request.host, "");
        assert_eq!(request.port, 443);

        let request = ProbeRequest::from_query("");
        assert_eq!(request.host, "");
        assert_eq!(request.port, 80);
    }
}
