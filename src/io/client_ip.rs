//! Client IP extraction from request headers or the transport peer

use hyper::HeaderMap;
use std::net::SocketAddr;

/// Best available client IP as text.
///
/// With `trust_forwarded_for`, the first non-empty entry of X-Forwarded-For
/// wins; otherwise the peer address is used. The result is left
/// unvalidated; the IP filter decides whether it is usable.
pub fn extract_client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    if trust_forwarded_for {
        if let Some(ip) = forwarded_for(headers) {
            return ip;
        }
    }
    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    if first.is_empty() {
        return None;
    }
    Some(first.to_string())
}

/// User-agent header value, empty when absent or not valid text
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(hyper::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{HeaderValue, USER_AGENT};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    fn peer(addr: &str) -> Option<SocketAddr> {
        Some(addr.parse().unwrap())
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let h = headers(&[("x-forwarded-for", " 203.0.113.5 , 10.0.0.1")]);
        assert_eq!(extract_client_ip(&h, peer("10.0.0.9:5000"), true), "203.0.113.5");
    }

    #[test]
    fn test_forwarded_for_ignored_when_untrusted() {
        let h = headers(&[("x-forwarded-for", "203.0.113.5")]);
        assert_eq!(extract_client_ip(&h, peer("198.51.100.7:5000"), false), "198.51.100.7");
    }

    #[test]
    fn test_falls_back_to_peer() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), peer("198.51.100.7:5000"), true), "198.51.100.7");
        let h = headers(&[("x-forwarded-for", " , 1.2.3.4")]);
        assert_eq!(extract_client_ip(&h, peer("198.51.100.7:5000"), true), "198.51.100.7");
    }

    #[test]
    fn test_mapped_peer_keeps_prefix_for_filter() {
        assert_eq!(
            extract_client_ip(&HeaderMap::new(), peer("[::ffff:10.0.0.1]:5000"), true),
            "::ffff:10.0.0.1"
        );
    }

    #[test]
    fn test_no_source_is_empty() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), None, true), "");
    }

    #[test]
    fn test_user_agent() {
        let mut h = HeaderMap::new();
        assert_eq!(user_agent(&h), "");
        h.insert(USER_AGENT, HeaderValue::from_static("curl/8.0"));
        assert_eq!(user_agent(&h), "curl/8.0");
    }
}
