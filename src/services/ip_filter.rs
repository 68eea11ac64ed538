//! Public/private IP classification
//!
//! Prefix heuristic over the textual address, not CIDR parsing. Covers
//! loopback and the IPv4 RFC1918 ranges; IPv6 unique-local (fc00::/7) and
//! link-local (fe80::/10) addresses are classified as public.

const MAPPED_V4_PREFIX: &str = "::ffff:";

const LOOPBACK: [&str; 2] = ["127.0.0.1", "::1"];
const PRIVATE_PREFIXES: [&str; 2] = ["10.", "192.168."];

/// Second-octet bounds of 172.16.0.0/12
const RFC1918_172_RANGE: std::ops::RangeInclusive<u32> = 16..=31;

/// Remove an IPv4-mapped IPv6 prefix, if present
pub fn strip_mapped_prefix(ip: &str) -> &str {
    ip.strip_prefix(MAPPED_V4_PREFIX).unwrap_or(ip)
}

/// True unless the address is empty, loopback or in a private range
pub fn is_public_ip(ip: &str) -> bool {
    let ip = strip_mapped_prefix(ip);
    if ip.is_empty() {
        return false;
    }

    let private = LOOPBACK.contains(&ip)
        || PRIVATE_PREFIXES.iter().any(|p| ip.starts_with(p))
        || in_172_private_block(ip);

    !private
}

/// 172.16.0.0 - 172.31.255.255; unparsable second octet never matches
fn in_172_private_block(ip: &str) -> bool {
    if !ip.starts_with("172.") {
        return false;
    }
    ip.split('.')
        .nth(1)
        .and_then(|octet| octet.parse::<u32>().ok())
        .is_some_and(|octet| RFC1918_172_RANGE.contains(&octet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_public() {
        assert!(!is_public_ip(""));
        assert!(!is_public_ip("::ffff:"));
    }

    #[test]
    fn test_loopback() {
        assert!(!is_public_ip("127.0.0.1"));
        assert!(!is_public_ip("::1"));
        assert!(!is_public_ip("::ffff:127.0.0.1"));
    }

    #[test]
    fn test_rfc1918_ranges() {
        assert!(!is_public_ip("10.0.0.5"));
        assert!(!is_public_ip("192.168.1.1"));
        assert!(!is_public_ip("172.16.0.1"));
        assert!(!is_public_ip("172.20.5.5"));
        assert!(!is_public_ip("172.31.255.255"));
    }

    #[test]
    fn test_172_outside_private_block() {
        assert!(is_public_ip("172.15.0.1"));
        assert!(is_public_ip("172.32.0.1"));
        assert!(is_public_ip("172.40.5.5"));
    }

    #[test]
    fn test_public_addresses() {
        assert!(is_public_ip("8.8.8.8"));
        assert!(is_public_ip("203.0.113.5"));
        assert!(is_public_ip("2001:db8::1"));
    }

    #[test]
    fn test_mapped_prefix_stripped() {
        assert!(!is_public_ip("::ffff:10.0.0.1"));
        assert!(is_public_ip("::ffff:8.8.8.8"));
        assert_eq!(strip_mapped_prefix("::ffff:1.2.3.4"), "1.2.3.4");
        assert_eq!(strip_mapped_prefix("1.2.3.4"), "1.2.3.4");
    }

    #[test]
    fn test_malformed_172_falls_through() {
        assert!(is_public_ip("172."));
        assert!(is_public_ip("172.abc.1.1"));
        assert!(is_public_ip("172..1.1"));
    }

    #[test]
    fn test_ipv6_private_ranges_not_covered() {
        // Known limitation: only IPv4 private ranges and loopback are recognised
        assert!(is_public_ip("fc00::1"));
        assert!(is_public_ip("fe80::1"));
    }
}
