//! Short OS/browser summary of a user-agent for log lines

pub const UNKNOWN_UA: &str = "Unknown UA";
pub const UNKNOWN_OS: &str = "Unknown OS";
pub const UNKNOWN_BROWSER: &str = "Unknown Browser";

/// `"OS: {os} | Browser: {browser}"`, or `"Unknown UA"` when nothing can be
/// extracted. Never fails.
pub fn format_ua(ua: &str) -> String {
    try_format_ua(ua).unwrap_or_else(|| UNKNOWN_UA.to_string())
}

fn try_format_ua(ua: &str) -> Option<String> {
    if ua.is_empty() {
        return None;
    }
    let os = os_summary(ua).unwrap_or(UNKNOWN_OS);
    let browser = browser_summary(ua).unwrap_or_else(|| UNKNOWN_BROWSER.to_string());
    Some(format!("OS: {} | Browser: {}", os, browser))
}

/// First segment of the first parenthesized group
fn os_summary(ua: &str) -> Option<&str> {
    let (_, after_open) = ua.split_once('(')?;
    let (group, _) = after_open.split_once(')')?;
    group.split(';').next()
}

/// Browser name plus version, checked in fixed priority order
fn browser_summary(ua: &str) -> Option<String> {
    if ua.contains("Chrome/") {
        return Some(with_version("Chrome", ua, "Chrome/"));
    }
    if ua.contains("Firefox/") {
        return Some(with_version("Firefox", ua, "Firefox/"));
    }
    if ua.contains("Safari/") && !ua.contains("Chrome") {
        return Some("Safari".to_string());
    }
    if ua.contains("Edg/") {
        return Some(with_version("Edge", ua, "Edg/"));
    }
    None
}

fn with_version(name: &str, ua: &str, marker: &str) -> String {
    match version_after(ua, marker) {
        Some(version) => format!("{} {}", name, version),
        None => name.to_string(),
    }
}

/// Token following `marker`, up to the next whitespace or end of string
fn version_after<'a>(ua: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = ua.split_once(marker)?;
    let token = rest.split(char::is_whitespace).next()?;
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_unknown_ua() {
        assert_eq!(format_ua(""), "Unknown UA");
    }

    #[test]
    fn test_chrome_on_windows() {
        assert_eq!(
            format_ua("Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0.0 Safari/537.36"),
            "OS: Windows NT 10.0 | Browser: Chrome 120.0.0.0"
        );
    }

    #[test]
    fn test_firefox() {
        assert_eq!(
            format_ua("Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0"),
            "OS: X11 | Browser: Firefox 121.0"
        );
    }

    #[test]
    fn test_safari_without_chrome() {
        assert_eq!(
            format_ua(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/17.2 Safari/605.1.15"
            ),
            "OS: Macintosh | Browser: Safari"
        );
    }

    #[test]
    fn test_edge_reported_as_chrome_when_chrome_token_present() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
        assert_eq!(format_ua(ua), "OS: Windows NT 10.0 | Browser: Chrome 120.0.0.0");
    }

    #[test]
    fn test_edge_without_chrome_token() {
        assert_eq!(
            format_ua("Mozilla/5.0 (Windows NT 10.0) Edg/120.0.2210.91"),
            "OS: Windows NT 10.0 | Browser: Edge 120.0.2210.91"
        );
    }

    #[test]
    fn test_no_parenthesized_group() {
        assert_eq!(format_ua("curl/8.0"), "OS: Unknown OS | Browser: Unknown Browser");
    }

    #[test]
    fn test_unclosed_parenthesis() {
        assert_eq!(
            format_ua("Mozilla/5.0 (Windows NT 10.0 Chrome/120.0"),
            "OS: Unknown OS | Browser: Chrome 120.0"
        );
    }

    #[test]
    fn test_missing_version_token() {
        assert_eq!(format_ua("Mozilla/5.0 (Linux) Chrome/"), "OS: Linux | Browser: Chrome");
        assert_eq!(format_ua("Mozilla/5.0 (Linux) Firefox/ x"), "OS: Linux | Browser: Firefox");
    }

    #[test]
    fn test_empty_parenthesized_group() {
        assert_eq!(format_ua("Mozilla/5.0 () Firefox/1.0"), "OS:  | Browser: Firefox 1.0");
    }

    #[test]
    fn test_idempotent() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0.0 Safari/537.36";
        assert_eq!(format_ua(ua), format_ua(ua));
    }
}
