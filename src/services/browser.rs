//! Desktop browser plausibility check, independent of the signature table

const PLATFORM_MARKERS: [&str; 3] = ["windows", "linux", "mac"];
const ENGINE_MARKERS: [&str; 4] = ["chrome/", "firefox/", "safari/", "edg/"];

/// True when the user-agent carries the `mozilla` token, a desktop platform
/// marker and a browser engine marker (all compared case-insensitively).
pub fn looks_like_real_browser(ua: &str) -> bool {
    if ua.is_empty() {
        return false;
    }
    let ua = ua.to_lowercase();

    ua.contains("mozilla")
        && PLATFORM_MARKERS.iter().any(|m| ua.contains(m))
        && ENGINE_MARKERS.iter().any(|m| ua.contains(m))
}
