//! User-agent signature matching
//!
//! An ordered table of (lowercase keyword, label) pairs. The first entry
//! whose keyword occurs in the lower-cased user-agent wins, so table order
//! is the tie-break when several keywords match.

use crate::domain::AgentIdentification;

/// Built-in automation signatures, in match priority order
pub const DEFAULT_SIGNATURES: &[(&str, &str)] = &[
    // Social media preview bots
    ("discordbot", "Discord Bot"),
    ("facebookexternalhit", "Facebook Preview Bot"),
    ("instagram", "Instagram Preview Bot"),
    ("twitterbot", "Twitter Bot"),
    ("linkedinbot", "LinkedIn Bot"),
    ("telegrambot", "Telegram Bot"),
    ("whatsapp", "WhatsApp Link Preview"),
    ("skypeuripreview", "Skype Preview Bot"),
    // Search crawlers
    ("googlebot", "Google Crawler"),
    ("bingbot", "Bing Crawler"),
    ("yandex", "Yandex Bot"),
    ("duckduckbot", "DuckDuckGo Bot"),
    // Scripted HTTP clients
    ("python-requests", "Python Script"),
    ("axios", "Axios Script"),
    ("curl", "cURL Script"),
    ("wget", "Wget Script"),
    ("postmanruntime", "Postman"),
    ("node-fetch", "Node Fetch Script"),
    ("okhttp", "OkHttp Client"),
    ("go-http-client", "Go HTTP Client"),
    // Headless and automation browsers
    ("headless", "Headless Browser"),
    ("puppeteer", "Puppeteer Script"),
    ("playwright", "Playwright Script"),
    ("scrapy", "Scrapy Crawler"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Signature {
    keyword: String,
    label: String,
}

/// Immutable signature table, built once at startup
#[derive(Debug, Clone)]
pub struct SignatureTable {
    entries: Vec<Signature>,
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<(String, String)>())
    }
}

impl SignatureTable {
    /// Built-in entries followed by `extra` entries.
    ///
    /// Extra keywords are lower-cased; empty keywords are dropped since they
    /// would match every user-agent.
    pub fn with_extra<I, K, L>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: AsRef<str>,
        L: Into<String>,
    {
        let mut entries: Vec<Signature> = DEFAULT_SIGNATURES
            .iter()
            .map(|(keyword, label)| Signature {
                keyword: (*keyword).to_string(),
                label: (*label).to_string(),
            })
            .collect();

        for (keyword, label) in extra {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }
            entries.push(Signature { keyword, label: label.into() });
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identify an automated agent from a raw user-agent string
    pub fn identify(&self, ua: &str) -> AgentIdentification<'_> {
        if ua.is_empty() {
            return AgentIdentification::None;
        }
        let ua = ua.to_lowercase();

        self.entries
            .iter()
            .find(|sig| ua.contains(sig.keyword.as_str()))
            .map_or(AgentIdentification::None, |sig| AgentIdentification::Identified(&sig.label))
    }
}

/// Identify against the built-in table only
pub fn identify(ua: &str) -> AgentIdentification<'static> {
    if ua.is_empty() {
        return AgentIdentification::None;
    }
    let ua = ua.to_lowercase();

    DEFAULT_SIGNATURES
        .iter()
        .find(|&&(keyword, _)| ua.contains(keyword))
        .map_or(AgentIdentification::None, |&(_, label)| AgentIdentification::Identified(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ua_is_not_a_bot() {
        assert_eq!(identify(""), AgentIdentification::None);
        assert_eq!(SignatureTable::default().identify(""), AgentIdentification::None);
    }

    #[test]
    fn test_googlebot() {
        assert_eq!(
            identify("Mozilla/5.0 (compatible; Googlebot/2.1)"),
            AgentIdentification::Identified("Google Crawler")
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(identify("CURL/7.68.0"), AgentIdentification::Identified("cURL Script"));
        assert_eq!(
            identify("Mozilla/5.0 HeadlessChrome/120.0"),
            AgentIdentification::Identified("Headless Browser")
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Both "python-requests" and "curl" occur; python-requests is listed first
        assert_eq!(
            identify("python-requests/2.31 via curl"),
            AgentIdentification::Identified("Python Script")
        );
        // "headless" precedes "puppeteer"
        assert_eq!(
            identify("Puppeteer HeadlessChrome"),
            AgentIdentification::Identified("Headless Browser")
        );
    }

    #[test]
    fn test_regular_browser_not_identified() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
        assert!(identify(ua).is_none());
    }

    #[test]
    fn test_every_category_covered() {
        for ua in [
            "Discordbot/2.0",
            "facebookexternalhit/1.1",
            "Twitterbot/1.0",
            "LinkedInBot/1.0",
            "TelegramBot (like TwitterBot)",
            "WhatsApp/2.23",
            "Mozilla/5.0 (compatible; bingbot/2.0)",
            "Mozilla/5.0 (compatible; YandexBot/3.0)",
            "DuckDuckBot/1.1",
            "axios/1.6.0",
            "Wget/1.21",
            "PostmanRuntime/7.36",
            "node-fetch/1.0",
            "okhttp/4.12.0",
            "Go-http-client/1.1",
            "Playwright/1.40",
            "Scrapy/2.11",
        ] {
            assert!(!identify(ua).is_none(), "expected a match for {ua}");
        }
    }

    #[test]
    fn test_extra_signatures_appended_after_defaults() {
        let table = SignatureTable::with_extra([
            ("  MyMonitor ", "Uptime Monitor"),
            ("", "Ignored"),
            ("curl", "Shadowed"),
        ]);
        assert_eq!(table.len(), DEFAULT_SIGNATURES.len() + 2);
        assert_eq!(
            table.identify("mymonitor/1.0"),
            AgentIdentification::Identified("Uptime Monitor")
        );
        // Built-in entry still wins ties
        assert_eq!(table.identify("curl/8.0"), AgentIdentification::Identified("cURL Script"));
    }

    #[test]
    fn test_table_matches_free_function() {
        let table = SignatureTable::default();
        for ua in ["", "curl/8.0", "Mozilla/5.0 Firefox/121.0", "Googlebot"] {
            assert_eq!(table.identify(ua), identify(ua));
        }
    }

    #[test]
    fn test_idempotent() {
        let ua = "Mozilla/5.0 (compatible; Googlebot/2.1)";
        assert_eq!(identify(ua), identify(ua));
    }
}
