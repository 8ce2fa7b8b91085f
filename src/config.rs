//! Runtime settings read from the environment (and `.env`).

use std::time::Duration;

/// How the product page is driven.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    /// Wait limit for page elements to appear
    pub element_timeout: Duration,
    /// Pause after each scroll so lazy content can load
    pub scroll_pause: Duration,
    /// Upper bound on scroll rounds
    pub max_scrolls: u32,
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            element_timeout: Duration::from_secs(10),
            scroll_pause: Duration::from_millis(2000),
            max_scrolls: 25,
            headless: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub browser: BrowserConfig,
    pub image_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            image_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let parsed = |key: &str| -> Option<u64> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(key, value = %raw, "ignoring unparseable setting");
                    None
                }
            }
        };

        let headless = match lookup("REVIEW_HEADLESS").map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "false" || v == "0" || v == "no" => false,
            _ => defaults.browser.headless,
        };

        Self {
            browser: BrowserConfig {
                element_timeout: parsed("REVIEW_ELEMENT_TIMEOUT_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.browser.element_timeout),
                scroll_pause: parsed("REVIEW_SCROLL_PAUSE_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.browser.scroll_pause),
                max_scrolls: parsed("REVIEW_MAX_SCROLLS")
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(defaults.browser.max_scrolls),
                headless,
            },
            image_timeout: parsed("REVIEW_IMAGE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.image_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("REVIEW_ELEMENT_TIMEOUT_SECS", "3"),
            ("REVIEW_SCROLL_PAUSE_MS", "250"),
            ("REVIEW_MAX_SCROLLS", "4"),
            ("REVIEW_HEADLESS", "false"),
            ("REVIEW_IMAGE_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.browser.element_timeout, Duration::from_secs(3));
        assert_eq!(config.browser.scroll_pause, Duration::from_millis(250));
        assert_eq!(config.browser.max_scrolls, 4);
        assert!(!config.browser.headless);
        assert_eq!(config.image_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("REVIEW_MAX_SCROLLS", "lots"),
            ("REVIEW_HEADLESS", "maybe"),
        ]));
        assert_eq!(config.browser.max_scrolls, 25);
        assert!(config.browser.headless);
    }
}
