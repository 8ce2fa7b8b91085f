//! Browser fingerprint hardening for product page visits.
//!
//! This module provides:
//! - User-agent rotation
//! - Chrome launch flags that hide automation
//! - An init script patched in before any page script runs

use headless_chrome::protocol::cdp::Page::AddScriptToEvaluateOnNewDocument;
use headless_chrome::Tab;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

use crate::error::{AnalyzerError, Result};

static USER_AGENTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/123.0.0.0 Safari/537.36",
    ]
});

const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Pick a user agent for this session.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_USER_AGENT)
}

/// Chrome command-line flags for one session.
pub fn chrome_args(user_agent: &str, headless: bool) -> Vec<String> {
    let mut args = vec![
        "--disable-blink-features=AutomationControlled".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-infobars".to_string(),
        "--window-position=0,0".to_string(),
        "--lang=en-US".to_string(),
        format!("--user-agent={}", user_agent),
    ];
    if headless {
        args.push("--headless=new".to_string());
    }
    args
}

/// Runs before any page script on every navigation.
pub const STEALTH_SCRIPT: &str = r#"
    // Hide the automation flag
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined,
    });

    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-US', 'en'],
    });

    // Headless Chrome ships without window.chrome
    window.chrome = {
        runtime: {},
        app: { isInstalled: false },
        csi: function() {},
        loadTimes: function() { return {}; }
    };

    Object.defineProperty(navigator, 'plugins', {
        get: () => {
            const pdf = {
                description: "Portable Document Format",
                filename: "internal-pdf-viewer",
                length: 1,
                name: "Chrome PDF Plugin"
            };
            const p = [pdf, pdf, pdf];
            Object.setPrototypeOf(p, PluginArray.prototype);
            return p;
        }
    });

    const originalQuery = window.navigator.permissions.query;
    window.navigator.permissions.query = (parameters) => (
        parameters.name === 'notifications' ?
        Promise.resolve({ state: Notification.permission }) :
        originalQuery(parameters)
    );
"#;

/// Register the stealth script on a fresh tab.
pub fn install(tab: &Tab) -> Result<()> {
    tab.call_method(AddScriptToEvaluateOnNewDocument {
        source: STEALTH_SCRIPT.to_string(),
        world_name: None,
        include_command_line_api: None,
        run_immediately: None,
    })
    .map_err(|e| AnalyzerError::Browser(format!("failed to install stealth script: {}", e)))?;
    Ok(())
}
