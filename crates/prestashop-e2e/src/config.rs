// Suite configuration
//
// Values come from the same environment variables the shop's UI test
// campaigns have always used (URL_FO, URL_BO, LOGIN, PASSWD, BROWSER,
// HEADLESS, SLOWMO, TIMEOUT) and can be overridden with builder methods.

use crate::error::{Error, Result};
use playwright_rs::{BrowserContextOptions, LaunchOptions, Viewport};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const DEFAULT_FO_URL: &str = "http://localhost/prestashop/";
const DEFAULT_EMAIL: &str = "demo@prestashop.com";
const DEFAULT_PASSWORD: &str = "prestashop_demo";
const DEFAULT_SLOW_MO_MS: u64 = 5;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Arguments passed to Chromium so it runs inside containers
pub const SANDBOX_ARGS: [&str; 2] = ["--no-sandbox", "--disable-dev-shm-usage"];

/// Browser engine used for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" | "safari" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!(
                "unknown browser '{}' (expected chromium, firefox or webkit)",
                other
            ))),
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        })
    }
}

/// Everything a campaign needs to reach and drive the shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Storefront base URL
    pub fo_url: String,
    /// Back-office base URL
    pub bo_url: String,
    /// Back-office employee email
    pub email: String,
    /// Back-office employee password
    pub password: String,
    /// Browser engine
    pub browser: BrowserKind,
    /// Run without a visible window
    pub headless: bool,
    /// Delay inserted by Playwright between operations
    pub slow_mo_ms: u64,
    /// Timeout applied to every wait and action
    pub timeout_ms: u64,
    /// Locale of the browser context
    pub locale: String,
    /// Viewport of every tab
    pub viewport: (u32, u32),
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            fo_url: DEFAULT_FO_URL.to_string(),
            bo_url: format!("{}admin-dev/", DEFAULT_FO_URL),
            email: DEFAULT_EMAIL.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            browser: BrowserKind::default(),
            headless: true,
            slow_mo_ms: DEFAULT_SLOW_MO_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            locale: "en-GB".to_string(),
            viewport: (1680, 900),
        }
    }
}

impl SuiteConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value. Missing variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let fo_url = lookup("URL_FO").unwrap_or(defaults.fo_url);
        validate_url("URL_FO", &fo_url)?;

        let bo_url = lookup("URL_BO").unwrap_or_else(|| format!("{}admin-dev/", fo_url));
        validate_url("URL_BO", &bo_url)?;

        let browser = match lookup("BROWSER") {
            Some(value) => value.parse()?,
            None => defaults.browser,
        };

        let headless = match lookup("HEADLESS") {
            Some(value) => serde_json::from_str::<bool>(value.trim()).map_err(|_| {
                Error::Config(format!("HEADLESS must be true or false, got '{}'", value))
            })?,
            None => defaults.headless,
        };

        let slow_mo_ms = parse_millis("SLOWMO", lookup("SLOWMO"), defaults.slow_mo_ms)?;
        let timeout_ms = parse_millis("TIMEOUT", lookup("TIMEOUT"), defaults.timeout_ms)?;

        Ok(Self {
            fo_url,
            bo_url,
            email: lookup("LOGIN").unwrap_or(defaults.email),
            password: lookup("PASSWD").unwrap_or(defaults.password),
            browser,
            headless,
            slow_mo_ms,
            timeout_ms,
            ..defaults
        })
    }

    /// Set the storefront URL
    pub fn fo_url(mut self, url: impl Into<String>) -> Self {
        self.fo_url = url.into();
        self
    }

    /// Set the back-office URL
    pub fn bo_url(mut self, url: impl Into<String>) -> Self {
        self.bo_url = url.into();
        self
    }

    /// Set the employee credentials
    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = email.into();
        self.password = password.into();
        self
    }

    /// Set the browser engine
    pub fn browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Run headless or headed
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the operation timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Operation timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Options for `BrowserType::launch_with_options`
    pub fn launch_options(&self) -> LaunchOptions {
        let options = LaunchOptions::new()
            .headless(self.headless)
            .slow_mo(self.slow_mo_ms as f64)
            .timeout(self.timeout_ms as f64);

        match self.browser {
            BrowserKind::Chromium => {
                options.args(SANDBOX_ARGS.iter().map(|arg| arg.to_string()).collect())
            }
            _ => options,
        }
    }

    /// Options for `Browser::new_context_with_options`
    pub fn context_options(&self) -> BrowserContextOptions {
        BrowserContextOptions::builder()
            .locale(self.locale.clone())
            .viewport(Viewport {
                width: self.viewport.0,
                height: self.viewport.1,
            })
            .accept_downloads(true)
            .build()
    }
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| Error::Config(format!("{} is not a valid URL ('{}'): {}", name, value, e)))
}

fn parse_millis(name: &str, value: Option<String>, default: u64) -> Result<u64> {
    match value {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            Error::Config(format!(
                "{} must be a number of milliseconds, got '{}'",
                name, raw
            ))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_demo_shop() {
        let config = SuiteConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.fo_url, "http://localhost/prestashop/");
        assert_eq!(config.bo_url, "http://localhost/prestashop/admin-dev/");
        assert_eq!(config.email, "demo@prestashop.com");
        assert_eq!(config.password, "prestashop_demo");
        assert_eq!(config.browser, BrowserKind::Chromium);
        assert!(config.headless);
        assert_eq!(config.slow_mo_ms, 5);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_bo_url_derives_from_fo_url() {
        let config =
            SuiteConfig::from_lookup(lookup_from(&[("URL_FO", "https://shop.test/")])).unwrap();
        assert_eq!(config.bo_url, "https://shop.test/admin-dev/");
    }

    #[test]
    fn test_environment_overrides() {
        let config = SuiteConfig::from_lookup(lookup_from(&[
            ("URL_FO", "https://shop.test/"),
            ("URL_BO", "https://shop.test/admin123/"),
            ("LOGIN", "qa@shop.test"),
            ("PASSWD", "secret"),
            ("BROWSER", "firefox"),
            ("HEADLESS", "false"),
            ("SLOWMO", "50"),
            ("TIMEOUT", "10000"),
        ]))
        .unwrap();

        assert_eq!(config.bo_url, "https://shop.test/admin123/");
        assert_eq!(config.email, "qa@shop.test");
        assert_eq!(config.password, "secret");
        assert_eq!(config.browser, BrowserKind::Firefox);
        assert!(!config.headless);
        assert_eq!(config.slow_mo_ms, 50);
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = SuiteConfig::from_lookup(lookup_from(&[("HEADLESS", "maybe")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = SuiteConfig::from_lookup(lookup_from(&[("BROWSER", "netscape")])).unwrap_err();
        assert!(err.to_string().contains("netscape"));

        let err = SuiteConfig::from_lookup(lookup_from(&[("URL_FO", "not a url")])).unwrap_err();
        assert!(err.to_string().contains("URL_FO"));

        let err = SuiteConfig::from_lookup(lookup_from(&[("SLOWMO", "-3")])).unwrap_err();
        assert!(err.to_string().contains("SLOWMO"));
    }

    #[test]
    fn test_chromium_launch_options_carry_sandbox_args() {
        let options = SuiteConfig::default().launch_options();
        assert_eq!(options.headless, Some(true));
        assert_eq!(
            options.args,
            Some(vec![
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string()
            ])
        );

        let options = SuiteConfig::default()
            .browser(BrowserKind::Webkit)
            .launch_options();
        assert!(options.args.is_none());
    }
}
