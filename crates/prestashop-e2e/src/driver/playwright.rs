// Playwright driver - live browser implementation of PageDriver
//
// Wraps playwright-rs. Waits that Playwright's Rust bindings do not expose
// directly (wait-for-selector, wait-for-navigation, wait-for-popup) are
// implemented as polling loops with the same shape as the bindings' own
// auto-retrying assertions: check, compare against the deadline, sleep.

use crate::config::{BrowserKind, SuiteConfig};
use crate::driver::{BrowserTabs, POLL_INTERVAL, PageDriver, WaitState};
use crate::error::{Error, Result};
use async_trait::async_trait;
use playwright_rs::protocol::{CheckOptions, ClickOptions, FillOptions, PressOptions};
use playwright_rs::{
    Browser, BrowserContext, GotoOptions, Locator, Page, Playwright, SelectOption, WaitUntil,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DISPATCH_CLICK_SCRIPT: &str = "(selector) => { \
    const el = document.querySelector(selector); \
    if (!el) { return false; } \
    el.click(); \
    return true; \
}";

const MARK_DOCUMENT_SCRIPT: &str = "(token) => { window.__e2eNavigationToken = token; }";

const DOCUMENT_STATE_SCRIPT: &str = "() => ({ \
    token: window.__e2eNavigationToken || null, \
    ready: document.readyState \
})";

/// A launched Playwright server and browser.
///
/// One instance is shared by every campaign of a run; each campaign gets its
/// own [`PlaywrightContext`].
pub struct PlaywrightBrowser {
    playwright: Playwright,
    browser: Browser,
    config: SuiteConfig,
}

impl PlaywrightBrowser {
    /// Starts the Playwright server and launches the configured browser.
    pub async fn launch(config: &SuiteConfig) -> Result<Self> {
        tracing::debug!(
            "Launching {} (headless: {})",
            config.browser,
            config.headless
        );

        let playwright = Playwright::launch()
            .await
            .map_err(|e| Error::from(e).context("starting Playwright server"))?;

        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };

        let browser = browser_type
            .launch_with_options(config.launch_options())
            .await
            .map_err(|e| Error::from(e).context(format!("launching {}", config.browser)))?;

        tracing::debug!("Browser {} {} launched", browser.name(), browser.version());

        Ok(Self {
            playwright,
            browser,
            config: config.clone(),
        })
    }

    /// Creates an isolated browser context for one scenario.
    pub async fn new_context(&self) -> Result<PlaywrightContext> {
        let context = self
            .browser
            .new_context_with_options(self.config.context_options())
            .await?;

        Ok(PlaywrightContext {
            context,
            timeout: self.config.timeout(),
        })
    }

    /// Closes the browser and shuts the Playwright server down.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}

/// A browser context: the tabs of one scenario.
pub struct PlaywrightContext {
    context: BrowserContext,
    timeout: Duration,
}

#[async_trait]
impl BrowserTabs for PlaywrightContext {
    async fn new_tab(&self) -> Result<Arc<dyn PageDriver>> {
        let page = self.context.new_page().await?;
        Ok(Arc::new(PlaywrightPage::new(page, self.timeout)))
    }

    async fn tab(&self, index: usize) -> Result<Arc<dyn PageDriver>> {
        let pages = self.context.pages();
        let count = pages.len();
        let page = pages.into_iter().nth(index).ok_or_else(|| {
            Error::TargetClosed(format!("tab {} requested but only {} open", index, count))
        })?;
        Ok(Arc::new(PlaywrightPage::new(page, self.timeout)))
    }

    async fn tab_count(&self) -> Result<usize> {
        Ok(self.context.pages().len())
    }

    async fn close(&self) -> Result<()> {
        self.context.close().await?;
        Ok(())
    }
}

/// One browser tab driven through Playwright.
#[derive(Clone)]
pub struct PlaywrightPage {
    page: Page,
    timeout: Duration,
}

impl PlaywrightPage {
    /// Wraps a Playwright page. `timeout` bounds every action and wait.
    pub fn new(page: Page, timeout: Duration) -> Self {
        Self { page, timeout }
    }

    /// The underlying Playwright page
    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn first(&self, selector: &str) -> Locator {
        self.page.locator(selector).await.first()
    }

    fn timeout_ms(&self) -> f64 {
        self.timeout.as_millis() as f64
    }

    fn click_options(&self) -> ClickOptions {
        ClickOptions {
            timeout: Some(self.timeout_ms()),
            ..Default::default()
        }
    }

    /// Tags the current document so a later poll can tell it was replaced.
    async fn mark_document(&self) -> Result<String> {
        let token = format!("{:x}", rand::random::<u64>());
        self.page
            .evaluate::<String, serde_json::Value>(MARK_DOCUMENT_SCRIPT, Some(&token))
            .await?;
        Ok(token)
    }

    /// Polls `document` until the navigation token set before an action is
    /// gone (a new document replaced the old one) and the new document has
    /// finished loading. Evaluation errors while the old context is torn down
    /// count as "not yet".
    async fn wait_for_new_document(&self, token: &str) -> Result<()> {
        let start = Instant::now();

        loop {
            let state: Option<serde_json::Value> = self
                .page
                .evaluate::<(), serde_json::Value>(DOCUMENT_STATE_SCRIPT, None)
                .await
                .ok();

            if let Some(state) = state {
                let same_document = state["token"].as_str() == Some(token);
                let ready = state["ready"].as_str() == Some("complete");
                if !same_document && ready {
                    return Ok(());
                }
            }

            if start.elapsed() >= self.timeout {
                return Err(Error::Timeout(format!(
                    "navigation from '{}' did not complete after {:?}",
                    self.page.url(),
                    self.timeout
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl PageDriver for PlaywrightPage {
    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("goto {}", url);
        let options = GotoOptions::new()
            .timeout(self.timeout)
            .wait_until(WaitUntil::Load);
        self.page.goto(url, Some(options)).await?;
        Ok(())
    }

    async fn url(&self) -> Result<String> {
        Ok(self.page.url())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.page.title().await?)
    }

    async fn click(&self, selector: &str) -> Result<()> {
        tracing::debug!("click {}", selector);
        self.first(selector)
            .await
            .click(Some(self.click_options()))
            .await?;
        Ok(())
    }

    async fn click_and_wait_for_navigation(&self, selector: &str) -> Result<()> {
        tracing::debug!("click {} and wait for navigation", selector);
        let token = self.mark_document().await?;
        self.click(selector).await?;
        self.wait_for_new_document(&token).await
    }

    async fn dispatch_click(&self, selector: &str) -> Result<()> {
        tracing::debug!("dispatch click on {}", selector);
        let clicked: bool = self
            .page
            .evaluate(DISPATCH_CLICK_SCRIPT, Some(&selector.to_string()))
            .await?;

        if clicked {
            Ok(())
        } else {
            Err(Error::ElementNotFound(selector.to_string()))
        }
    }

    async fn click_for_new_tab(&self, selector: &str) -> Result<Arc<dyn PageDriver>> {
        let context = self.page.context()?;
        let before = context.pages().len();

        self.click(selector).await?;

        let start = Instant::now();
        let new_page = loop {
            let pages = context.pages();
            if pages.len() > before {
                if let Some(page) = pages.into_iter().last() {
                    break page;
                }
            }

            if start.elapsed() >= self.timeout {
                return Err(Error::Timeout(format!(
                    "no new tab opened by '{}' after {:?}",
                    selector, self.timeout
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        };

        tracing::debug!("new tab opened by {}", selector);
        let driver = PlaywrightPage::new(new_page, self.timeout);
        driver
            .wait_for_selector("body", WaitState::Visible, self.timeout)
            .await?;
        Ok(Arc::new(driver))
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        tracing::debug!("fill {}", selector);
        let options = FillOptions {
            timeout: Some(self.timeout_ms()),
            ..Default::default()
        };
        self.first(selector).await.fill(value, Some(options)).await?;
        Ok(())
    }

    async fn press(&self, selector: &str, key: &str) -> Result<()> {
        tracing::debug!("press {} on {}", key, selector);
        let options = PressOptions {
            timeout: Some(self.timeout_ms()),
            ..Default::default()
        };
        self.first(selector).await.press(key, Some(options)).await?;
        Ok(())
    }

    async fn press_and_wait_for_navigation(&self, selector: &str, key: &str) -> Result<()> {
        let token = self.mark_document().await?;
        self.press(selector, key).await?;
        self.wait_for_new_document(&token).await
    }

    async fn select_by_label(&self, selector: &str, label: &str) -> Result<()> {
        tracing::debug!("select '{}' in {}", label, selector);
        self.first(selector)
            .await
            .select_option(SelectOption::Label(label.to_string()), None)
            .await?;
        Ok(())
    }

    async fn check(&self, selector: &str) -> Result<()> {
        tracing::debug!("check {}", selector);
        let options = CheckOptions {
            timeout: Some(self.timeout_ms()),
            ..Default::default()
        };
        self.first(selector).await.check(Some(options)).await?;
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<()> {
        let start = Instant::now();
        let locator = self.page.locator(selector).await;

        loop {
            let matches = match state {
                WaitState::Attached => locator.count().await? > 0,
                WaitState::Detached => locator.count().await? == 0,
                WaitState::Visible => locator.first().is_visible().await?,
                WaitState::Hidden => !locator.first().is_visible().await?,
            };

            if matches {
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(Error::WaitTimeout {
                    selector: selector.to_string(),
                    state,
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        let locator = self.page.locator(selector).await;
        if locator.count().await? == 0 {
            return Err(Error::ElementNotFound(selector.to_string()));
        }
        Ok(locator.first().text_content().await?)
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self.first(selector).await.get_attribute(name).await?)
    }

    async fn is_checked(&self, selector: &str) -> Result<bool> {
        let locator = self.page.locator(selector).await;
        if locator.count().await? == 0 {
            return Err(Error::ElementNotFound(selector.to_string()));
        }
        Ok(locator.first().is_checked().await?)
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool> {
        Ok(self.first(selector).await.is_enabled().await?)
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        Ok(self.first(selector).await.is_visible().await?)
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.page.locator(selector).await.count().await?)
    }

    async fn evaluate(&self, script: &str, arg: serde_json::Value) -> Result<serde_json::Value> {
        Ok(self.page.evaluate(script, Some(&arg)).await?)
    }

    async fn close(&self) -> Result<()> {
        tracing::debug!("closing tab {}", self.page.url());
        self.page.close().await?;
        Ok(())
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
