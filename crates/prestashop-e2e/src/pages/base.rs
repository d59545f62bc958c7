// Base page - utilities shared by every page object

use crate::driver::{BrowserTabs, PageDriver, WaitState};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Collapses every whitespace run to a single space and trims the result.
///
/// This is how every text read by a page object is normalized, so a label
/// made only of whitespace reads back as an empty string.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// DOM helpers over the tab a page object was built for.
#[derive(Clone)]
pub struct BasePage {
    driver: Arc<dyn PageDriver>,
}

impl BasePage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self { driver }
    }

    /// The driver of the tab this page object acts on
    pub fn driver(&self) -> &Arc<dyn PageDriver> {
        &self.driver
    }

    /// Timeout applied to waits that have no explicit one
    pub fn timeout(&self) -> Duration {
        self.driver.timeout()
    }

    pub async fn go_to(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await
    }

    pub async fn get_page_title(&self) -> Result<String> {
        self.driver.title().await
    }

    /// Reads the normalized text of the first element matching `selector`.
    ///
    /// With `wait_for_visible`, waits for the element to be visible first.
    /// Elements without text content read as an empty string.
    pub async fn get_text_content(&self, selector: &str, wait_for_visible: bool) -> Result<String> {
        if wait_for_visible {
            self.wait_for_visible_selector(selector).await?;
        }
        let text = self.driver.text_content(selector).await?;
        Ok(text.as_deref().map(normalize_text).unwrap_or_default())
    }

    pub async fn is_checkbox_selected(&self, selector: &str) -> Result<bool> {
        self.driver.is_checked(selector).await
    }

    pub async fn wait_for_visible_selector(&self, selector: &str) -> Result<()> {
        self.driver
            .wait_for_selector(selector, WaitState::Visible, self.timeout())
            .await
    }

    pub async fn wait_for_attached_selector(&self, selector: &str) -> Result<()> {
        self.driver
            .wait_for_selector(selector, WaitState::Attached, self.timeout())
            .await
    }

    /// Whether the element becomes visible within `timeout`.
    pub async fn element_visible(&self, selector: &str, timeout: Duration) -> Result<bool> {
        self.wait_as_bool(selector, WaitState::Visible, timeout).await
    }

    /// Whether the element is (or becomes) hidden within `timeout`.
    pub async fn element_not_visible(&self, selector: &str, timeout: Duration) -> Result<bool> {
        self.wait_as_bool(selector, WaitState::Hidden, timeout).await
    }

    async fn wait_as_bool(&self, selector: &str, state: WaitState, timeout: Duration) -> Result<bool> {
        match self.driver.wait_for_selector(selector, state, timeout).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Clears an input, then types `value` into it.
    pub async fn set_value(&self, selector: &str, value: &str) -> Result<()> {
        self.wait_for_visible_selector(selector).await?;
        self.driver.fill(selector, "").await?;
        self.driver.fill(selector, value).await
    }

    /// Closes this tab and returns the driver of tab `tab_index`.
    ///
    /// Every page object built on the closed tab is stale afterwards.
    pub async fn close_page(
        &self,
        tabs: &dyn BrowserTabs,
        tab_index: usize,
    ) -> Result<Arc<dyn PageDriver>> {
        self.driver.close().await?;
        tabs.tab(tab_index)
            .await
            .map_err(|e| e.context(format!("switching to tab {}", tab_index)))
    }
}
