// Page driver - DOM primitives shared by every page object
//
// Page objects never talk to a browser directly. They hold an
// `Arc<dyn PageDriver>` for the page currently loaded in the tab and compose
// its primitives into domain verbs.
//
// Architecture:
// - `PageDriver`: one browser tab (navigate, click, read state, wait)
// - `BrowserTabs`: one isolated browser context (open tab, fetch tab N, close)
// - `playwright`: live implementation over playwright-rs
// - `memory`: scripted in-memory DOM for offline runs and tests

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub mod memory;
pub mod playwright;

/// Default timeout for driver operations (matches Playwright's 30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Polling interval used by selector waits
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Target state for [`PageDriver::wait_for_selector`].
///
/// See: <https://playwright.dev/docs/api/class-page#page-wait-for-selector>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitState {
    /// At least one element matches, visible or not
    Attached,
    /// No element matches
    Detached,
    /// The first match is visible
    Visible,
    /// The first match is hidden or nothing matches
    Hidden,
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
        };
        f.write_str(name)
    }
}

/// DOM primitives for the page loaded in one browser tab.
///
/// All selector-taking methods act on the first element matching the
/// selector. Failures are returned as-is; implementations never retry an
/// action.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigates the tab to `url` and waits for the load to settle.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Returns the last committed URL of the tab.
    async fn url(&self) -> Result<String>;

    /// Returns the document title.
    async fn title(&self) -> Result<String>;

    /// Clicks the element.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Clicks the element and waits until the resulting navigation loads.
    async fn click_and_wait_for_navigation(&self, selector: &str) -> Result<()>;

    /// Calls `element.click()` inside the page, bypassing actionability
    /// checks. Needed for inputs hidden behind styled siblings.
    async fn dispatch_click(&self, selector: &str) -> Result<()>;

    /// Clicks an element that opens a new tab and returns a driver for it
    /// once its document has loaded.
    async fn click_for_new_tab(&self, selector: &str) -> Result<Arc<dyn PageDriver>>;

    /// Replaces the value of an input or textarea.
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Presses a key while the element has focus.
    async fn press(&self, selector: &str, key: &str) -> Result<()>;

    /// Presses a key in the element and waits until the resulting
    /// navigation loads (submitting a search box with Enter).
    async fn press_and_wait_for_navigation(&self, selector: &str, key: &str) -> Result<()>;

    /// Selects the option whose visible text is `label`.
    async fn select_by_label(&self, selector: &str, label: &str) -> Result<()>;

    /// Checks a checkbox or radio button (no-op when already checked).
    async fn check(&self, selector: &str) -> Result<()>;

    /// Waits until the selector reaches `state` or `timeout` elapses.
    async fn wait_for_selector(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<()>;

    /// Returns the raw `textContent` of the element, `None` if it has none.
    async fn text_content(&self, selector: &str) -> Result<Option<String>>;

    /// Returns an attribute of the element.
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    /// Returns the `checked` property of a checkbox or radio input.
    async fn is_checked(&self, selector: &str) -> Result<bool>;

    /// Returns whether the element is enabled.
    async fn is_enabled(&self, selector: &str) -> Result<bool>;

    /// Returns whether the element is visible. Missing elements are not.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Returns the number of elements matching the selector.
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Evaluates a JavaScript function in the page with one JSON argument.
    async fn evaluate(&self, script: &str, arg: serde_json::Value) -> Result<serde_json::Value>;

    /// Closes the tab.
    async fn close(&self) -> Result<()>;

    /// Default timeout applied to waits issued by page objects.
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }
}

/// One isolated browser context owning the tabs of a single scenario.
#[async_trait]
pub trait BrowserTabs: Send + Sync {
    /// Opens a new tab in the context.
    async fn new_tab(&self) -> Result<Arc<dyn PageDriver>>;

    /// Returns the tab at `index` (tabs are ordered by opening time).
    async fn tab(&self, index: usize) -> Result<Arc<dyn PageDriver>>;

    /// Number of open tabs.
    async fn tab_count(&self) -> Result<usize>;

    /// Closes the context and every tab in it.
    async fn close(&self) -> Result<()>;
}
