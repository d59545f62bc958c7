// Shop session - the tab a scenario currently drives
//
// A scenario works on one browser context. Exactly one of its tabs is
// current; the page objects are always built on that tab and are rebuilt
// together whenever the scenario switches tabs.

use crate::config::SuiteConfig;
use crate::driver::{BrowserTabs, PageDriver};
use crate::error::Result;
use crate::pages::Pages;
use std::sync::Arc;

pub struct ShopSession {
    tabs: Arc<dyn BrowserTabs>,
    current: Arc<dyn PageDriver>,
    pages: Pages,
}

impl ShopSession {
    /// Opens a first tab in `tabs` and makes it current.
    pub async fn open(tabs: Arc<dyn BrowserTabs>) -> Result<Self> {
        let current = tabs
            .new_tab()
            .await
            .map_err(|e| e.context("opening first tab"))?;
        Ok(Self::with_current(tabs, current))
    }

    /// Wraps an already opened tab.
    pub fn with_current(tabs: Arc<dyn BrowserTabs>, current: Arc<dyn PageDriver>) -> Self {
        let pages = Pages::new(Arc::clone(&current));
        Self {
            tabs,
            current,
            pages,
        }
    }

    pub fn tabs(&self) -> &dyn BrowserTabs {
        self.tabs.as_ref()
    }

    pub fn current(&self) -> &Arc<dyn PageDriver> {
        &self.current
    }

    /// Page objects built on the current tab
    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    /// Makes `driver` the current tab and rebuilds every page object on it.
    pub fn switch_to(&mut self, driver: Arc<dyn PageDriver>) {
        self.pages = Pages::new(Arc::clone(&driver));
        self.current = driver;
    }

    /// Closes the browser context and every tab in it.
    pub async fn close(&self) -> Result<()> {
        self.tabs.close().await
    }
}

/// Everything a campaign step works with.
pub struct ShopContext {
    pub session: ShopSession,
    pub config: SuiteConfig,
}

impl ShopContext {
    pub fn new(session: ShopSession, config: SuiteConfig) -> Self {
        Self { session, config }
    }

    pub fn pages(&self) -> &Pages {
        self.session.pages()
    }
}
