// Memory driver - scripted in-memory DOM
//
// Implements PageDriver and BrowserTabs without a browser. A document is a
// map from selector strings to element states plus reactions that run when a
// selector is clicked or receives a key press. Reactions mutate the document
// in place, replace it (navigation) or open a new tab.
//
// Selectors are matched by exact string, with two suffix forms understood on
// top of a registered selector:
// - pseudo classes `:disabled`, `:enabled`, `:checked`
// - one trailing attribute test `[name='value']`
//
// Nothing ever changes on its own, so waits are evaluated once: a condition
// that does not hold fails immediately with the same error a timed-out wait
// would produce. Every call is recorded so tests can assert which DOM
// actions a page object issued.

use crate::driver::{BrowserTabs, DEFAULT_TIMEOUT, PageDriver, WaitState};
use crate::error::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// State of one element (or of every element matching a selector).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub text: Option<String>,
    pub value: String,
    pub checked: bool,
    pub enabled: bool,
    pub visible: bool,
    /// How many elements match the selector
    pub count: usize,
    pub attributes: HashMap<String, String>,
    /// Visible texts of the options of a `<select>`
    pub options: Vec<String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            text: None,
            value: String::new(),
            checked: false,
            enabled: true,
            visible: true,
            count: 1,
            attributes: HashMap::new(),
            options: Vec::new(),
        }
    }
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element with text content
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Input with a value
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Checkbox or radio input
    pub fn checkbox(checked: bool) -> Self {
        Self {
            checked,
            ..Self::default()
        }
    }

    /// `<select>` with the given option labels; the first one is selected
    pub fn select(options: &[&str]) -> Self {
        Self {
            value: options.first().map(|o| o.to_string()).unwrap_or_default(),
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn repeated(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// What a reaction does after mutating the document.
pub enum Effect {
    /// Stay on the (possibly mutated) document
    Stay,
    /// Replace the document, as a navigation would
    Navigate(MemoryDocument),
    /// Open the document in a new tab
    OpenTab(MemoryDocument),
}

type Reaction = Arc<dyn Fn(&mut MemoryDocument) -> Effect + Send + Sync>;
type Router = Arc<dyn Fn(&str) -> Option<MemoryDocument> + Send + Sync>;
type Script = Arc<dyn Fn(&mut MemoryDocument, &Value) -> Value + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Trigger {
    Click(String),
    Press(String, String),
}

/// A page: URL, title, elements and reactions.
#[derive(Clone)]
pub struct MemoryDocument {
    url: String,
    title: String,
    elements: HashMap<String, Element>,
    reactions: HashMap<Trigger, Reaction>,
    scripts: HashMap<String, Script>,
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("url", &self.url)
            .field("title", &self.title)
            .field("elements", &self.elements.len())
            .field("reactions", &self.reactions.len())
            .field("scripts", &self.scripts.len())
            .finish()
    }
}

impl MemoryDocument {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            elements: HashMap::new(),
            reactions: HashMap::new(),
            scripts: HashMap::new(),
        }
    }

    /// An empty tab
    pub fn blank() -> Self {
        Self::new("about:blank", "")
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Adds an element (builder form of [`insert`](Self::insert))
    pub fn with(mut self, selector: impl Into<String>, element: Element) -> Self {
        self.insert(selector, element);
        self
    }

    /// Registers a reaction to clicks on `selector`
    pub fn on_click<F>(mut self, selector: impl Into<String>, reaction: F) -> Self
    where
        F: Fn(&mut MemoryDocument) -> Effect + Send + Sync + 'static,
    {
        self.reactions
            .insert(Trigger::Click(selector.into()), Arc::new(reaction));
        self
    }

    /// Registers a reaction to `key` being pressed in `selector`
    pub fn on_press<F>(
        mut self,
        selector: impl Into<String>,
        key: impl Into<String>,
        reaction: F,
    ) -> Self
    where
        F: Fn(&mut MemoryDocument) -> Effect + Send + Sync + 'static,
    {
        self.reactions.insert(
            Trigger::Press(selector.into(), key.into()),
            Arc::new(reaction),
        );
        self
    }

    /// Registers the result of evaluating `script` in this document.
    /// Scripts without a handler evaluate to `null`.
    pub fn on_evaluate<F>(mut self, script: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut MemoryDocument, &Value) -> Value + Send + Sync + 'static,
    {
        self.scripts.insert(script.into(), Arc::new(handler));
        self
    }

    pub fn insert(&mut self, selector: impl Into<String>, element: Element) {
        self.elements.insert(selector.into(), element);
    }

    pub fn remove(&mut self, selector: &str) -> Option<Element> {
        self.elements.remove(selector)
    }

    /// Element registered under exactly `selector`
    pub fn element(&self, selector: &str) -> Option<&Element> {
        self.elements.get(selector)
    }

    pub fn element_mut(&mut self, selector: &str) -> Option<&mut Element> {
        self.elements.get_mut(selector)
    }

    /// Current value of an input registered under `selector`
    pub fn value_of(&self, selector: &str) -> Option<&str> {
        self.elements.get(selector).map(|e| e.value.as_str())
    }

    /// Resolves a selector, including the pseudo-class and attribute suffixes.
    fn matching(&self, selector: &str) -> Option<&Element> {
        if let Some(element) = self.elements.get(selector) {
            return Some(element);
        }

        for (suffix, test) in [
            (":disabled", (|e: &Element| !e.enabled) as fn(&Element) -> bool),
            (":enabled", |e: &Element| e.enabled),
            (":checked", |e: &Element| e.checked),
        ] {
            if let Some(base) = selector.strip_suffix(suffix) {
                return self.matching(base).filter(|e| test(e));
            }
        }

        let (base, name, value) = split_attribute_test(selector)?;
        self.matching(base)
            .filter(|e| e.attributes.get(name).map(String::as_str) == Some(value))
    }

    /// Key under which `selector` (or its base selector) is registered.
    fn resolve_key(&self, selector: &str) -> Option<String> {
        if self.elements.contains_key(selector) {
            return Some(selector.to_string());
        }
        self.matching(selector)?;
        [":disabled", ":enabled", ":checked"]
            .iter()
            .find_map(|suffix| selector.strip_suffix(suffix))
            .or_else(|| split_attribute_test(selector).map(|(base, _, _)| base))
            .and_then(|base| self.resolve_key(base))
    }
}

/// Splits `base[name='value']` into its parts.
fn split_attribute_test(selector: &str) -> Option<(&str, &str, &str)> {
    let inner = selector.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let (base, test) = (&inner[..open], &inner[open + 1..]);
    let (name, value) = test.split_once('=')?;
    let value = value.trim_matches(|c| c == '\'' || c == '"');
    if base.is_empty() {
        return None;
    }
    Some((base, name.trim(), value))
}

/// A DOM action recorded by the memory driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Goto(String),
    Click(String),
    DispatchClick(String),
    Fill { selector: String, value: String },
    Press { selector: String, key: String },
    Select { selector: String, label: String },
    Check(String),
    Evaluate(String),
    Close,
}

impl DriverCall {
    /// Selector targeted by a click of any kind
    pub fn clicked(&self) -> Option<&str> {
        match self {
            DriverCall::Click(selector) | DriverCall::DispatchClick(selector) => Some(selector),
            _ => None,
        }
    }
}

struct TabState {
    document: MemoryDocument,
    calls: Vec<DriverCall>,
    closed: bool,
}

struct BrowserState {
    tabs: Vec<Arc<Mutex<TabState>>>,
    router: Option<Router>,
    closed: bool,
}

/// An in-memory browser context.
#[derive(Clone)]
pub struct MemoryBrowser {
    state: Arc<Mutex<BrowserState>>,
}

impl Default for MemoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MemoryBrowser")
            .field("tabs", &state.tabs.len())
            .field("closed", &state.closed)
            .finish()
    }
}

impl MemoryBrowser {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BrowserState {
                tabs: Vec::new(),
                router: None,
                closed: false,
            })),
        }
    }

    /// Serves documents for `goto`. Returning `None` makes the navigation fail.
    pub fn with_router<F>(self, router: F) -> Self
    where
        F: Fn(&str) -> Option<MemoryDocument> + Send + Sync + 'static,
    {
        self.state.lock().router = Some(Arc::new(router));
        self
    }

    /// Opens a tab showing `document` and returns its concrete driver.
    pub fn open(&self, document: MemoryDocument) -> MemoryPage {
        let tab = Arc::new(Mutex::new(TabState {
            document,
            calls: Vec::new(),
            closed: false,
        }));
        self.state.lock().tabs.push(Arc::clone(&tab));
        MemoryPage {
            tab,
            browser: self.clone(),
        }
    }

    /// Concrete driver for the open tab at `index`
    pub fn page(&self, index: usize) -> Option<MemoryPage> {
        let state = self.state.lock();
        state.tabs.get(index).map(|tab| MemoryPage {
            tab: Arc::clone(tab),
            browser: self.clone(),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn route(&self, url: &str) -> Option<MemoryDocument> {
        let router = self.state.lock().router.clone()?;
        router(url)
    }

    fn detach(&self, tab: &Arc<Mutex<TabState>>) {
        self.state.lock().tabs.retain(|t| !Arc::ptr_eq(t, tab));
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state.lock().closed {
            Err(Error::TargetClosed("browser context is closed".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BrowserTabs for MemoryBrowser {
    async fn new_tab(&self) -> Result<Arc<dyn PageDriver>> {
        self.ensure_open()?;
        Ok(Arc::new(self.open(MemoryDocument::blank())))
    }

    async fn tab(&self, index: usize) -> Result<Arc<dyn PageDriver>> {
        self.ensure_open()?;
        let count = self.state.lock().tabs.len();
        self.page(index)
            .map(|page| Arc::new(page) as Arc<dyn PageDriver>)
            .ok_or_else(|| {
                Error::TargetClosed(format!("tab {} requested but only {} open", index, count))
            })
    }

    async fn tab_count(&self) -> Result<usize> {
        Ok(self.state.lock().tabs.len())
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        for tab in state.tabs.drain(..) {
            tab.lock().closed = true;
        }
        state.closed = true;
        Ok(())
    }
}

/// One in-memory tab.
#[derive(Clone)]
pub struct MemoryPage {
    tab: Arc<Mutex<TabState>>,
    browser: MemoryBrowser,
}

impl fmt::Debug for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tab = self.tab.lock();
        f.debug_struct("MemoryPage")
            .field("url", &tab.document.url)
            .field("closed", &tab.closed)
            .finish()
    }
}

impl MemoryPage {
    /// A standalone tab in its own browser context
    pub fn standalone(document: MemoryDocument) -> Self {
        MemoryBrowser::new().open(document)
    }

    /// DOM actions issued on this tab so far
    pub fn calls(&self) -> Vec<DriverCall> {
        self.tab.lock().calls.clone()
    }

    /// Selectors clicked on this tab, in order
    pub fn clicks(&self) -> Vec<String> {
        self.tab
            .lock()
            .calls
            .iter()
            .filter_map(|call| call.clicked().map(str::to_string))
            .collect()
    }

    /// Runs `f` against the current document
    pub fn with_document<R>(&self, f: impl FnOnce(&mut MemoryDocument) -> R) -> R {
        f(&mut self.tab.lock().document)
    }

    pub fn is_closed(&self) -> bool {
        self.tab.lock().closed
    }

    fn record(&self, call: DriverCall) -> Result<()> {
        let mut tab = self.tab.lock();
        if tab.closed {
            return Err(Error::TargetClosed(format!(
                "page '{}' is closed",
                tab.document.url
            )));
        }
        tab.calls.push(call);
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&MemoryDocument) -> Result<R>) -> Result<R> {
        let tab = self.tab.lock();
        if tab.closed {
            return Err(Error::TargetClosed(format!(
                "page '{}' is closed",
                tab.document.url
            )));
        }
        f(&tab.document)
    }

    fn actionable(&self, selector: &str) -> Result<()> {
        self.read(|doc| match doc.matching(selector) {
            None => Err(Error::ElementNotFound(selector.to_string())),
            Some(e) if !e.visible || !e.enabled => Err(Error::WaitTimeout {
                selector: selector.to_string(),
                state: WaitState::Visible,
                timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            }),
            Some(_) => Ok(()),
        })
    }

    /// Runs the reaction registered for `trigger` and applies its effect.
    /// Returns the tab opened by the reaction, if any.
    fn fire(&self, trigger: Trigger) -> Option<MemoryPage> {
        let opened = {
            let mut tab = self.tab.lock();
            let reaction = tab.document.reactions.get(&trigger).cloned()?;
            match reaction(&mut tab.document) {
                Effect::Stay => None,
                Effect::Navigate(next) => {
                    tab.document = next;
                    None
                }
                Effect::OpenTab(document) => Some(document),
            }
        };
        opened.map(|document| self.browser.open(document))
    }

    fn element_key(&self, selector: &str) -> Result<String> {
        self.read(|doc| {
            doc.resolve_key(selector)
                .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
        })
    }
}

#[async_trait]
impl PageDriver for MemoryPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(DriverCall::Goto(url.to_string()))?;
        let document = self
            .browser
            .route(url)
            .ok_or_else(|| Error::InvalidArgument(format!("no page served at '{}'", url)))?;
        self.tab.lock().document = document;
        Ok(())
    }

    async fn url(&self) -> Result<String> {
        self.read(|doc| Ok(doc.url.clone()))
    }

    async fn title(&self) -> Result<String> {
        self.read(|doc| Ok(doc.title.clone()))
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.actionable(selector)?;
        self.record(DriverCall::Click(selector.to_string()))?;
        self.fire(Trigger::Click(selector.to_string()));
        Ok(())
    }

    async fn click_and_wait_for_navigation(&self, selector: &str) -> Result<()> {
        self.click(selector).await
    }

    async fn dispatch_click(&self, selector: &str) -> Result<()> {
        self.read(|doc| {
            doc.matching(selector)
                .map(|_| ())
                .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
        })?;
        self.record(DriverCall::DispatchClick(selector.to_string()))?;
        self.fire(Trigger::Click(selector.to_string()));
        Ok(())
    }

    async fn click_for_new_tab(&self, selector: &str) -> Result<Arc<dyn PageDriver>> {
        self.actionable(selector)?;
        self.record(DriverCall::Click(selector.to_string()))?;
        match self.fire(Trigger::Click(selector.to_string())) {
            Some(page) => Ok(Arc::new(page)),
            None => Err(Error::Timeout(format!(
                "no new tab opened by '{}' after {:?}",
                selector, DEFAULT_TIMEOUT
            ))),
        }
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.actionable(selector)?;
        let key = self.element_key(selector)?;
        self.record(DriverCall::Fill {
            selector: selector.to_string(),
            value: value.to_string(),
        })?;
        if let Some(element) = self.tab.lock().document.element_mut(&key) {
            element.value = value.to_string();
        }
        Ok(())
    }

    async fn press(&self, selector: &str, key: &str) -> Result<()> {
        self.actionable(selector)?;
        self.record(DriverCall::Press {
            selector: selector.to_string(),
            key: key.to_string(),
        })?;
        self.fire(Trigger::Press(selector.to_string(), key.to_string()));
        Ok(())
    }

    async fn press_and_wait_for_navigation(&self, selector: &str, key: &str) -> Result<()> {
        self.press(selector, key).await
    }

    async fn select_by_label(&self, selector: &str, label: &str) -> Result<()> {
        self.actionable(selector)?;
        let key = self.element_key(selector)?;
        let known = self.read(|doc| {
            Ok(doc
                .element(&key)
                .is_some_and(|e| e.options.iter().any(|o| o == label)))
        })?;
        if !known {
            return Err(Error::InvalidArgument(format!(
                "no option labelled '{}' in '{}'",
                label, selector
            )));
        }
        self.record(DriverCall::Select {
            selector: selector.to_string(),
            label: label.to_string(),
        })?;
        if let Some(element) = self.tab.lock().document.element_mut(&key) {
            element.value = label.to_string();
        }
        Ok(())
    }

    async fn check(&self, selector: &str) -> Result<()> {
        self.actionable(selector)?;
        let key = self.element_key(selector)?;
        self.record(DriverCall::Check(selector.to_string()))?;

        let mut tab = self.tab.lock();
        let group = tab
            .document
            .element(&key)
            .and_then(|e| e.attributes.get("name").cloned());
        if let Some(group) = group {
            for element in tab.document.elements.values_mut() {
                if element.attributes.get("name") == Some(&group) {
                    element.checked = false;
                }
            }
        }
        if let Some(element) = tab.document.element_mut(&key) {
            element.checked = true;
        }
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<()> {
        let matches = self.read(|doc| {
            let element = doc.matching(selector);
            Ok(match state {
                WaitState::Attached => element.is_some_and(|e| e.count > 0),
                WaitState::Detached => element.is_none_or(|e| e.count == 0),
                WaitState::Visible => element.is_some_and(|e| e.count > 0 && e.visible),
                WaitState::Hidden => element.is_none_or(|e| e.count == 0 || !e.visible),
            })
        })?;

        if matches {
            Ok(())
        } else {
            Err(Error::WaitTimeout {
                selector: selector.to_string(),
                state,
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        self.read(|doc| {
            doc.matching(selector)
                .map(|e| e.text.clone())
                .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
        })
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        self.read(|doc| {
            doc.matching(selector)
                .map(|e| e.attributes.get(name).cloned())
                .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
        })
    }

    async fn is_checked(&self, selector: &str) -> Result<bool> {
        self.read(|doc| {
            doc.matching(selector)
                .map(|e| e.checked)
                .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
        })
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool> {
        self.read(|doc| {
            doc.matching(selector)
                .map(|e| e.enabled)
                .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
        })
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        self.read(|doc| Ok(doc.matching(selector).is_some_and(|e| e.count > 0 && e.visible)))
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        self.read(|doc| Ok(doc.matching(selector).map_or(0, |e| e.count)))
    }

    async fn evaluate(&self, script: &str, arg: Value) -> Result<Value> {
        self.record(DriverCall::Evaluate(script.to_string()))?;
        let mut tab = self.tab.lock();
        let handler = tab.document.scripts.get(script).cloned();
        Ok(match handler {
            Some(handler) => handler(&mut tab.document, &arg),
            None => Value::Null,
        })
    }

    async fn close(&self) -> Result<()> {
        self.record(DriverCall::Close)?;
        self.tab.lock().closed = true;
        self.browser.detach(&self.tab);
        Ok(())
    }
}
