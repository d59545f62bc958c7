// Fake shop - an in-memory PrestaShop for the memory driver
//
// Serves the back-office and storefront screens the campaigns visit, built
// from the same selectors the page objects use. Saved forms update a shared
// state, so what the storefront shows follows what the back office
// configured.

use parking_lot::Mutex;
use prestashop_e2e::SuiteConfig;
use prestashop_e2e::driver::memory::{Effect, Element, MemoryBrowser, MemoryDocument};
use prestashop_e2e::pages::bo::{
    self, ALERT_SUCCESS_BLOCK, ALERT_SUCCESS_BLOCK_PARAGRAPH, CATALOG_PARENT_LINK,
    GROWL_CLOSE_BUTTON, GROWL_MESSAGE_BLOCK, HEADER_SHOP_NAME_LINK, PAYMENT_PARENT_LINK,
    PREFERENCES_LINK, PRODUCT_SETTINGS_LINK, PRODUCTS_LINK, SF_CLOSE_TOOLBAR_LINK,
    SF_TOOLBAR_MAIN_CONTENT_DIV, SHOP_PARAMETERS_PARENT_LINK, SUCCESSFUL_UPDATE_MESSAGE,
    add_product, dashboard, login, payment_preferences, product_settings, products,
};
use prestashop_e2e::pages::fo::{self, home, product, search_results};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const FO_URL: &str = "http://shop.test/";
pub const BO_URL: &str = "http://shop.test/admin-dev/";
pub const EMAIL: &str = "demo@prestashop.com";
pub const PASSWORD: &str = "prestashop_demo";

/// Products shipped with the demo catalog
pub const DEMO_PRODUCTS: usize = 25;
const PAGE_SIZE: usize = 20;

const PAYMENT_MODULES: [&str; 2] = ["ps_wirepayment", "ps_checkpayment"];
const GROUPS: [u32; 3] = [1, 2, 3];
const COUNTRIES: [u32; 3] = [8, 17, 21];

#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    pub name: String,
    pub reference: String,
    pub quantity: i32,
    pub online: bool,
}

struct ShopState {
    allow_ordering_oos: bool,
    label_allowed: String,
    label_denied: String,
    products: Vec<StoredProduct>,
    reference_filter: Option<String>,
    restrictions: BTreeMap<String, bool>,
    storefront_label_override: Option<String>,
}

#[derive(Clone)]
pub struct FakeShop {
    state: Arc<Mutex<ShopState>>,
}

impl Default for FakeShop {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeShop {
    pub fn new() -> Self {
        let mut restrictions = BTreeMap::new();
        for module in PAYMENT_MODULES {
            restrictions.insert(
                payment_preferences::euro_currency_restrictions_checkbox(module),
                true,
            );
            for group in GROUPS {
                restrictions.insert(
                    payment_preferences::group_restrictions_checkbox(module, group),
                    true,
                );
            }
            for country in COUNTRIES {
                restrictions.insert(
                    payment_preferences::country_restrictions_checkbox(module, country),
                    true,
                );
            }
        }

        Self {
            state: Arc::new(Mutex::new(ShopState {
                allow_ordering_oos: false,
                label_allowed: String::new(),
                label_denied: String::new(),
                products: Vec::new(),
                reference_filter: None,
                restrictions,
                storefront_label_override: None,
            })),
        }
    }

    /// A browser whose navigations are served by this shop
    pub fn browser(&self) -> MemoryBrowser {
        let shop = self.clone();
        MemoryBrowser::new().with_router(move |url| shop.route(url))
    }

    pub fn config(&self) -> SuiteConfig {
        SuiteConfig::default()
            .fo_url(FO_URL)
            .bo_url(BO_URL)
            .credentials(EMAIL, PASSWORD)
    }

    pub fn products(&self) -> Vec<StoredProduct> {
        self.state.lock().products.clone()
    }

    pub fn allow_ordering_oos(&self) -> bool {
        self.state.lock().allow_ordering_oos
    }

    /// (allowed, denied) availability labels
    pub fn labels(&self) -> (String, String) {
        let state = self.state.lock();
        (state.label_allowed.clone(), state.label_denied.clone())
    }

    pub fn restriction(&self, checkbox: &str) -> Option<bool> {
        self.state.lock().restrictions.get(checkbox).copied()
    }

    pub fn set_restriction(&self, checkbox: &str, enabled: bool) {
        self.state
            .lock()
            .restrictions
            .insert(checkbox.to_string(), enabled);
    }

    /// Drops a restriction checkbox from the preferences page
    pub fn remove_restriction(&self, checkbox: &str) {
        self.state.lock().restrictions.remove(checkbox);
    }

    /// Makes the storefront show `label` whatever the back office configured
    pub fn override_storefront_label(&self, label: &str) {
        self.state.lock().storefront_label_override = Some(label.to_string());
    }

    fn route(&self, url: &str) -> Option<MemoryDocument> {
        match url {
            BO_URL => Some(self.login_page()),
            FO_URL => Some(self.home_page()),
            _ => None,
        }
    }

    fn navigate(
        &self,
        page: fn(&FakeShop) -> MemoryDocument,
    ) -> impl Fn(&mut MemoryDocument) -> Effect + Send + Sync + 'static {
        let shop = self.clone();
        move |_: &mut MemoryDocument| Effect::Navigate(page(&shop))
    }

    // Back office

    fn bo_page(&self, path: &str, title: &str, active: Option<&str>) -> MemoryDocument {
        let shop = self.clone();
        let mut document =
            MemoryDocument::new(format!("{}{}", BO_URL, path), format!("{} PrestaShop", title))
                .with(CATALOG_PARENT_LINK, Element::text("Catalog"))
                .with(PRODUCTS_LINK, Element::text("Products"))
                .with(SHOP_PARAMETERS_PARENT_LINK, Element::text("Shop Parameters"))
                .with(PRODUCT_SETTINGS_LINK, Element::text("Product Settings"))
                .with(PAYMENT_PARENT_LINK, Element::text("Payment"))
                .with(PREFERENCES_LINK, Element::text("Preferences"))
                .with(HEADER_SHOP_NAME_LINK, Element::text("PrestaShop"))
                .on_click(PRODUCTS_LINK, self.navigate(|shop| shop.products_page(None)))
                .on_click(
                    PRODUCT_SETTINGS_LINK,
                    self.navigate(|shop| shop.product_settings_page(false)),
                )
                .on_click(
                    PREFERENCES_LINK,
                    self.navigate(|shop| shop.payment_preferences_page(false)),
                )
                .on_click(HEADER_SHOP_NAME_LINK, move |_| {
                    Effect::OpenTab(shop.home_page())
                });

        if let Some(link) = active {
            document.insert(bo::active_link(link), Element::text(""));
        }
        document
    }

    fn login_page(&self) -> MemoryDocument {
        let shop = self.clone();
        MemoryDocument::new(BO_URL, login::PAGE_TITLE)
            .with(login::EMAIL_INPUT, Element::input(""))
            .with(login::PASSWORD_INPUT, Element::input(""))
            .with(login::SUBMIT_LOGIN_BUTTON, Element::text("Log in"))
            .on_click(login::SUBMIT_LOGIN_BUTTON, move |doc| {
                let valid = doc.value_of(login::EMAIL_INPUT) == Some(EMAIL)
                    && doc.value_of(login::PASSWORD_INPUT) == Some(PASSWORD);
                if valid {
                    Effect::Navigate(shop.dashboard_page())
                } else {
                    doc.insert(
                        "div.alert.alert-danger",
                        Element::text("The employee does not exist, or the password provided is incorrect."),
                    );
                    Effect::Stay
                }
            })
    }

    fn dashboard_page(&self) -> MemoryDocument {
        self.bo_page("index.php?controller=AdminDashboard", "Dashboard •", None)
            .with(dashboard::ONBOARDING_CLOSE_BUTTON, Element::text("No thanks"))
            .on_click(dashboard::ONBOARDING_CLOSE_BUTTON, |doc| {
                doc.remove(dashboard::ONBOARDING_CLOSE_BUTTON);
                Effect::Stay
            })
    }

    fn products_page(&self, alert: Option<&str>) -> MemoryDocument {
        let (total, filter) = {
            let state = self.state.lock();
            let total = match &state.reference_filter {
                Some(reference) => state
                    .products
                    .iter()
                    .filter(|p| &p.reference == reference)
                    .count(),
                None => DEMO_PRODUCTS + state.products.len(),
            };
            (total, state.reference_filter.clone())
        };

        let search = self.clone();
        let reset = self.clone();
        let delete = self.clone();
        let mut document = self
            .bo_page("sell/catalog/products", "Products •", Some(PRODUCTS_LINK))
            .with(
                SF_TOOLBAR_MAIN_CONTENT_DIV,
                Element::new().attr("style", "display: block;"),
            )
            .with(SF_CLOSE_TOOLBAR_LINK, Element::new())
            .on_click(SF_CLOSE_TOOLBAR_LINK, |doc| {
                if let Some(toolbar) = doc.element_mut(SF_TOOLBAR_MAIN_CONTENT_DIV) {
                    toolbar
                        .attributes
                        .insert("style".to_string(), "display: none;".to_string());
                }
                Effect::Stay
            })
            .with(products::ADD_PRODUCT_BUTTON, Element::text("Add new product"))
            .on_click(
                products::ADD_PRODUCT_BUTTON,
                self.navigate(FakeShop::add_product_page),
            )
            .with(products::PRODUCT_ROW, Element::new().repeated(total.min(PAGE_SIZE)))
            .with(
                products::filter_input("reference"),
                Element::input(filter.clone().unwrap_or_default()),
            )
            .with(products::FILTER_SEARCH_BUTTON, Element::text("Search"))
            .on_click(products::FILTER_SEARCH_BUTTON, move |doc| {
                let reference = doc
                    .value_of(&products::filter_input("reference"))
                    .unwrap_or_default()
                    .to_string();
                search.state.lock().reference_filter =
                    (!reference.is_empty()).then_some(reference);
                Effect::Navigate(search.products_page(None))
            })
            .with(
                products::FILTER_BY_CATEGORIES_BUTTON,
                Element::text("Filter by categories").attr("aria-expanded", "false"),
            )
            .on_click(products::FILTER_BY_CATEGORIES_BUTTON, |doc| {
                if let Some(button) = doc.element_mut(products::FILTER_BY_CATEGORIES_BUTTON) {
                    button
                        .attributes
                        .insert("aria-expanded".to_string(), "true".to_string());
                }
                doc.insert(
                    products::FILTER_BY_CATEGORIES_UNSELECT_BUTTON,
                    Element::text("Unselect"),
                );
                Effect::Stay
            })
            .on_click(
                products::FILTER_BY_CATEGORIES_UNSELECT_BUTTON,
                self.navigate(|shop| shop.products_page(None)),
            );

        if filter.is_some() {
            document = document
                .with(products::FILTER_RESET_BUTTON, Element::text("Reset"))
                .on_click(products::FILTER_RESET_BUTTON, move |_| {
                    reset.state.lock().reference_filter = None;
                    Effect::Navigate(reset.products_page(None))
                });
        }

        if total > PAGE_SIZE {
            document = document
                .with(products::PAGINATION_NEXT_LINK, Element::text("Next"))
                .with(
                    products::PRODUCTS_LIST_FOOTER_LABEL,
                    Element::text(format!(
                        "Viewing 1-{} out of {} products",
                        PAGE_SIZE, total
                    )),
                );
        }

        if total > 0 {
            document = document
                .with(
                    products::dropdown_toggle_button(1),
                    Element::new().attr("aria-expanded", "false"),
                )
                .with(products::dropdown_menu_delete_link(1), Element::text("Delete"))
                .on_click(products::dropdown_toggle_button(1), |doc| {
                    if let Some(toggle) = doc.element_mut(&products::dropdown_toggle_button(1)) {
                        toggle
                            .attributes
                            .insert("aria-expanded".to_string(), "true".to_string());
                    }
                    Effect::Stay
                })
                .on_click(products::dropdown_menu_delete_link(1), |doc| {
                    doc.insert(products::CATALOG_DELETION_MODAL_DIALOG, Element::new());
                    doc.insert(
                        products::MODAL_DIALOG_DELETE_NOW_BUTTON,
                        Element::text("Delete now"),
                    );
                    Effect::Stay
                })
                .on_click(products::MODAL_DIALOG_DELETE_NOW_BUTTON, move |_| {
                    {
                        let mut state = delete.state.lock();
                        match state.reference_filter.clone() {
                            Some(reference) => state.products.retain(|p| p.reference != reference),
                            None => {
                                state.products.pop();
                            }
                        }
                    }
                    Effect::Navigate(
                        delete.products_page(Some(products::PRODUCT_DELETED_SUCCESSFUL_MESSAGE)),
                    )
                });
        }

        if let Some(message) = alert {
            document.insert(ALERT_SUCCESS_BLOCK, Element::text(format!("× {}", message)));
            document.insert(ALERT_SUCCESS_BLOCK_PARAGRAPH, Element::text(message));
        }
        document
    }

    fn add_product_page(&self) -> MemoryDocument {
        let shop = self.clone();
        self.bo_page("sell/catalog/products/new", "Product •", Some(PRODUCTS_LINK))
            .with(add_product::PRODUCT_NAME_INPUT, Element::input(""))
            .with(
                add_product::PRODUCT_TYPE_SELECT,
                Element::select(&["Standard product", "Pack of products", "Virtual product"]),
            )
            .with(
                format!("#{}", add_product::PRODUCT_DESCRIPTION_EDITOR_ID),
                Element::input(""),
            )
            .with(
                format!("#{}", add_product::PRODUCT_SUMMARY_EDITOR_ID),
                Element::input(""),
            )
            .on_evaluate(add_product::SET_EDITOR_CONTENT_SCRIPT, |doc, args| {
                let id = format!("#{}", args["id"].as_str().unwrap_or_default());
                let content = args["content"].as_str().unwrap_or_default();
                match doc.element_mut(&id) {
                    Some(area) => {
                        area.value = content.to_string();
                        serde_json::Value::Bool(true)
                    }
                    None => serde_json::Value::Bool(false),
                }
            })
            .with(add_product::PRODUCT_REFERENCE_INPUT, Element::input(""))
            .with(add_product::PRODUCT_QUANTITY_INPUT, Element::input("0"))
            .with(add_product::PRODUCT_PRICE_TTC_INPUT, Element::input("0"))
            .with(add_product::PRODUCT_ONLINE_SWITCH, Element::new())
            .with(
                add_product::PRODUCT_ONLINE_INPUT,
                Element::checkbox(false).hidden(),
            )
            .on_click(add_product::PRODUCT_ONLINE_SWITCH, |doc| {
                if let Some(input) = doc.element_mut(add_product::PRODUCT_ONLINE_INPUT) {
                    input.checked = !input.checked;
                }
                Effect::Stay
            })
            .with(add_product::SAVE_PRODUCT_BUTTON, Element::new())
            .on_click(add_product::SAVE_PRODUCT_BUTTON, move |doc| {
                let value = |selector: &str| doc.value_of(selector).unwrap_or_default().to_string();
                let stored = StoredProduct {
                    name: value(add_product::PRODUCT_NAME_INPUT),
                    reference: value(add_product::PRODUCT_REFERENCE_INPUT),
                    quantity: value(add_product::PRODUCT_QUANTITY_INPUT)
                        .parse()
                        .unwrap_or(0),
                    online: doc
                        .element(add_product::PRODUCT_ONLINE_INPUT)
                        .is_some_and(|e| e.checked),
                };
                shop.state.lock().products.push(stored);

                doc.insert(
                    GROWL_MESSAGE_BLOCK,
                    Element::text(add_product::SETTING_UPDATED_MESSAGE),
                );
                doc.insert(GROWL_CLOSE_BUTTON, Element::text("×"));
                Effect::Stay
            })
            .on_click(GROWL_CLOSE_BUTTON, |doc| {
                doc.remove(GROWL_MESSAGE_BLOCK);
                doc.remove(GROWL_CLOSE_BUTTON);
                Effect::Stay
            })
    }

    fn product_settings_page(&self, saved: bool) -> MemoryDocument {
        let (allow, allowed, denied) = {
            let state = self.state.lock();
            (
                state.allow_ordering_oos,
                state.label_allowed.clone(),
                state.label_denied.clone(),
            )
        };

        let shop = self.clone();
        let save = product_settings::save_products_stock_form_button();
        let mut document = self
            .bo_page(
                "configure/shop/product-preferences",
                "Product Settings •",
                Some(PRODUCT_SETTINGS_LINK),
            )
            .with(
                product_settings::allow_ordering_oos_toggle(true),
                Element::checkbox(allow).attr("name", "form[stock][allow_ordering_oos]"),
            )
            .with(
                product_settings::allow_ordering_oos_toggle(false),
                Element::checkbox(!allow).attr("name", "form[stock][allow_ordering_oos]"),
            )
            .with(
                product_settings::LABEL_OOS_ALLOWED_BACKORDERS,
                Element::input(allowed),
            )
            .with(
                product_settings::LABEL_OOS_DENIED_BACKORDERS,
                Element::input(denied),
            )
            .with(save.clone(), Element::text("Save"))
            .on_click(save, move |doc| {
                {
                    let mut state = shop.state.lock();
                    state.allow_ordering_oos = doc
                        .element(&product_settings::allow_ordering_oos_toggle(true))
                        .is_some_and(|e| e.checked);
                    state.label_allowed = doc
                        .value_of(product_settings::LABEL_OOS_ALLOWED_BACKORDERS)
                        .unwrap_or_default()
                        .to_string();
                    state.label_denied = doc
                        .value_of(product_settings::LABEL_OOS_DENIED_BACKORDERS)
                        .unwrap_or_default()
                        .to_string();
                }
                Effect::Navigate(shop.product_settings_page(true))
            });

        if saved {
            document.insert(
                ALERT_SUCCESS_BLOCK,
                Element::text(format!("\n  ×\n  {}\n", SUCCESSFUL_UPDATE_MESSAGE)),
            );
        }
        document
    }

    fn payment_preferences_page(&self, saved: bool) -> MemoryDocument {
        let restrictions = self.state.lock().restrictions.clone();

        let mut document = self.bo_page(
            "improve/payment/preferences",
            "Preferences •",
            Some(PREFERENCES_LINK),
        );

        for (checkbox, enabled) in &restrictions {
            let input = checkbox.clone();
            document = document
                .with(checkbox.clone(), Element::checkbox(*enabled).hidden())
                .with(format!("{} + i", checkbox), Element::new())
                .on_click(format!("{} + i", checkbox), move |doc| {
                    if let Some(element) = doc.element_mut(&input) {
                        element.checked = !element.checked;
                    }
                    Effect::Stay
                });
        }

        for save in [
            payment_preferences::CURRENCY_RESTRICTIONS_SAVE_BUTTON,
            payment_preferences::GROUP_RESTRICTIONS_SAVE_BUTTON,
        ] {
            let shop = self.clone();
            let checkboxes: Vec<String> = restrictions.keys().cloned().collect();
            document = document
                .with(save, Element::text("Save"))
                .on_click(save, move |doc| {
                    {
                        let mut state = shop.state.lock();
                        for checkbox in &checkboxes {
                            if let Some(element) = doc.element(checkbox) {
                                state.restrictions.insert(checkbox.clone(), element.checked);
                            }
                        }
                    }
                    Effect::Navigate(shop.payment_preferences_page(true))
                });
        }

        if saved {
            document.insert(
                ALERT_SUCCESS_BLOCK,
                Element::text(format!("× {}", SUCCESSFUL_UPDATE_MESSAGE)),
            );
        }
        document
    }

    // Storefront

    fn fo_page(&self, url: String, title: &str) -> MemoryDocument {
        let shop = self.clone();
        MemoryDocument::new(url, title)
            .with(fo::HEADER_LOGO, Element::new())
            .on_click(fo::HEADER_LOGO, self.navigate(FakeShop::home_page))
            .with(fo::SEARCH_INPUT, Element::input(""))
            .on_press(fo::SEARCH_INPUT, "Enter", move |doc| {
                let query = doc.value_of(fo::SEARCH_INPUT).unwrap_or_default().to_string();
                Effect::Navigate(shop.search_results_page(&query))
            })
    }

    fn home_page(&self) -> MemoryDocument {
        self.fo_page(FO_URL.to_string(), "PrestaShop")
            .with(home::HOME_PAGE_SECTION, Element::new())
    }

    fn search_results_page(&self, query: &str) -> MemoryDocument {
        let needle = query.to_lowercase();
        let found: Vec<StoredProduct> = self
            .state
            .lock()
            .products
            .iter()
            .filter(|p| p.online && p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let mut document = self.fo_page(
            format!("{}search?s={}", FO_URL, query),
            search_results::PAGE_TITLE,
        );
        for (index, found) in found.into_iter().enumerate() {
            let shop = self.clone();
            document = document
                .with(search_results::product_article(index + 1), Element::new())
                .with(search_results::product_img(index + 1), Element::new())
                .on_click(search_results::product_img(index + 1), move |_| {
                    Effect::Navigate(shop.product_page(&found))
                });
        }
        document
    }

    fn product_page(&self, stored: &StoredProduct) -> MemoryDocument {
        let (enabled, label) = {
            let state = self.state.lock();
            let (enabled, label) = if stored.quantity > 0 {
                (true, "In stock".to_string())
            } else if state.allow_ordering_oos {
                (true, state.label_allowed.clone())
            } else {
                (false, state.label_denied.clone())
            };
            (
                enabled,
                state.storefront_label_override.clone().unwrap_or(label),
            )
        };

        let button = Element::text("Add to cart");
        let button = if enabled { button } else { button.disabled() };
        self.fo_page(
            format!("{}{}.html", FO_URL, stored.reference),
            &stored.name,
        )
        .with(product::PRODUCT_NAME, Element::text(stored.name.clone()))
        .with(
            product::PRODUCT_AVAILABILITY,
            Element::text(format!("\n      {}\n    ", label)),
        )
        .with(product::ADD_TO_CART_BUTTON, button)
    }
}
