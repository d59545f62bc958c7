// Page objects
//
// One value per application screen, each composed over the `PageDriver` of
// the tab it was built for. Page objects hold no state besides that driver,
// so when the current tab changes the whole set is rebuilt with
// [`Pages::new`].

use crate::driver::PageDriver;
use std::sync::Arc;

pub mod base;
pub mod bo;
pub mod fo;

pub use base::{BasePage, normalize_text};
pub use bo::BoBasePage;
pub use bo::add_product::AddProductPage;
pub use bo::dashboard::DashboardPage;
pub use bo::login::LoginPage;
pub use bo::payment_preferences::PaymentPreferencesPage;
pub use bo::product_settings::ProductSettingsPage;
pub use bo::products::ProductsPage;
pub use fo::FoBasePage;
pub use fo::home::HomePage;
pub use fo::product::ProductPage;
pub use fo::search_results::SearchResultsPage;

/// Every page object, built on the same tab.
#[derive(Clone)]
pub struct Pages {
    pub login: LoginPage,
    pub dashboard: DashboardPage,
    pub product_settings: ProductSettingsPage,
    pub products: ProductsPage,
    pub add_product: AddProductPage,
    pub payment_preferences: PaymentPreferencesPage,
    pub home: HomePage,
    pub search_results: SearchResultsPage,
    pub product: ProductPage,
}

impl Pages {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            login: LoginPage::new(Arc::clone(&driver)),
            dashboard: DashboardPage::new(Arc::clone(&driver)),
            product_settings: ProductSettingsPage::new(Arc::clone(&driver)),
            products: ProductsPage::new(Arc::clone(&driver)),
            add_product: AddProductPage::new(Arc::clone(&driver)),
            payment_preferences: PaymentPreferencesPage::new(Arc::clone(&driver)),
            home: HomePage::new(Arc::clone(&driver)),
            search_results: SearchResultsPage::new(Arc::clone(&driver)),
            product: ProductPage::new(driver),
        }
    }
}
