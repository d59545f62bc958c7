//! prestashop-e2e: Page objects and end-to-end campaigns for PrestaShop
//!
//! This crate drives the PrestaShop back office (BO) and storefront (FO)
//! through page objects, and composes them into campaigns: ordered scenarios
//! of steps with assertions, teardown and a JSON report.
//!
//! # Examples
//!
//! ## Running a campaign against a live shop
//!
//! ```ignore
//! use prestashop_e2e::driver::playwright::PlaywrightBrowser;
//! use prestashop_e2e::{FailurePolicy, SuiteConfig, campaigns};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SuiteConfig::from_env()?;
//!     let browser = PlaywrightBrowser::launch(&config).await?;
//!
//!     let campaign = campaigns::find("label-out-of-stock").ok_or("unknown campaign")?;
//!     let context = browser.new_context().await?;
//!     let report = campaign
//!         .run(Arc::new(context), &config, FailurePolicy::SkipRemaining)
//!         .await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     browser.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Using page objects directly
//!
//! ```ignore
//! use prestashop_e2e::pages::Pages;
//! use prestashop_e2e::pages::bo::{CATALOG_PARENT_LINK, PRODUCTS_LINK};
//!
//! let pages = Pages::new(driver);
//! pages.login.login("demo@prestashop.com", "prestashop_demo").await?;
//! pages.dashboard.bo().go_to_sub_menu(CATALOG_PARENT_LINK, PRODUCTS_LINK).await?;
//! let count = pages.products.get_number_of_products_from_list().await?;
//! ```
//!
//! # Drivers
//!
//! Page objects only see the [`driver::PageDriver`] trait. The
//! [`driver::playwright`] implementation drives a real browser; the
//! [`driver::memory`] implementation runs against scripted in-memory pages and
//! is what the test suite uses.

pub mod campaigns;
pub mod config;
pub mod data;
pub mod driver;
mod error;
pub mod pages;
pub mod scenario;
pub mod session;

// Re-export error types
pub use error::{Error, Result};

// Re-export configuration
pub use config::{BrowserKind, SuiteConfig};

// Re-export driver seams
pub use driver::{BrowserTabs, PageDriver, WaitState};

// Re-export scenario API
pub use scenario::{
    FailureKind, FailurePolicy, Scenario, ScenarioReport, Step, StepOutcome, expect_value,
};

// Re-export session
pub use session::{ShopContext, ShopSession};

// Re-export data factory
pub use data::{ProductData, ProductOverrides, ProductType};
