// FO search results page

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::fo::FoBasePage;
use std::sync::Arc;
use std::time::Duration;

pub const PAGE_TITLE: &str = "Search";

/// Product card `n` (1-based) of the result grid
pub fn product_article(n: usize) -> String {
    format!("#js-product-list .products div:nth-child({}) article", n)
}

/// Cover image of product card `n`, which links to the product page
pub fn product_img(n: usize) -> String {
    format!("{} img", product_article(n))
}

#[derive(Clone)]
pub struct SearchResultsPage {
    fo: FoBasePage,
}

impl SearchResultsPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            fo: FoBasePage::new(driver),
        }
    }

    pub fn fo(&self) -> &FoBasePage {
        &self.fo
    }

    /// Opens the product page of result `n`.
    pub async fn go_to_product_page(&self, n: usize) -> Result<()> {
        let base = self.fo.base();
        base.wait_for_visible_selector(&product_img(n)).await?;
        base.driver()
            .click_and_wait_for_navigation(&product_img(n))
            .await
    }

    pub async fn has_results(&self) -> Result<bool> {
        self.fo
            .base()
            .element_visible(&product_article(1), Duration::from_millis(2000))
            .await
    }
}
