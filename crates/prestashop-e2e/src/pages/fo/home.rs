// FO home page

use crate::driver::PageDriver;
use crate::error::Result;
use crate::pages::fo::FoBasePage;
use std::sync::Arc;
use std::time::Duration;

pub const HOME_PAGE_SECTION: &str = "section#content.page-home";

#[derive(Clone)]
pub struct HomePage {
    fo: FoBasePage,
}

impl HomePage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            fo: FoBasePage::new(driver),
        }
    }

    pub fn fo(&self) -> &FoBasePage {
        &self.fo
    }

    pub async fn is_home_page(&self) -> Result<bool> {
        self.fo
            .base()
            .element_visible(HOME_PAGE_SECTION, Duration::from_millis(3000))
            .await
    }

    pub async fn go_to_home_page(&self) -> Result<()> {
        self.fo.go_to_home_page().await
    }

    pub async fn search_product(&self, name: &str) -> Result<()> {
        self.fo.search_product(name).await
    }
}
