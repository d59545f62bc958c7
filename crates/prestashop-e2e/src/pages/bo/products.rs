// BO Catalog > Products page

use crate::data::ProductData;
use crate::driver::PageDriver;
use crate::error::{Error, Result};
use crate::pages::bo::BoBasePage;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

pub const PAGE_TITLE: &str = "Products •";
pub const PRODUCT_DELETED_SUCCESSFUL_MESSAGE: &str = "Product successfully deleted.";

pub const ADD_PRODUCT_BUTTON: &str = "#page-header-desc-configuration-add";

// Product list
pub const PRODUCT_LIST_FORM: &str = "#product_catalog_list";
pub const PRODUCT_TABLE: &str = "#product_catalog_list table";
pub const PRODUCT_ROW: &str = "#product_catalog_list table tbody tr";
pub const PAGINATION_NEXT_LINK: &str = "#pagination_next_url";
pub const PRODUCTS_LIST_FOOTER_LABEL: &str = "#product_catalog_list .pagination-block label";

// Filters
pub const FILTER_SEARCH_BUTTON: &str = "#product_catalog_list button[name='products_filter_submit']";
pub const FILTER_RESET_BUTTON: &str = "#product_catalog_list button[name='products_filter_reset']";
pub const FILTER_BY_CATEGORIES_BUTTON: &str = "#product_catalog_category_tree_filter button";
pub const FILTER_BY_CATEGORIES_UNSELECT_BUTTON: &str =
    "#tree-categories a#product_catalog_category_tree_filter_reset";

// Delete confirmation modal
pub const CATALOG_DELETION_MODAL_DIALOG: &str =
    "div.modal.show #catalog_deletion_modal div.modal-dialog";
pub const MODAL_DIALOG_DELETE_NOW_BUTTON: &str =
    "div.modal.show #catalog_deletion_modal div.modal-dialog button[value='confirm']";

/// Row `row` (1-based) of the product list
pub fn product_row(row: usize) -> String {
    format!("{}:nth-of-type({})", PRODUCT_ROW, row)
}

pub fn dropdown_toggle_button(row: usize) -> String {
    format!("{} button.dropdown-toggle", product_row(row))
}

pub fn dropdown_menu(row: usize) -> String {
    format!("{} div.dropdown-menu", product_row(row))
}

pub fn dropdown_menu_delete_link(row: usize) -> String {
    format!("{} a.product-edit[onclick*='delete']", dropdown_menu(row))
}

/// Free-text filter input of a list column
pub fn filter_input(column: &str) -> String {
    format!("{} input[name='filter_column_{}']", PRODUCT_LIST_FORM, column)
}

/// Drop-down filter of a list column
pub fn filter_select(column: &str) -> String {
    format!("{} select[name='filter_column_{}']", PRODUCT_LIST_FORM, column)
}

/// How a list column is filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Input,
    Select,
}

#[derive(Clone)]
pub struct ProductsPage {
    bo: BoBasePage,
}

impl ProductsPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            bo: BoBasePage::new(driver),
        }
    }

    pub fn bo(&self) -> &BoBasePage {
        &self.bo
    }

    pub async fn go_to_add_product_page(&self) -> Result<()> {
        self.bo
            .base()
            .driver()
            .click_and_wait_for_navigation(ADD_PRODUCT_BUTTON)
            .await
    }

    /// Filters the list on `column` and submits the filter form.
    pub async fn filter_products(
        &self,
        column: &str,
        value: &str,
        filter_type: FilterType,
    ) -> Result<()> {
        let base = self.bo.base();
        match filter_type {
            FilterType::Input => base.set_value(&filter_input(column), value).await?,
            FilterType::Select => {
                base.driver()
                    .select_by_label(&filter_select(column), value)
                    .await?
            }
        }
        base.driver()
            .click_and_wait_for_navigation(FILTER_SEARCH_BUTTON)
            .await
    }

    /// Filters the list down to `product` by reference, deletes the only row
    /// left and returns the confirmation message.
    pub async fn delete_product(&self, product: &ProductData) -> Result<String> {
        tracing::debug!("Deleting product {} ({})", product.name, product.reference);
        self.filter_products("reference", &product.reference, FilterType::Input)
            .await?;

        let base = self.bo.base();
        let driver = base.driver();
        driver.click(&dropdown_toggle_button(1)).await?;
        base.wait_for_visible_selector(&format!(
            "{}[aria-expanded='true']",
            dropdown_toggle_button(1)
        ))
        .await?;

        driver.click(&dropdown_menu_delete_link(1)).await?;
        base.wait_for_visible_selector(CATALOG_DELETION_MODAL_DIALOG)
            .await?;

        driver
            .click_and_wait_for_navigation(MODAL_DIALOG_DELETE_NOW_BUTTON)
            .await?;
        self.bo.get_alert_success_block_paragraph_content().await
    }

    /// Clears the category tree filter.
    pub async fn reset_filter_category(&self) -> Result<()> {
        let base = self.bo.base();
        let driver = base.driver();
        driver.click(FILTER_BY_CATEGORIES_BUTTON).await?;
        base.wait_for_visible_selector(&format!(
            "{}[aria-expanded='true']",
            FILTER_BY_CATEGORIES_BUTTON
        ))
        .await?;
        driver
            .click_and_wait_for_navigation(FILTER_BY_CATEGORIES_UNSELECT_BUTTON)
            .await
    }

    /// Clears the column filters if any is set.
    pub async fn reset_filter(&self) -> Result<()> {
        let base = self.bo.base();
        if base
            .element_visible(FILTER_RESET_BUTTON, Duration::from_millis(2000))
            .await?
        {
            base.driver()
                .click_and_wait_for_navigation(FILTER_RESET_BUTTON)
                .await?;
        }
        Ok(())
    }

    /// Number of products in the list, across every page.
    ///
    /// A single page is counted row by row; otherwise the total is read from
    /// the "out of N" pagination footer.
    pub async fn get_number_of_products_from_list(&self) -> Result<usize> {
        let base = self.bo.base();
        if !base
            .element_visible(PAGINATION_NEXT_LINK, Duration::from_millis(1000))
            .await?
        {
            return base.driver().count(PRODUCT_ROW).await;
        }

        let footer = base
            .get_text_content(PRODUCTS_LIST_FOOTER_LABEL, true)
            .await?;
        parse_products_total(&footer)
    }

    pub async fn reset_and_get_number_of_lines(&self) -> Result<usize> {
        self.reset_filter().await?;
        self.get_number_of_products_from_list().await
    }
}

static PRODUCTS_TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"out of (\d+)").expect("products total pattern is valid"));

fn parse_products_total(footer: &str) -> Result<usize> {
    PRODUCTS_TOTAL
        .captures(footer)
        .and_then(|caps| caps.get(1))
        .and_then(|total| total.as_str().parse().ok())
        .ok_or_else(|| {
            Error::InvalidArgument(format!("no product total in list footer '{}'", footer))
        })
}
