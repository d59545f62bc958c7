// Label of out-of-stock products with allowed/denied backorders
//
// Creates an out-of-stock product, then for each combination of the
// allow-ordering toggle and availability label checks what the storefront
// shows on the product page, and finally deletes the product.

use crate::campaigns::close_browser_context;
use crate::campaigns::login::login_bo_steps;
use crate::data::{ProductData, ProductOverrides, ProductType};
use crate::pages::bo::{
    CATALOG_PARENT_LINK, PRODUCT_SETTINGS_LINK, PRODUCTS_LINK,
    SHOP_PARAMETERS_PARENT_LINK, SUCCESSFUL_UPDATE_MESSAGE, add_product, product_settings,
    products,
};
use crate::scenario::{Scenario, Step, expect_value};
use crate::session::ShopContext;

pub const BASE_CONTEXT: &str =
    "functional_BO_shopParameters_productSettings_productsStock_labelOutOfStock";

/// One pass over the product page with a given stock configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCase {
    /// Allow ordering out-of-stock products
    pub enable: bool,
    /// Label typed in the back office
    pub label: &'static str,
    /// Text the storefront availability label must contain
    pub label_to_check: &'static str,
}

impl LabelCase {
    fn action(&self) -> &'static str {
        if self.enable { "enable" } else { "disable" }
    }

    fn backorders_action(&self) -> &'static str {
        if self.enable { "allowed" } else { "denied" }
    }
}

/// The four toggle/label combinations checked by the campaign
pub fn label_cases() -> Vec<LabelCase> {
    vec![
        LabelCase {
            enable: true,
            label: "You can order",
            label_to_check: "You can order",
        },
        LabelCase {
            enable: true,
            label: " ",
            label_to_check: "",
        },
        LabelCase {
            enable: false,
            label: " ",
            label_to_check: "",
        },
        LabelCase {
            enable: false,
            label: "Out-of-Stock",
            label_to_check: "Out-of-Stock",
        },
    ]
}

/// Builds the campaign for a freshly generated out-of-stock product.
pub fn scenario() -> Scenario<ShopContext> {
    let product = ProductData::new(ProductOverrides {
        product_type: Some(ProductType::Standard),
        quantity: Some(0),
        ..Default::default()
    });
    scenario_for(product)
}

/// Builds the campaign for `product`, which must have no stock.
pub fn scenario_for(product: ProductData) -> Scenario<ShopContext> {
    let mut scenario = Scenario::new(
        "Set label out-of-stock with allowed/denied backorders",
        BASE_CONTEXT,
    );
    scenario.extend(login_bo_steps());

    scenario.push(Step::new(
        "goToProductsPage",
        "should go to 'Catalog > Products' page",
        |ctx: &mut ShopContext| {
            Box::pin(async move {
                let pages = ctx.pages();
                pages
                    .dashboard
                    .bo()
                    .go_to_sub_menu(CATALOG_PARENT_LINK, PRODUCTS_LINK)
                    .await?;
                pages.products.bo().close_sf_toolbar().await?;

                let title = pages.products.bo().get_page_title().await?;
                expect_value(title).to_contain(products::PAGE_TITLE)
            })
        },
    ));

    let created = product.clone();
    scenario.push(Step::new(
        "createProduct",
        "should go to create product page and create a product",
        move |ctx: &mut ShopContext| {
            Box::pin(async move {
                let pages = ctx.pages();
                pages.products.go_to_add_product_page().await?;
                let message = pages.add_product.create_edit_basic_product(&created).await?;
                expect_value(message).to_equal(add_product::SETTING_UPDATED_MESSAGE)
            })
        },
    ));

    scenario.push(Step::new(
        "goToProductSettingsPage",
        "should go to 'Shop parameters > Product Settings' page",
        |ctx: &mut ShopContext| {
            Box::pin(async move {
                let pages = ctx.pages();
                pages
                    .add_product
                    .bo()
                    .go_to_sub_menu(SHOP_PARAMETERS_PARENT_LINK, PRODUCT_SETTINGS_LINK)
                    .await?;

                let title = pages.product_settings.bo().get_page_title().await?;
                expect_value(title).to_contain(product_settings::PAGE_TITLE)
            })
        },
    ));

    for (index, case) in label_cases().into_iter().enumerate() {
        scenario.extend(label_case_steps(index, case, &product));
    }

    scenario.push(Step::new(
        "goToProductsPageToDeleteProduct",
        "should go to 'Catalog > Products' page",
        |ctx: &mut ShopContext| {
            Box::pin(async move {
                let pages = ctx.pages();
                pages
                    .product_settings
                    .bo()
                    .go_to_sub_menu(CATALOG_PARENT_LINK, PRODUCTS_LINK)
                    .await?;

                let title = pages.products.bo().get_page_title().await?;
                expect_value(title).to_contain(products::PAGE_TITLE)
            })
        },
    ));

    scenario.push(Step::new(
        "deleteProduct",
        "should delete product",
        move |ctx: &mut ShopContext| {
            Box::pin(async move {
                let message = ctx.pages().products.delete_product(&product).await?;
                expect_value(message).to_equal(products::PRODUCT_DELETED_SUCCESSFUL_MESSAGE)
            })
        },
    ));

    scenario.push(Step::new(
        "resetAllFilters",
        "should reset all filters",
        |ctx: &mut ShopContext| {
            Box::pin(async move {
                let pages = ctx.pages();
                pages.products.reset_filter_category().await?;
                let count = pages.products.reset_and_get_number_of_lines().await?;
                expect_value(count).to_be_above(0usize)
            })
        },
    ));

    scenario.teardown(close_browser_context())
}

fn label_case_steps(index: usize, case: LabelCase, product: &ProductData) -> Vec<Step<ShopContext>> {
    let toggle = case.clone();
    let label = case.clone();
    let check = case.clone();
    let product_name = product.name.clone();

    vec![
        Step::new(
            format!("{}AllowOrderingOutOfStock", case.action()),
            format!("should {} allow ordering of out-of-stock products", case.action()),
            move |ctx: &mut ShopContext| {
                Box::pin(async move {
                    let message = ctx
                        .pages()
                        .product_settings
                        .set_allow_ordering_out_of_stock_status(toggle.enable)
                        .await?;
                    expect_value(message).to_contain(SUCCESSFUL_UPDATE_MESSAGE)
                })
            },
        ),
        Step::new(
            format!("setLabelOutOfStock{}", index),
            format!(
                "should set Label of out-of-stock products with {} backorders",
                case.backorders_action()
            ),
            move |ctx: &mut ShopContext| {
                Box::pin(async move {
                    let settings = &ctx.pages().product_settings;
                    let message = if label.enable {
                        settings.set_label_oos_allowed_backorders(label.label).await?
                    } else {
                        settings.set_label_oos_denied_backorders(label.label).await?
                    };
                    expect_value(message).to_contain(SUCCESSFUL_UPDATE_MESSAGE)
                })
            },
        ),
        Step::new(
            format!("checkOrderingOutOfStock{}", case.action()),
            "should check label out-of-stock",
            move |ctx: &mut ShopContext| {
                Box::pin(async move {
                    let shop = ctx.pages().product_settings.bo().view_my_shop().await?;
                    ctx.session.switch_to(shop);

                    let pages = ctx.pages();
                    pages.home.search_product(&product_name).await?;
                    pages.search_results.go_to_product_page(1).await?;

                    let enabled = pages.product.is_add_to_cart_button_enabled().await?;
                    expect_value(enabled).to_equal(check.enable)?;

                    let availability = pages.product.get_product_availability_label().await?;
                    expect_value(availability).to_contain(check.label_to_check)
                })
            },
        ),
        Step::new(
            format!("goBackToBo{}", index),
            "should go back to BO",
            |ctx: &mut ShopContext| {
                Box::pin(async move {
                    let back = ctx
                        .pages()
                        .product
                        .fo()
                        .base()
                        .close_page(ctx.session.tabs(), 0)
                        .await?;
                    ctx.session.switch_to(back);

                    let title = ctx.pages().product_settings.bo().get_page_title().await?;
                    expect_value(title).to_contain(product_settings::PAGE_TITLE)
                })
            },
        ),
    ]
}
