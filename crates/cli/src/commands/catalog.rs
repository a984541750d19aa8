//! Catalog and serviceability commands.

use partsgrid_client::services::pincodes::PincodeService;
use partsgrid_client::services::products::{ProductListQuery, ProductsService};

use super::{CliContext, CliError};

/// List catalog entries.
pub async fn list(
    ctx: &CliContext,
    category: Option<String>,
    brand: Option<String>,
) -> Result<(), CliError> {
    let query = ProductListQuery {
        category,
        brand,
        ..Default::default()
    };
    let products = ProductsService::new(&ctx.client).list(&query).await?;
    print_products(&products.items);
    println!(
        "page {}/{} ({} total)",
        products.pagination.page, products.pagination.total_pages, products.pagination.total
    );
    Ok(())
}

/// Free-text catalog search.
pub async fn search(ctx: &CliContext, query: &str) -> Result<(), CliError> {
    let products = ProductsService::new(&ctx.client).search(query).await?;
    print_products(&products.items);
    Ok(())
}

/// Check a pincode.
pub async fn serviceability(ctx: &CliContext, pincode: &str) -> Result<(), CliError> {
    let service = PincodeService::new(ctx.client.clone());
    let answer = service.check(pincode).await?;
    if answer.serviceable {
        let eta = answer
            .eta_days
            .map_or_else(String::new, |d| format!(", ~{d} day delivery"));
        println!(
            "{} is serviceable ({} dealers{eta})",
            answer.pincode, answer.dealer_count
        );
    } else {
        println!("{} is not serviceable", answer.pincode);
    }
    Ok(())
}

fn print_products(products: &[partsgrid_client::models::Product]) {
    for product in products {
        let stock = if product.in_stock { "" } else { "  [out of stock]" };
        println!(
            "{}  {}  {} / {}  {}{stock}",
            product.sku,
            product.name,
            product.brand,
            product.category,
            product.price.display()
        );
    }
}
