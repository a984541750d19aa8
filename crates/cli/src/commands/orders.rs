//! Order commands.

use partsgrid_core::{OrderId, OrderStatus};
use partsgrid_client::services::orders::{OrderListQuery, OrdersService};

use super::{CliContext, CliError};

/// List orders, optionally filtered by status.
pub async fn list(ctx: &CliContext, status: Option<&str>, page: Option<u32>) -> Result<(), CliError> {
    let status = status
        .map(parse_status)
        .transpose()?;

    let query = OrderListQuery {
        page,
        status,
        ..Default::default()
    };
    let orders = OrdersService::new(&ctx.client).list(&query).await?;

    for order in &orders.items {
        println!(
            "{}  {:?}  {}  {}",
            order.id,
            order.status,
            order.placed_at.date_naive(),
            order.total.display()
        );
    }
    println!(
        "page {}/{} ({} total)",
        orders.pagination.page, orders.pagination.total_pages, orders.pagination.total
    );
    Ok(())
}

/// Show one order with its lines.
pub async fn get(ctx: &CliContext, id: i64) -> Result<(), CliError> {
    let order = OrdersService::new(&ctx.client)
        .get(OrderId::new(id))
        .await?;

    println!("Order {}  {:?}  {}", order.id, order.status, order.placed_at);
    for item in &order.items {
        println!(
            "  {} x{}  {}  ({})",
            item.name,
            item.quantity,
            item.unit_price.times(item.quantity).display(),
            item.product_id
        );
    }
    println!("Total: {}", order.total.display());
    Ok(())
}

/// Cancel an order.
pub async fn cancel(ctx: &CliContext, id: i64) -> Result<(), CliError> {
    let order = OrdersService::new(&ctx.client)
        .cancel(OrderId::new(id))
        .await?;
    println!("Order {} is now {:?}", order.id, order.status);
    Ok(())
}

fn parse_status(raw: &str) -> Result<OrderStatus, CliError> {
    serde_json::from_value(serde_json::Value::String(raw.to_uppercase()))
        .map_err(|_| CliError::InvalidArgument(format!("unknown order status: {raw}")))
}
