//! Minimal storefront loop: fetch the catalog, fill a cart, submit.
//!
//! ```sh
//! GSTBILL_URL=http://localhost:5000 GSTBILL_TOKEN=... \
//!     cargo run -p customer-session --example storefront
//! ```

use customer_session::CustomerSession;
use gstbill_client::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    customer_session::logging::init_logger();

    let base_url =
        std::env::var("GSTBILL_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let mut config = ClientConfig::new(base_url);
    if let Ok(token) = std::env::var("GSTBILL_TOKEN") {
        config = config.with_token(token);
    }

    let session = CustomerSession::new(config.build_http_client());
    session.refresh_catalog(false).await?;
    session.spawn_refresh_task();

    println!("catalog:");
    for product in session.products() {
        println!(
            "  #{:<4} {:<30} {:>8.2}  ({} in stock)",
            product.id, product.name, product.price, product.stock_quantity
        );
    }

    if let Some(first) = session.products().into_iter().find(|p| p.in_stock()) {
        session.add_to_cart(first.id)?;
        session.set_notes("placed from the storefront example");
        let receipt = session.submit_order().await?;
        println!(
            "order accepted: {}",
            receipt.order_number.as_deref().unwrap_or("(no number)")
        );
    } else {
        println!("nothing in stock to order");
    }

    Ok(())
}
