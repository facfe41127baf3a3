//! Demo walkthrough: a handful of products, the stock/price operations, and
//! the per-category display behavior. Product output goes to stdout;
//! operational logs go to tracing (stderr).

use chrono::Utc;

use stockroom_catalog::{
    ApplyDiscount, Category, CreateProduct, Product, ProductCommand, ProductEvent, ProductId,
    Restock, SaleRejection, Sell,
};
use stockroom_core::{Aggregate, AggregateId, DomainResult, Money};
use stockroom_events::{Command, Event};

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    // The original walkthrough: a TV, discounted then restocked.
    let mut tv = create_product(
        "TV",
        "42-inch television",
        Money::from_major(5500),
        10,
        Category::Electronics,
    )?;
    println!("{tv}\n");

    let tv_id = tv.id_typed();
    dispatch(
        &mut tv,
        ProductCommand::ApplyDiscount(ApplyDiscount {
            product_id: tv_id,
            fraction: 0.3,
            occurred_at: Utc::now(),
        }),
    )?;
    dispatch(
        &mut tv,
        ProductCommand::Restock(Restock {
            product_id: tv_id,
            quantity: 20,
            occurred_at: Utc::now(),
        }),
    )?;
    println!("{tv}\n");

    // Each category renders its own extra lines.
    let jeans = create_product(
        "Jeans",
        "Slim-fit denim",
        Money::from_major(45),
        25,
        Category::Clothing {
            size: "M".to_string(),
        },
    )?;
    let mut game = create_product(
        "Super Plumber",
        "Side-scrolling adventure",
        Money::from_major(60),
        3,
        Category::VideoGame {
            platform: "Switch".to_string(),
            genre: "platformer".to_string(),
        },
    )?;
    let mut soap = create_product(
        "Bar Soap",
        "Unscented, two-pack",
        Money::from_major(4),
        0,
        Category::Hygiene,
    )?;
    for product in [&jeans, &game, &soap] {
        println!("{product}\n");
    }

    // Three-way sale outcome: completed, insufficient stock, out of stock.
    let game_id = game.id_typed();
    let soap_id = soap.id_typed();
    dispatch(&mut game, sell(game_id, 2))?;
    dispatch(&mut game, sell(game_id, 5))?;
    dispatch(&mut soap, sell(soap_id, 1))?;

    // The discount ceiling is a hard failure, unlike a rejected sale.
    let result = dispatch(
        &mut tv,
        ProductCommand::ApplyDiscount(ApplyDiscount {
            product_id: tv_id,
            fraction: 0.6,
            occurred_at: Utc::now(),
        }),
    );
    if let Err(err) = result {
        tracing::warn!(%err, "discount refused");
    }

    Ok(())
}

fn create_product(
    name: &str,
    description: &str,
    price: Money,
    stock: u64,
    category: Category,
) -> DomainResult<Product> {
    let product_id = ProductId::new(AggregateId::new());
    let mut product = Product::empty(product_id);
    let events = product.handle(&ProductCommand::CreateProduct(CreateProduct {
        product_id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        stock,
        category,
        occurred_at: Utc::now(),
    }))?;
    for event in &events {
        product.apply(event);
        tracing::info!(product = name, event = event.event_type(), "event applied");
    }
    Ok(product)
}

fn sell(product_id: ProductId, quantity: u64) -> ProductCommand {
    ProductCommand::Sell(Sell {
        product_id,
        quantity,
        occurred_at: Utc::now(),
    })
}

/// Run a command against a product: decide, apply, report.
fn dispatch(product: &mut Product, command: ProductCommand) -> DomainResult<()> {
    tracing::debug!(aggregate = %command.target_aggregate_id(), "dispatching command");
    let events = product.handle(&command)?;
    for event in &events {
        product.apply(event);
        tracing::info!(event = event.event_type(), "event applied");
        report(event);
    }
    Ok(())
}

/// Console rendering for each observable outcome.
fn report(event: &ProductEvent) {
    match event {
        ProductEvent::ProductCreated(e) => {
            println!("Added to catalog: {}.", e.name);
        }
        ProductEvent::StockRestocked(e) => {
            println!("Stock updated to {} units.", e.new_stock);
        }
        ProductEvent::SaleCompleted(e) => {
            println!("Sale completed! New stock: {}", e.new_stock);
        }
        ProductEvent::SaleRejected(e) => match e.reason {
            SaleRejection::OutOfStock => {
                println!("No stock available.");
            }
            SaleRejection::InsufficientStock { available } => {
                println!(
                    "Insufficient stock for the sale ({} requested). Current stock: {}",
                    e.requested, available
                );
            }
        },
        ProductEvent::DiscountApplied(e) => {
            println!("New price: {}", e.new_price);
        }
    }
}
