use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Money};
use stockroom_events::{Command, Event};

use crate::category::Category;

/// Maximum fraction a single discount application may take off the price.
pub const MAX_DISCOUNT: f64 = 0.5;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    stock: u64,
    category: Category,
    version: u64,
    created: bool,
}

impl Product {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            price: Money::ZERO,
            stock: 0,
            category: Category::Electronics,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Human-readable description of the product.
    ///
    /// Every category shares the base lines; variants with extra fields
    /// (clothing size, video-game platform/genre) append their own.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "Product: {}.\nDescription: {}.\nPrice: {}\nStock: {} units.",
            self.name, self.description, self.price, self.stock
        );
        self.category.describe_into(&mut out);
        out
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock: u64,
    pub category: Category,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Restock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restock {
    pub product_id: ProductId,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sell {
    pub product_id: ProductId,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ApplyDiscount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyDiscount {
    pub product_id: ProductId,
    pub fraction: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductCommand {
    CreateProduct(CreateProduct),
    Restock(Restock),
    Sell(Sell),
    ApplyDiscount(ApplyDiscount),
}

impl Command for ProductCommand {
    fn target_aggregate_id(&self) -> AggregateId {
        match self {
            ProductCommand::CreateProduct(cmd) => cmd.product_id.0,
            ProductCommand::Restock(cmd) => cmd.product_id.0,
            ProductCommand::Sell(cmd) => cmd.product_id.0,
            ProductCommand::ApplyDiscount(cmd) => cmd.product_id.0,
        }
    }
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock: u64,
    pub category: Category,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockRestocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRestocked {
    pub product_id: ProductId,
    pub quantity: u64,
    pub new_stock: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SaleCompleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleCompleted {
    pub product_id: ProductId,
    pub quantity: u64,
    pub new_stock: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Why a sale was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleRejection {
    OutOfStock,
    InsufficientStock { available: u64 },
}

/// Event: SaleRejected.
///
/// A turned-down sale is a normal, recoverable outcome (not a domain error);
/// stock is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRejected {
    pub product_id: ProductId,
    pub requested: u64,
    pub reason: SaleRejection,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DiscountApplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountApplied {
    pub product_id: ProductId,
    pub fraction: f64,
    pub new_price: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    StockRestocked(StockRestocked),
    SaleCompleted(SaleCompleted),
    SaleRejected(SaleRejected),
    DiscountApplied(DiscountApplied),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "catalog.product.created",
            ProductEvent::StockRestocked(_) => "catalog.product.stock_restocked",
            ProductEvent::SaleCompleted(_) => "catalog.product.sale_completed",
            ProductEvent::SaleRejected(_) => "catalog.product.sale_rejected",
            ProductEvent::DiscountApplied(_) => "catalog.product.discount_applied",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::StockRestocked(e) => e.occurred_at,
            ProductEvent::SaleCompleted(e) => e.occurred_at,
            ProductEvent::SaleRejected(e) => e.occurred_at,
            ProductEvent::DiscountApplied(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductCreated(e) => {
                self.id = e.product_id;
                self.name = e.name.clone();
                self.description = e.description.clone();
                self.price = e.price;
                self.stock = e.stock;
                self.category = e.category.clone();
                self.created = true;
            }
            ProductEvent::StockRestocked(e) => {
                self.stock += e.quantity;
            }
            ProductEvent::SaleCompleted(e) => {
                self.stock -= e.quantity;
            }
            ProductEvent::SaleRejected(_) => {
                // A recorded fact with no state change.
            }
            ProductEvent::DiscountApplied(e) => {
                self.price = e.new_price;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::CreateProduct(cmd) => self.handle_create(cmd),
            ProductCommand::Restock(cmd) => self.handle_restock(cmd),
            ProductCommand::Sell(cmd) => self.handle_sell(cmd),
            ProductCommand::ApplyDiscount(cmd) => self.handle_apply_discount(cmd),
        }
    }
}

impl Product {
    fn ensure_created(&self) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already exists"));
        }

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(vec![ProductEvent::ProductCreated(ProductCreated {
            product_id: cmd.product_id,
            name: cmd.name.clone(),
            description: cmd.description.clone(),
            price: cmd.price,
            stock: cmd.stock,
            category: cmd.category.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_restock(&self, cmd: &Restock) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_created()?;
        self.ensure_product_id(cmd.product_id)?;

        // No upper bound on stock.
        Ok(vec![ProductEvent::StockRestocked(StockRestocked {
            product_id: cmd.product_id,
            quantity: cmd.quantity,
            new_stock: self.stock + cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_sell(&self, cmd: &Sell) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_created()?;
        self.ensure_product_id(cmd.product_id)?;

        // Three-way outcome: out of stock / insufficient stock / completed.
        // Rejections never partially apply.
        let event = if self.stock == 0 {
            ProductEvent::SaleRejected(SaleRejected {
                product_id: cmd.product_id,
                requested: cmd.quantity,
                reason: SaleRejection::OutOfStock,
                occurred_at: cmd.occurred_at,
            })
        } else if cmd.quantity > self.stock {
            ProductEvent::SaleRejected(SaleRejected {
                product_id: cmd.product_id,
                requested: cmd.quantity,
                reason: SaleRejection::InsufficientStock {
                    available: self.stock,
                },
                occurred_at: cmd.occurred_at,
            })
        } else {
            ProductEvent::SaleCompleted(SaleCompleted {
                product_id: cmd.product_id,
                quantity: cmd.quantity,
                new_stock: self.stock - cmd.quantity,
                occurred_at: cmd.occurred_at,
            })
        };

        Ok(vec![event])
    }

    fn handle_apply_discount(&self, cmd: &ApplyDiscount) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_created()?;
        self.ensure_product_id(cmd.product_id)?;

        if !cmd.fraction.is_finite() || cmd.fraction < 0.0 || cmd.fraction > MAX_DISCOUNT {
            return Err(DomainError::validation(format!(
                "discount fraction must be within [0, {MAX_DISCOUNT}], got {}",
                cmd.fraction
            )));
        }

        let new_price = self.price.discounted(cmd.fraction)?;

        Ok(vec![ProductEvent::DiscountApplied(DiscountApplied {
            product_id: cmd.product_id,
            fraction: cmd.fraction,
            new_price,
            occurred_at: cmd.occurred_at,
        })])
    }
}
