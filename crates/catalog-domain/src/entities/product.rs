//! Product entity.

use catalog_core::rules::{not_blank, positive_price};
use catalog_core::{CatalogError, CatalogResult, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Invariants: the name is not blank, the price is finite and greater than
/// zero, and the stock is never negative. Every mutator re-checks the
/// invariant it touches and refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: f64,
    stock: i32,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Plain persisted representation of a [`Product`].
///
/// Only store adapters build these, from rows they have read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a new product with a fresh id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when an invariant is violated.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        stock: i32,
    ) -> CatalogResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        ensure_price(price)?;
        ensure_stock(stock)?;

        Ok(Self {
            id: ProductId::new(),
            name,
            description: description.into(),
            price,
            stock,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Rebuilds a product from its persisted form.
    ///
    /// Persisted rows were validated when written, so no checks run here.
    #[must_use]
    pub fn from_record(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            stock: record.stock,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Returns the persisted form of this product.
    #[must_use]
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub const fn stock(&self) -> i32 {
        self.stock
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Renames the product.
    pub fn update_name(&mut self, name: impl Into<String>) -> CatalogResult<()> {
        let name = name.into();
        ensure_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Replaces the description.
    pub fn update_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// Changes the price.
    pub fn update_price(&mut self, price: f64) -> CatalogResult<()> {
        ensure_price(price)?;
        self.price = price;
        self.touch();
        Ok(())
    }

    /// Sets the stock level.
    pub fn update_stock(&mut self, stock: i32) -> CatalogResult<()> {
        ensure_stock(stock)?;
        self.stock = stock;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

fn ensure_name(name: &str) -> CatalogResult<()> {
    not_blank(name).map_err(|_| CatalogError::validation("Name cannot be empty"))
}

fn ensure_price(price: f64) -> CatalogResult<()> {
    positive_price(price).map_err(|_| CatalogError::validation("Price must be greater than zero"))
}

fn ensure_stock(stock: i32) -> CatalogResult<()> {
    if stock < 0 {
        return Err(CatalogError::validation("Stock cannot be negative"));
    }
    Ok(())
}
