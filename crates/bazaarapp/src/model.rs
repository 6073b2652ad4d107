//! # Domain Model: Products, Profile and the Document
//!
//! This module defines the records persisted by bazaar: [`Product`], [`Profile`] and the
//! [`Document`] that holds both collections.
//!
//! ## The Durable Contract
//!
//! The document is a single pretty-printed JSON object:
//!
//! ```text
//! {
//!   "products": [ { "name", "description", "status", "price", "stock",
//!                   "date", "image", "aiHint" }, ... ],
//!   "profile":  { "name", "location", "story", "heritage", "avatar"? }
//! }
//! ```
//!
//! Field names and the status literals (`Active`, `Draft`, `Archived`) are part of the
//! on-disk format. Renaming them is a breaking change for every existing store.
//!
//! ## Keys and Timestamps
//!
//! - A product is identified by its `name`. Names are compared exactly.
//! - `date` is the creation time and is always assigned by the store (see
//!   [`store_clock`]), never by the caller. Callers hand in a [`ProductInput`],
//!   which has no date field at all.
//!
//! ## Hand-Edited Documents
//!
//! Keys the store does not know about (an extra field on a product, a whole extra
//! section next to `products`) are kept in an `extra` map on the record they were
//! found in and written back unchanged. A document naming two products the same is
//! rejected when it is read, since every operation assumes names are unique.
//!
//! ## Dates on Disk
//!
//! Dates are written as ISO-8601 UTC with millisecond precision
//! (`2024-05-01T14:00:00.000Z`). The store clock is truncated to milliseconds so a
//! record read back from disk compares equal to the one that was written.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{BazaarError, Result};

const SEED_DOCUMENT: &str = include_str!("seed.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    Active,
    Draft,
    Archived,
}

impl Default for ProductStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProductStatus::Active => "Active",
            ProductStatus::Draft => "Draft",
            ProductStatus::Archived => "Archived",
        };
        f.write_str(s)
    }
}

impl FromStr for ProductStatus {
    type Err = BazaarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            other => Err(BazaarError::Validation(format!(
                "Unknown product status '{}' (expected Active, Draft or Archived)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
    pub price: String,
    pub stock: u32,
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    pub image: String,
    pub ai_hint: String,
    /// Fields written by hand or by a newer version, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Build a stored record from caller input and a store-assigned creation time.
    pub fn from_input(input: ProductInput, date: DateTime<Utc>) -> Self {
        Self {
            name: input.name,
            description: input.description,
            status: input.status,
            price: input.price,
            stock: input.stock,
            date,
            image: input.image,
            ai_hint: input.ai_hint,
            extra: Map::new(),
        }
    }

    /// The editable part of this record, e.g. as a starting point for an update.
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            price: self.price.clone(),
            stock: self.stock,
            image: self.image.clone(),
            ai_hint: self.ai_hint.clone(),
        }
    }
}

/// A product as supplied by a caller: every field except the creation date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProductStatus,
    pub price: String,
    pub stock: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ai_hint: String,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>, stock: u32) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            stock,
            ..Default::default()
        }
    }

    /// Field-level checks. Runs before the store is touched, so an invalid record
    /// never reaches the document.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BazaarError::Validation(
                "Product name cannot be empty".to_string(),
            ));
        }
        if self.name.trim() != self.name {
            return Err(BazaarError::Validation(format!(
                "Product name '{}' has leading or trailing whitespace",
                self.name
            )));
        }
        if self.price.trim().is_empty() {
            return Err(BazaarError::Validation(format!(
                "Price is required for '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub location: String,
    pub story: String,
    pub heritage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The single persisted unit: every collection the store knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "unique_products")]
    pub products: Vec<Product>,
    pub profile: Profile,
    /// Top-level sections other than the two collections.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// The storefront catalog and artisan profile a fresh store starts with.
    pub fn seed() -> Result<Self> {
        serde_json::from_str(SEED_DOCUMENT).map_err(|source| BazaarError::Corruption {
            path: "seed.json".into(),
            source,
        })
    }

    /// No products, but the default profile, keeping the singleton invariant.
    pub fn empty() -> Result<Self> {
        Ok(Self {
            products: Vec::new(),
            profile: Self::seed()?.profile,
            extra: Map::new(),
        })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.name == name)
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }
}

fn unique_products<'de, D>(d: D) -> std::result::Result<Vec<Product>, D::Error>
where
    D: Deserializer<'de>,
{
    let products = Vec::<Product>::deserialize(d)?;
    let mut seen = HashSet::new();
    for product in &products {
        if !seen.insert(product.name.as_str()) {
            return Err(serde::de::Error::custom(format!(
                "duplicate product name '{}'",
                product.name
            )));
        }
    }
    Ok(products)
}

/// Creation timestamps come from here, truncated to what the on-disk format keeps.
pub fn store_clock() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
