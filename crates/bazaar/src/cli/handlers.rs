//! Command handlers.
//!
//! Each handler calls the API facade and returns the text to print, either the
//! human rendering or JSON when `--json` was given. Handlers never print and never
//! exit; that is left to `commands.rs`.

use super::render;
use super::setup::ProductDetails;
use anyhow::Result;
use bazaarapp::commands::list::ProductFilter;
use bazaarapp::model::{ProductInput, ProductStatus, Profile};
use bazaarapp::store::StorageBackend;
use bazaarapp::BazaarApi;
use serde::Serialize;

pub struct Context<B: StorageBackend> {
    pub api: BazaarApi<B>,
    pub json: bool,
}

#[derive(Serialize)]
struct RemoveOutput<'a> {
    name: &'a str,
    removed: bool,
}

impl<B: StorageBackend> Context<B> {
    pub fn new(api: BazaarApi<B>, json: bool) -> Self {
        Self { api, json }
    }

    pub fn list(&self, status: Option<ProductStatus>, limit: Option<usize>) -> Result<String> {
        let products = self.api.list_products(&ProductFilter { status, limit })?;
        if self.json {
            return Ok(render::render_json(&products)?);
        }
        Ok(render::render_product_list(&products))
    }

    pub fn show(&self, name: &str) -> Result<String> {
        let product = self.api.get_product(name)?;
        if self.json {
            return Ok(render::render_json(&product)?);
        }
        Ok(render::render_product(&product))
    }

    pub fn add(&self, mut input: ProductInput, details: ProductDetails) -> Result<String> {
        apply_details(&mut input, details);
        let product = self.api.add_product(input)?;
        if self.json {
            return Ok(render::render_json(&product)?);
        }
        Ok(render::render_success(&format!(
            "Added product '{}'",
            product.name
        )))
    }

    /// Flags left out keep the stored value. The merged record is validated by the
    /// API like any other input.
    ///
    /// The read and the write are separate API calls, so the merge is not atomic: a
    /// change another caller commits in between is overwritten with the values read
    /// here. Callers that share a store across writers should build the full
    /// `ProductInput` themselves and call `update_product` directly.
    pub fn update(
        &self,
        original: &str,
        name: Option<String>,
        price: Option<String>,
        stock: Option<u32>,
        details: ProductDetails,
    ) -> Result<String> {
        let mut input = self.api.get_product(original)?.to_input();
        if let Some(name) = name {
            input.name = name;
        }
        if let Some(price) = price {
            input.price = price;
        }
        if let Some(stock) = stock {
            input.stock = stock;
        }
        apply_details(&mut input, details);

        let product = self.api.update_product(original, input)?;
        if self.json {
            return Ok(render::render_json(&product)?);
        }
        let message = if product.name == original {
            format!("Updated product '{}'", product.name)
        } else {
            format!("Updated product '{}' (was '{}')", product.name, original)
        };
        Ok(render::render_success(&message))
    }

    pub fn remove(&self, name: &str) -> Result<String> {
        let removed = self.api.remove_product(name)?;
        if self.json {
            return Ok(render::render_json(&RemoveOutput { name, removed })?);
        }
        if removed {
            Ok(render::render_success(&format!("Removed product '{}'", name)))
        } else {
            Ok(render::render_warning(&format!(
                "No product named '{}'; nothing removed",
                name
            )))
        }
    }

    pub fn profile_show(&self) -> Result<String> {
        let profile = self.api.get_profile()?;
        if self.json {
            return Ok(render::render_json(&profile)?);
        }
        Ok(render::render_profile(&profile))
    }

    pub fn profile_set(&self, profile: Profile) -> Result<String> {
        let saved = self.api.save_profile(profile)?;
        if self.json {
            return Ok(render::render_json(&saved)?);
        }
        Ok(render::render_success(&format!(
            "Saved profile for {}",
            saved.name
        )))
    }
}

fn apply_details(input: &mut ProductInput, details: ProductDetails) {
    if let Some(description) = details.description {
        input.description = description;
    }
    if let Some(status) = details.status {
        input.status = status;
    }
    if let Some(image) = details.image {
        input.image = image;
    }
    if let Some(ai_hint) = details.ai_hint {
        input.ai_hint = ai_hint;
    }
}
