//! Product form: raw text fields plus the client-side price check.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::net::types::{Product, ProductDraft, ProductId};

pub const PRICE_VALIDATION_MESSAGE: &str = "Price must be a positive number.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Add,
    Edit,
}

impl FormMode {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Add => "Add New Product",
            Self::Edit => "Edit Product",
        }
    }

    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Add => "Product added!",
            Self::Edit => "Product updated!",
        }
    }
}

/// Form fields exactly as typed. `id` is empty when adding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Price must be a positive number.")]
    InvalidPrice,
}

impl ProductForm {
    /// Prefill from an existing product for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            description: product.description.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Target id for an update; `None` means create.
    #[must_use]
    pub fn target_id(&self) -> Option<ProductId> {
        let id = self.id.trim();
        (!id.is_empty()).then(|| ProductId::new(id))
    }

    /// Build the request body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPrice`] unless the price is a positive
    /// finite number.
    pub fn to_draft(&self) -> Result<ProductDraft, FormError> {
        let price = parse_price(&self.price)?;
        Ok(ProductDraft {
            name: self.name.clone(),
            price,
            image: self.image.clone(),
            description: self.description.clone(),
        })
    }
}

/// Parse a price field. `inf`/`NaN` parse as floats but are rejected.
///
/// # Errors
///
/// Returns [`FormError::InvalidPrice`] for non-numeric, non-finite, zero or
/// negative input.
pub fn parse_price(raw: &str) -> Result<f64, FormError> {
    let price = raw.trim().parse::<f64>().map_err(|_| FormError::InvalidPrice)?;
    if !price.is_finite() || price <= 0.0 {
        return Err(FormError::InvalidPrice);
    }
    Ok(price)
}
