//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Catalog product identifier, as issued by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name, also the key used by package compositions
    pub name: String,

    /// Image reference (URL or asset path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Unit price in minor units
    pub price: u64,
}

impl Product {
    /// Create a new product without an image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            price,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_has_no_image() {
        let product = Product::new(7, "Moringa Tea", 2_500);

        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.image, None);
        assert_eq!(product.price, 2_500);
    }

    #[test]
    fn product_id_is_transparent_in_json() -> Result<(), serde_json::Error> {
        let product = Product::new(3, "Aloe Gel", 100).with_image("aloe.png");

        let json = serde_json::to_value(&product)?;

        assert_eq!(json["id"], 3);
        assert_eq!(json["image"], "aloe.png");

        Ok(())
    }
}
