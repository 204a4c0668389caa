// ── Product ──

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use super::record::{Draft, Record, RecordId, overlay, required};
use crate::error::ValidationError;

/// Customer rating summary, as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub title: String,
    pub price: f64,
    pub category: String,
    /// Image URL. Empty when none was given.
    pub image: String,
    pub description: String,
    /// Only remote products carry a rating; the form never edits it.
    pub rating: Option<Rating>,
}

impl Product {
    /// Price formatted the way lists and detail views show it.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Title,
    Price,
    Category,
    Image,
    Description,
}

/// Raw form text for a product. `price` stays text until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// A finite, non-negative number.
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

impl Draft for ProductDraft {
    type Field = ProductField;
    type Patch = ProductPatch;

    const FIELDS: &'static [ProductField] = &[
        ProductField::Title,
        ProductField::Price,
        ProductField::Category,
        ProductField::Image,
        ProductField::Description,
    ];

    fn value(&self, field: ProductField) -> &str {
        match field {
            ProductField::Title => &self.title,
            ProductField::Price => &self.price,
            ProductField::Category => &self.category,
            ProductField::Image => &self.image,
            ProductField::Description => &self.description,
        }
    }

    fn set(&mut self, field: ProductField, value: String) {
        match field {
            ProductField::Title => self.title = value,
            ProductField::Price => self.price = value,
            ProductField::Category => self.category = value,
            ProductField::Image => self.image = value,
            ProductField::Description => self.description = value,
        }
    }

    fn label(field: ProductField) -> &'static str {
        match field {
            ProductField::Title => "Title",
            ProductField::Price => "Price",
            ProductField::Category => "Category",
            ProductField::Image => "Image URL",
            ProductField::Description => "Description",
        }
    }

    fn validate(&self) -> Result<ProductPatch, ValidationError> {
        let title = required(&self.title);
        let price = parse_price(&self.price);
        let category = required(&self.category);
        let description = required(&self.description);
        // Optional: blank clears the image.
        let image = Some(self.image.clone());

        let invalid: Vec<&'static str> = [
            (ProductField::Title, title.is_none()),
            (ProductField::Price, price.is_none()),
            (ProductField::Category, category.is_none()),
            (ProductField::Description, description.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, bad)| bad.then_some(field.into()))
        .collect();

        if !invalid.is_empty() {
            return Err(ValidationError::new(Product::KIND, invalid));
        }

        Ok(ProductPatch {
            title,
            price,
            category,
            image,
            description,
        })
    }
}

impl Record for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    const KIND: &'static str = "product";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            price: self.price.to_string(),
            category: self.category.clone(),
            image: self.image.clone(),
            description: self.description.clone(),
        }
    }

    fn from_patch(id: RecordId, patch: ProductPatch) -> Result<Self, ValidationError> {
        match patch {
            ProductPatch {
                title: Some(title),
                price: Some(price),
                category: Some(category),
                image,
                description: Some(description),
            } => Ok(Self {
                id,
                title,
                price,
                category,
                image: image.unwrap_or_default(),
                description,
                rating: None,
            }),
            incomplete => {
                let missing = [
                    (ProductField::Title, incomplete.title.is_none()),
                    (ProductField::Price, incomplete.price.is_none()),
                    (ProductField::Category, incomplete.category.is_none()),
                    (ProductField::Description, incomplete.description.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field.into()))
                .collect();
                Err(ValidationError::new(Self::KIND, missing))
            }
        }
    }

    fn merge(&mut self, patch: ProductPatch) {
        overlay(&mut self.title, patch.title);
        overlay(&mut self.price, patch.price);
        overlay(&mut self.category, patch.category);
        overlay(&mut self.image, patch.image);
        overlay(&mut self.description, patch.description);
    }
}
