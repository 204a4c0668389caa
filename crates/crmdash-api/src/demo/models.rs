// Demo API response types
//
// Wire shapes for the two demo endpoints. Only the fields the dashboard
// reads are modeled; serde ignores the rest. Nested objects and optional
// fields use `#[serde(default)]` so a sparse record still decodes.

use serde::{Deserialize, Serialize};

// ── Users (normalized into leads) ────────────────────────────────────

/// One entry of the users listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Option<AddressResponse>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub company: Option<CompanyResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressResponse {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub suite: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub name: String,
    #[serde(default)]
    pub catch_phrase: Option<String>,
    #[serde(default)]
    pub bs: Option<String>,
}

// ── Products ─────────────────────────────────────────────────────────

/// One entry of the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<RatingResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub rate: f64,
    pub count: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_decodes_nested_company_and_city() {
        let user: UserResponse = serde_json::from_value(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": { "street": "Kulas Light", "city": "Gwenborough", "geo": { "lat": "-37" } },
            "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered" }
        }))
        .unwrap();

        assert_eq!(user.company.unwrap().name, "Romaguera-Crona");
        assert_eq!(user.address.unwrap().city, "Gwenborough");
    }

    #[test]
    fn user_without_nested_objects_still_decodes() {
        let user: UserResponse =
            serde_json::from_value(json!({ "id": 7, "name": "Sparse" })).unwrap();
        assert!(user.company.is_none());
        assert!(user.address.is_none());
        assert_eq!(user.email, "");
    }

    #[test]
    fn product_rating_is_optional() {
        let product: ProductResponse = serde_json::from_value(json!({
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "category": "men's clothing",
            "image": "https://example.test/3.jpg",
            "description": "great outerwear"
        }))
        .unwrap();
        assert!(product.rating.is_none());
        assert!((product.price - 55.99).abs() < f64::EPSILON);
    }
}
