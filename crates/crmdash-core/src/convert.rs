// ── API-to-domain type conversions ──
//
// Bridges raw `crmdash_api` response types into the domain records.
// Users flatten into leads (company and city are nested upstream);
// products map almost field for field.

use crmdash_api::{ProductResponse, RatingResponse, UserResponse};

use crate::model::{Lead, Product, Rating, RecordId};

// ── Lead ───────────────────────────────────────────────────────────

impl From<UserResponse> for Lead {
    fn from(user: UserResponse) -> Self {
        Self {
            id: RecordId::new(user.id),
            name: user.name,
            email: user.email,
            company: user.company.map(|c| c.name).unwrap_or_default(),
            city: user.address.map(|a| a.city).unwrap_or_default(),
        }
    }
}

// ── Product ────────────────────────────────────────────────────────

impl From<RatingResponse> for Rating {
    fn from(r: RatingResponse) -> Self {
        Self {
            rate: r.rate,
            count: r.count,
        }
    }
}

impl From<ProductResponse> for Product {
    fn from(p: ProductResponse) -> Self {
        Self {
            id: RecordId::new(p.id),
            title: p.title,
            price: p.price,
            category: p.category,
            image: p.image,
            description: p.description,
            rating: p.rating.map(Rating::from),
        }
    }
}
