use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — A catalog entry shown in listings and on the detail page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub rating: f64,
    /// Category label (matches [`Category::name`]).
    pub category: String,
    #[serde(default)]
    pub is_trending: bool,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    /// Denormalized count maintained by the backend.
    pub product_count: i64,
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// User — Only read to resolve review authors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// ProductSpecification — One key/value row of a product's spec sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpecification {
    pub id: String,
    pub product_id: String,
    pub spec_key: String,
    pub spec_value: String,
    pub created_at: Option<String>,
}
