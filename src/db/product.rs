//! Product model.

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    /// Product ID.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image URL (optional).
    pub image: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Quantity in stock.
    pub quantity: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image URL (optional).
    pub image: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Quantity in stock.
    pub quantity: i64,
}

impl NewProduct {
    /// Create a new product with the required fields.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            image: None,
            price,
            quantity,
        }
    }
}

/// Full replacement of a product's editable fields.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    /// Product name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image URL (optional).
    pub image: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Quantity in stock.
    pub quantity: i64,
}

impl From<NewProduct> for ProductUpdate {
    fn from(p: NewProduct) -> Self {
        Self {
            name: p.name,
            description: p.description,
            image: p.image,
            price: p.price,
            quantity: p.quantity,
        }
    }
}
