//! # Catalog Store
//!
//! Immutable lookup tables of categories, products, and drink options.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Start-up                                                               │
//! │    Catalog::standard()  or  Catalog::from_json(file contents)           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    Catalog::new(data) ── validate fields, ids, references               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    Arc<Catalog> shared read-only with the order state machine           │
//! │                                                                         │
//! │  Never mutated after construction.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never fail. [`Catalog::products_by_category`] returns an empty list
//! for an unknown category id instead of an error, so the menu simply shows
//! nothing for it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, DrinkOption, Product};
use crate::validation;

/// The raw tables, as authored in a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub drinks: Vec<DrinkOption>,
}

/// Validated, read-only catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    drinks: Vec<DrinkOption>,
    product_index: HashMap<String, usize>,
    drink_index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from raw tables.
    ///
    /// ## Checks
    /// - At least one category (the menu opens on the first one)
    /// - Every entry passes the field validators
    /// - Ids are unique within each table
    /// - Every product's `category_id` names a category
    /// - No drink discount exceeds the cheapest product, so a cart line is
    ///   never negative
    pub fn new(data: CatalogData) -> CoreResult<Self> {
        let CatalogData {
            categories,
            products,
            drinks,
        } = data;

        if categories.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }

        let mut category_ids = HashSet::new();
        for category in &categories {
            validation::validate_category(category)?;
            if !category_ids.insert(category.id.as_str()) {
                return Err(CoreError::DuplicateId {
                    table: "category",
                    id: category.id.clone(),
                });
            }
        }

        let mut product_index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            validation::validate_product(product)?;
            if !category_ids.contains(product.category_id.as_str()) {
                return Err(CoreError::UnknownCategory {
                    product_id: product.id.clone(),
                    category_id: product.category_id.clone(),
                });
            }
            if product_index.insert(product.id.clone(), position).is_some() {
                return Err(CoreError::DuplicateId {
                    table: "product",
                    id: product.id.clone(),
                });
            }
        }

        // With no products there is nothing to discount, so no negative delta fits.
        let cheapest_cents = products.iter().map(|p| p.price_cents).min().unwrap_or(0);

        let mut drink_index = HashMap::with_capacity(drinks.len());
        for (position, drink) in drinks.iter().enumerate() {
            validation::validate_drink(drink)?;
            if -drink.price_delta_cents > cheapest_cents {
                return Err(CoreError::DrinkDiscountTooLarge {
                    drink_id: drink.id.clone(),
                    discount_cents: -drink.price_delta_cents,
                    cheapest_cents,
                });
            }
            if drink_index.insert(drink.id.clone(), position).is_some() {
                return Err(CoreError::DuplicateId {
                    table: "drink",
                    id: drink.id.clone(),
                });
            }
        }

        Ok(Catalog {
            categories,
            products,
            drinks,
            product_index,
            drink_index,
        })
    }

    /// Parses and validates a JSON catalog.
    ///
    /// ## Format
    /// ```json
    /// {
    ///   "categories": [{ "id": "burgers", "name": "Burgers", "image_ref": "..." }],
    ///   "products": [{ "id": "b2", "category_id": "burgers", "name": "Big Mac",
    ///                  "price_cents": 650, "image_ref": "...", "calories": 550 }],
    ///   "drinks": [{ "id": "d2", "name": "Cola", "price_delta_cents": 0, "image_ref": "..." }]
    /// }
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// The restaurant's standard menu.
    pub fn standard() -> Self {
        Self::new(standard_data()).expect("standard catalog is valid")
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All categories in menu order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The category the menu opens on.
    pub fn first_category(&self) -> &Category {
        // Non-empty by construction.
        &self.categories[0]
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Products listed under `category_id`, in catalog order.
    ///
    /// Unknown ids yield an empty list.
    pub fn products_by_category(&self, category_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.product_index.get(id).map(|&i| &self.products[i])
    }

    /// All drink choices offered in the meal builder.
    pub fn drink_options(&self) -> &[DrinkOption] {
        &self.drinks
    }

    pub fn drink(&self, id: &str) -> Option<&DrinkOption> {
        self.drink_index.get(id).map(|&i| &self.drinks[i])
    }

    /// Copies the tables back out, e.g. to write a catalog file.
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            categories: self.categories.clone(),
            products: self.products.clone(),
            drinks: self.drinks.clone(),
        }
    }
}

// =============================================================================
// Standard Menu
// =============================================================================

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        image_ref: format!("categories/{id}.jpg"),
    }
}

fn product(id: &str, category_id: &str, name: &str, price_cents: i64, calories: u32) -> Product {
    Product {
        id: id.to_string(),
        category_id: category_id.to_string(),
        name: name.to_string(),
        price_cents,
        image_ref: format!("products/{id}.jpg"),
        calories: Some(calories),
        description: None,
    }
}

fn drink(id: &str, name: &str) -> DrinkOption {
    DrinkOption {
        id: id.to_string(),
        name: name.to_string(),
        price_delta_cents: 0,
        image_ref: format!("drinks/{id}.jpg"),
    }
}

fn standard_data() -> CatalogData {
    CatalogData {
        categories: vec![
            category("burgers", "Burgers"),
            category("chicken", "Chicken & Fish"),
            category("fries", "Fries & Sides"),
            category("cafe", "McCafé® Coffees"),
            category("beverages", "Beverages"),
            category("breakfast", "Breakfast"),
            category("sweets", "Sweets & Treats"),
            category("happymeal", "Happy Meal®"),
        ],
        products: vec![
            product("b1", "burgers", "Double Big Mac®", 950, 720),
            product("b2", "burgers", "Big Mac®", 650, 550),
            product("b3", "burgers", "Double Quarter Pounder", 820, 740),
            product("b4", "burgers", "McDouble®", 350, 400),
            product("b5", "burgers", "Bacon Burger", 790, 630),
            product("b6", "burgers", "Cheeseburger", 280, 300),
            product("c1", "chicken", "McChicken®", 320, 400),
            product("c2", "chicken", "Chicken McNuggets®", 600, 410),
            product("c3", "chicken", "McCrispy™", 550, 470),
            product("c4", "chicken", "Filet-O-Fish®", 480, 380),
            product("c5", "chicken", "Spicy McCrispy™", 580, 530),
            product("s1", "fries", "Famous Fries (M)", 329, 320),
            product("s2", "fries", "Famous Fries (L)", 399, 480),
            product("s3", "fries", "Apple Slices", 100, 15),
            product("cf1", "cafe", "Caramel Macchiato", 389, 260),
            product("cf2", "cafe", "Iced Coffee", 250, 140),
            product("cf3", "cafe", "Latte", 329, 120),
            product("v1", "beverages", "Cola", 150, 140),
            product("v2", "beverages", "Lemon Lime", 150, 140),
            product("v3", "beverages", "Orange Soda", 150, 140),
            product("bk1", "breakfast", "Egg Sandwich", 350, 310),
            product("bk2", "breakfast", "Sausage Burrito", 250, 310),
            product("sw1", "sweets", "Oreo Ice Cream", 340, 510),
            product("sw2", "sweets", "Vanilla Cone", 100, 200),
            product("hm1", "happymeal", "Kids Meal", 450, 475),
        ],
        drinks: vec![
            drink("d1", "Lemon Lime"),
            drink("d2", "Cola"),
            drink("d3", "Orange"),
        ],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_shape() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.categories().len(), 8);
        assert_eq!(catalog.drink_options().len(), 3);
        assert_eq!(catalog.first_category().id, "burgers");
        assert_eq!(catalog.product("b2").map(|p| p.price_cents), Some(650));
        assert_eq!(catalog.drink("d2").map(|d| d.name.as_str()), Some("Cola"));
    }

    #[test]
    fn test_products_by_category_preserves_order() {
        let catalog = Catalog::standard();
        let ids: Vec<&str> = catalog
            .products_by_category("fries")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let catalog = Catalog::standard();
        assert!(catalog.products_by_category("salads").is_empty());
        assert!(catalog.category("salads").is_none());
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = Catalog::new(CatalogData::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCatalog));
    }

    #[test]
    fn test_rejects_duplicate_product_id() {
        let mut data = standard_data();
        data.products.push(product("b1", "burgers", "Another", 100, 100));
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { table: "product", .. }));
    }

    #[test]
    fn test_rejects_dangling_category() {
        let mut data = standard_data();
        data.products.push(product("x1", "salads", "Garden Salad", 400, 90));
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CoreError::UnknownCategory { .. }));
    }

    #[test]
    fn test_rejects_negative_price() {
        let mut data = standard_data();
        data.products[0].price_cents = -1;
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rejects_price_above_limit() {
        let mut data = standard_data();
        data.products[0].price_cents = 1_000_000_000_000_000;
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let mut data = standard_data();
        data.drinks[0].price_delta_cents = i64::MIN;
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rejects_discount_below_cheapest_product() {
        let json = r#"{
            "categories": [{ "id": "sides", "name": "Sides", "image_ref": "" }],
            "products": [{ "id": "s1", "category_id": "sides", "name": "Apple Slices",
                           "price_cents": 100, "image_ref": "" }],
            "drinks": [{ "id": "d1", "name": "Water", "price_delta_cents": -500, "image_ref": "" }]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DrinkDiscountTooLarge {
                discount_cents: 500,
                cheapest_cents: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_accepts_discount_up_to_cheapest_product() {
        let mut data = standard_data();
        // Apple Slices and Vanilla Cone cost 1.00
        data.drinks[0].price_delta_cents = -100;
        let catalog = Catalog::new(data).unwrap();

        let cheapest = catalog.product("s3").unwrap().clone();
        let drink = catalog.drink("d1").unwrap().clone();
        let line = crate::types::CartLine::new(cheapest, drink);
        assert!(line.price().is_zero());
    }

    #[test]
    fn test_json_round_trip_through_catalog_data() {
        let json = serde_json::to_string(&Catalog::standard().to_data()).unwrap();
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.products_by_category("burgers").len(), 6);
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::InvalidData(_)));
    }
}
