//! The product catalog: a static, read-only ordered sequence of products.
//!
//! The catalog is loaded once from its raw JSON data source and never
//! mutated. Prices are decimal strings (precision-preserving) and the
//! split-eligibility flag is coerced from whatever truthy form the data
//! source uses (`true`, `"yes"`, `1`, ...).

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use frostline_core::{Price, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same ID.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// The raw data source could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A product in the catalog.
///
/// Immutable once loaded; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identity within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label (e.g. "Frozen", "Fruit").
    pub category: String,
    /// Pack descriptor (e.g. "10 kg case").
    #[serde(default)]
    pub pack: String,
    /// Optional longer description for the details view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base price for a full case.
    pub price: Price,
    /// Whether the case may be bought in half or quarter portions.
    #[serde(default, deserialize_with = "deserialize_truthy", alias = "split")]
    pub splittable: bool,
}

/// Coerce a truthy/stringly-typed flag to `bool` at the data boundary.
///
/// The raw data source is inconsistent about how it encodes the split flag;
/// booleans, numbers, and strings all appear. Strings follow the source's
/// truthiness: the usual falsy tokens and the empty string are `false`,
/// anything else is `true`.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyVisitor;

    impl de::Visitor<'_> for TruthyVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a boolean, number, or truthy string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v != 0.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            let falsy = matches!(
                v.to_ascii_lowercase().as_str(),
                "" | "false" | "no" | "n" | "0" | "off"
            );
            Ok(!falsy)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(TruthyVisitor)
}

/// A static, read-only ordered sequence of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (i, product) in products.iter().enumerate() {
            if products
                .iter()
                .take(i)
                .any(|earlier| earlier.id == product.id)
            {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Load a catalog from its raw JSON data source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the JSON is malformed and
    /// [`CatalogError::DuplicateId`] if two products share an ID.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct category labels, in first-seen catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Products in the given category, in catalog order.
    #[must_use]
    pub fn by_category<'a>(&'a self, category: &str) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Products whose name, category, or ID contains the query,
    /// case-insensitively. A blank query matches everything.
    #[must_use]
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a Product> {
        let q = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                q.is_empty()
                    || p.name.to_lowercase().contains(&q)
                    || p.category.to_lowercase().contains(&q)
                    || p.id.as_str().to_lowercase().contains(&q)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, category: &str, splittable: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            category: category.to_owned(),
            pack: "10 kg case".to_owned(),
            description: None,
            price: Price::new(Decimal::new(1000, 2)).unwrap(),
            splittable,
        }
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            product("F1", "Chips", "Frozen", true),
            product("F1", "Peas", "Frozen", false),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "F1"));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::new(vec![product("F1", "Chips", "Frozen", true)]).unwrap();
        assert_eq!(catalog.get(&ProductId::new("F1")).unwrap().name, "Chips");
        assert!(catalog.get(&ProductId::new("F2")).is_none());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::new(vec![
            product("F1", "Chips", "Frozen", true),
            product("V1", "Carrots", "Vegetables", false),
            product("F2", "Peas", "Frozen", false),
        ])
        .unwrap();
        assert_eq!(catalog.categories(), vec!["Frozen", "Vegetables"]);
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::new(vec![
            product("F1", "Chips", "Frozen", true),
            product("V1", "Carrots", "Vegetables", false),
        ])
        .unwrap();
        let frozen = catalog.by_category("Frozen");
        assert_eq!(frozen.len(), 1);
        assert_eq!(frozen[0].id.as_str(), "F1");
    }

    #[test]
    fn test_search_matches_name_category_and_id() {
        let catalog = Catalog::new(vec![
            product("F1", "Chips", "Frozen", true),
            product("V1", "Carrots", "Vegetables", false),
        ])
        .unwrap();
        assert_eq!(catalog.search("chip").len(), 1);
        assert_eq!(catalog.search("FROZEN").len(), 1);
        assert_eq!(catalog.search("v1").len(), 1);
        assert_eq!(catalog.search("  ").len(), 2);
        assert!(catalog.search("nothing").is_empty());
    }

    #[test]
    fn test_from_json_with_truthy_split_flags() {
        let json = r#"[
            {"id": "F1", "name": "Chips", "category": "Frozen", "pack": "4 x 2.5 kg", "price": "10.00", "split": true},
            {"id": "F2", "name": "Peas", "category": "Frozen", "price": "8.50", "split": "yes"},
            {"id": "F3", "name": "Corn", "category": "Frozen", "price": "7.25", "split": 1},
            {"id": "F4", "name": "Beans", "category": "Frozen", "price": "6.00", "split": "no"},
            {"id": "F5", "name": "Mash", "category": "Frozen", "price": "5.75"}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let split = |id: &str| catalog.get(&ProductId::new(id)).unwrap().splittable;
        assert!(split("F1"));
        assert!(split("F2"));
        assert!(split("F3"));
        assert!(!split("F4"));
        assert!(!split("F5"));
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        let json = r#"[{"id": "F1", "name": "Chips", "category": "Frozen", "price": "-1.00"}]"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::Parse(_))
        ));
    }
}
