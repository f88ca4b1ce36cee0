//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu section a product belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "Sanduíches")]
    Sandwich,
    #[serde(rename = "Cremes")]
    Cream,
    #[serde(rename = "Bebidas")]
    Drink,
    /// Anything the catalog has that is not one of the three menu sections
    #[default]
    #[serde(rename = "Outros", other)]
    Other,
}

impl ProductCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sandwich => "Sanduíches",
            Self::Cream => "Cremes",
            Self::Drink => "Bebidas",
            Self::Other => "Outros",
        }
    }
}

/// Product entity (collection `produtos`)
///
/// Missing fields fall back to safe defaults: price 0, flags off, available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "preco_base", default)]
    pub base_price: Decimal,
    #[serde(rename = "categoria", default)]
    pub category: ProductCategory,
    #[serde(rename = "permite_carne", default)]
    pub allows_meat: bool,
    #[serde(rename = "permite_adicional", default)]
    pub allows_addon: bool,
    #[serde(rename = "disponivel", default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_document() {
        let json = r#"{
            "id": "p1",
            "nome": "X-Burger",
            "preco_base": 10.0,
            "categoria": "Sanduíches",
            "permite_carne": true,
            "permite_adicional": false,
            "disponivel": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "X-Burger");
        assert_eq!(product.base_price, Decimal::new(10, 0));
        assert_eq!(product.category, ProductCategory::Sandwich);
        assert!(product.allows_meat);
        assert!(!product.allows_addon);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let product: Product = serde_json::from_str(r#"{"nome": "Suco"}"#).unwrap();
        assert_eq!(product.base_price, Decimal::ZERO);
        assert_eq!(product.category, ProductCategory::Other);
        assert!(!product.allows_meat);
        assert!(product.available);
    }

    #[test]
    fn test_unknown_category_is_other() {
        let product: Product =
            serde_json::from_str(r#"{"nome": "Pastel", "categoria": "Salgados"}"#).unwrap();
        assert_eq!(product.category, ProductCategory::Other);
    }
}
