//! Menu option model (priced add-ons attached to products)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of add-on
///
/// Meat options need `permite_carne` on the product, the other kinds need
/// `permite_adicional`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    #[serde(rename = "carne")]
    Meat,
    #[serde(rename = "polpa")]
    Pulp,
    #[default]
    #[serde(rename = "adicional", other)]
    OtherAddon,
}

impl OptionKind {
    pub fn is_meat(&self) -> bool {
        matches!(self, Self::Meat)
    }
}

/// Option entity (collection `opcoes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nome_opcao", default)]
    pub option_name: String,
    #[serde(rename = "preco_adicional", default)]
    pub additional_price: Decimal,
    #[serde(rename = "tipo", default)]
    pub kind: OptionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_option() {
        let json = r#"{"id": "o1", "nome_opcao": "Bacon", "preco_adicional": 3.0, "tipo": "carne"}"#;
        let option: MenuOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.option_name, "Bacon");
        assert_eq!(option.additional_price, Decimal::new(3, 0));
        assert!(option.kind.is_meat());
    }

    #[test]
    fn test_unknown_kind_is_addon() {
        let option: MenuOption =
            serde_json::from_str(r#"{"nome_opcao": "Granola", "tipo": "cobertura"}"#).unwrap();
        assert_eq!(option.kind, OptionKind::OtherAddon);
        assert_eq!(option.additional_price, Decimal::ZERO);
    }
}
