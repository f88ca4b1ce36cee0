use rust_decimal::Decimal;
use shared::models::{CartLine, MenuOption, Product};

/// Result of composing a product with options
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedItem {
    pub name: String,
    pub unit_price: Decimal,
}

impl ComposedItem {
    /// Freeze into a cart line
    pub fn into_line(self, quantity: u32, note: Option<String>) -> CartLine {
        let line = CartLine::new(self.name, self.unit_price, quantity);
        match note {
            Some(note) => line.with_note(note),
            None => line,
        }
    }
}

/// Compose a product with options, in selection order
///
/// `"X"` + `[Bacon, Frango]` -> `"X com Bacon e Frango"`, price is the base
/// price plus every option's additional price. Eligibility is the caller's
/// concern.
pub fn compose<'a>(
    product: &Product,
    options: impl IntoIterator<Item = &'a MenuOption>,
) -> ComposedItem {
    let mut name = product.name.clone();
    let mut unit_price = product.base_price;

    for (i, option) in options.into_iter().enumerate() {
        name.push_str(if i == 0 { " com " } else { " e " });
        name.push_str(&option.option_name);
        unit_price += option.additional_price;
    }

    ComposedItem { name, unit_price }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OptionKind, ProductCategory};

    fn money(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sandwich() -> Product {
        Product {
            id: "p1".into(),
            name: "X".into(),
            base_price: money("10.00"),
            category: ProductCategory::Sandwich,
            allows_meat: true,
            allows_addon: false,
            available: true,
        }
    }

    fn meat(name: &str, price: &str) -> MenuOption {
        MenuOption {
            id: name.to_lowercase(),
            option_name: name.into(),
            additional_price: money(price),
            kind: OptionKind::Meat,
        }
    }

    #[test]
    fn test_two_meats() {
        let bacon = meat("Bacon", "3.00");
        let frango = meat("Frango", "2.00");
        let item = compose(&sandwich(), [&bacon, &frango]);
        assert_eq!(item.name, "X com Bacon e Frango");
        assert_eq!(item.unit_price, money("15.00"));
    }

    #[test]
    fn test_no_options_is_base_product() {
        let item = compose(&sandwich(), []);
        assert_eq!(item.name, "X");
        assert_eq!(item.unit_price, money("10.00"));
    }

    #[test]
    fn test_selection_order_is_kept() {
        let a = meat("Frango", "2.00");
        let b = meat("Bacon", "3.00");
        let c = meat("Calabresa", "2.50");
        let item = compose(&sandwich(), [&a, &b, &c]);
        assert_eq!(item.name, "X com Frango e Bacon e Calabresa");
        assert_eq!(item.unit_price, money("17.50"));
    }

    #[test]
    fn test_into_line_freezes_price() {
        let bacon = meat("Bacon", "3.00");
        let line = compose(&sandwich(), [&bacon]).into_line(2, Some("sem cebola".into()));
        assert_eq!(line.unit_price, money("13.00"));
        assert_eq!(line.line_total(), money("26.00"));
        assert_eq!(line.note.as_deref(), Some("sem cebola"));
    }
}
