//! Cart line composition with option eligibility checks

use std::collections::HashSet;

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AddCartItem, CartLine, MenuOption};

use crate::catalog::{Catalog, option_allowed};
use crate::pricing::compose;

/// Meat slots per item
pub const MAX_MEATS: usize = 2;

/// Largest quantity accepted for one line
pub const MAX_QUANTITY: u32 = 999;

/// Validate a request against the catalog and compose its cart line
pub fn compose_line(catalog: &Catalog, req: &AddCartItem) -> AppResult<CartLine> {
    if !(1..=MAX_QUANTITY).contains(&req.quantity) {
        return Err(quantity_out_of_range(req.quantity));
    }

    let product = catalog.product(&req.product_id).ok_or_else(|| {
        let code = if catalog.is_unavailable(&req.product_id) {
            ErrorCode::ProductUnavailable
        } else {
            ErrorCode::ProductNotFound
        };
        AppError::new(code).with_detail("product_id", req.product_id.clone())
    })?;

    let mut seen = HashSet::new();
    let mut options: Vec<&MenuOption> = Vec::with_capacity(req.option_ids.len());
    for id in &req.option_ids {
        if !seen.insert(id.as_str()) {
            return Err(AppError::validation(format!("Option {} selected twice", id)));
        }
        let option = catalog
            .option(id)
            .ok_or_else(|| AppError::new(ErrorCode::OptionNotFound).with_detail("option_id", id.clone()))?;
        if !option_allowed(product, option.kind) {
            return Err(AppError::with_message(
                ErrorCode::OptionNotAllowed,
                format!("{} cannot be added to {}", option.option_name, product.name),
            ));
        }
        options.push(option);
    }

    let meats = options.iter().filter(|o| o.kind.is_meat()).count();
    if meats > MAX_MEATS {
        return Err(AppError::with_message(
            ErrorCode::TooManyOptions,
            format!("At most {} meats per item", MAX_MEATS),
        ));
    }

    let line = compose(product, options).into_line(req.quantity, req.note.clone());
    if line.unit_price.checked_mul(Decimal::from(line.quantity)).is_none() {
        return Err(quantity_out_of_range(req.quantity));
    }
    Ok(line)
}

fn quantity_out_of_range(quantity: u32) -> AppError {
    AppError::with_message(
        ErrorCode::ValueOutOfRange,
        format!("Quantity must be between 1 and {}", MAX_QUANTITY),
    )
    .with_detail("quantity", quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OptionKind, Product, ProductCategory};

    fn catalog() -> Catalog {
        let product = |id: &str, name: &str, cents: i64, category, meat, addon| Product {
            id: id.into(),
            name: name.into(),
            base_price: Decimal::new(cents, 2),
            category,
            allows_meat: meat,
            allows_addon: addon,
            available: true,
        };
        let option = |id: &str, name: &str, cents: i64, kind| MenuOption {
            id: id.into(),
            option_name: name.into(),
            additional_price: Decimal::new(cents, 2),
            kind,
        };
        Catalog::new(
            vec![
                product("x", "X", 1000, ProductCategory::Sandwich, true, false),
                product("acai", "Creme de Acai", 1500, ProductCategory::Cream, false, true),
                product("coca", "Coca", 500, ProductCategory::Drink, false, false),
                Product {
                    available: false,
                    ..product("suco", "Suco", 600, ProductCategory::Drink, false, false)
                },
                Product {
                    base_price: Decimal::MAX,
                    ..product("ouro", "Ouro", 0, ProductCategory::Other, false, false)
                },
            ],
            vec![
                option("bacon", "Bacon", 300, OptionKind::Meat),
                option("frango", "Frango", 200, OptionKind::Meat),
                option("calabresa", "Calabresa", 250, OptionKind::Meat),
                option("morango", "Morango", 200, OptionKind::Pulp),
                option("granola", "Granola", 150, OptionKind::OtherAddon),
            ],
        )
    }

    fn request(product: &str, options: &[&str]) -> AddCartItem {
        AddCartItem {
            product_id: product.into(),
            option_ids: options.iter().map(|s| s.to_string()).collect(),
            quantity: 1,
            note: None,
        }
    }

    #[test]
    fn test_sandwich_with_two_meats() {
        let line = compose_line(&catalog(), &request("x", &["bacon", "frango"])).unwrap();
        assert_eq!(line.name, "X com Bacon e Frango");
        assert_eq!(line.unit_price, Decimal::new(1500, 2));
    }

    #[test]
    fn test_cream_with_addons() {
        let mut req = request("acai", &["morango", "granola"]);
        req.quantity = 2;
        req.note = Some("pouco gelo".into());
        let line = compose_line(&catalog(), &req).unwrap();
        assert_eq!(line.name, "Creme de Acai com Morango e Granola");
        assert_eq!(line.line_total(), Decimal::new(3700, 2));
        assert_eq!(line.note.as_deref(), Some("pouco gelo"));
    }

    #[test]
    fn test_eligibility_errors() {
        let catalog = catalog();

        let err = compose_line(&catalog, &request("coca", &["granola"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::OptionNotAllowed);

        let err = compose_line(&catalog, &request("acai", &["bacon"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::OptionNotAllowed);

        let err =
            compose_line(&catalog, &request("x", &["bacon", "frango", "calabresa"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::TooManyOptions);

        let err = compose_line(&catalog, &request("x", &["bacon", "bacon"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = compose_line(&catalog, &request("pizza", &[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);

        let err = compose_line(&catalog, &request("x", &["queijo"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::OptionNotFound);

        let err = compose_line(&catalog, &request("suco", &[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductUnavailable);
    }

    #[test]
    fn test_quantity_bounds() {
        let catalog = catalog();

        let mut req = request("coca", &[]);
        req.quantity = 0;
        let err = compose_line(&catalog, &req).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        req.quantity = u32::MAX;
        let err = compose_line(&catalog, &req).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        req.quantity = MAX_QUANTITY;
        let line = compose_line(&catalog, &req).unwrap();
        assert_eq!(line.line_total(), Decimal::new(499_500, 2));

        // A price the quantity would overflow
        let mut req = request("ouro", &[]);
        req.quantity = 2;
        let err = compose_line(&catalog, &req).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_plain_product() {
        let line = compose_line(&catalog(), &request("coca", &[])).unwrap();
        assert_eq!(line.name, "Coca");
        assert_eq!(line.unit_price, Decimal::new(500, 2));
    }
}
