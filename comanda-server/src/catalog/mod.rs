//! Catalog Loader - menu products and options read from the store
//!
//! Other roles only ever see products flagged `disponivel`; options are
//! always loaded in full and matched to products by their kind.

use std::collections::HashSet;

use serde::Serialize;
use shared::models::{MenuOption, OptionKind, Product, ProductCategory};

use crate::store::{Store, StoreResult};

/// Menu snapshot used by the order screens
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    /// Available products, by category then name
    pub products: Vec<Product>,
    pub options: Vec<MenuOption>,
    /// Ids of products flagged unavailable
    #[serde(skip)]
    unavailable: HashSet<String>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, options: Vec<MenuOption>) -> Self {
        let (mut products, unavailable): (Vec<Product>, Vec<Product>) =
            products.into_iter().partition(|p| p.available);
        products.sort_by(|a, b| {
            category_rank(a.category)
                .cmp(&category_rank(b.category))
                .then_with(|| a.name.cmp(&b.name))
        });
        Self {
            products,
            options,
            unavailable: unavailable.into_iter().map(|p| p.id).collect(),
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Product exists but is switched off
    pub fn is_unavailable(&self, id: &str) -> bool {
        self.unavailable.contains(id)
    }

    pub fn option(&self, id: &str) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn products_in(&self, category: ProductCategory) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Options a product may carry given its flags
    pub fn options_for<'a>(&'a self, product: &'a Product) -> impl Iterator<Item = &'a MenuOption> {
        self.options
            .iter()
            .filter(move |o| option_allowed(product, o.kind))
    }
}

/// Meat needs `permite_carne`; pulps and other add-ons need `permite_adicional`
pub fn option_allowed(product: &Product, kind: OptionKind) -> bool {
    if kind.is_meat() {
        product.allows_meat
    } else {
        product.allows_addon
    }
}

fn category_rank(category: ProductCategory) -> u8 {
    match category {
        ProductCategory::Sandwich => 0,
        ProductCategory::Cream => 1,
        ProductCategory::Drink => 2,
        ProductCategory::Other => 3,
    }
}

/// Reads the menu from the store
#[derive(Clone)]
pub struct CatalogLoader {
    store: Store,
}

impl CatalogLoader {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn load(&self) -> StoreResult<Catalog> {
        let products = self.store.list_products()?;
        let options = self.store.list_options()?;
        Ok(Catalog::new(products, options))
    }
}
