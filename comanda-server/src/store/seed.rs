//! Startup seed
//!
//! Upserts products, options and users from a JSON file shaped like the
//! store collections:
//!
//! ```json
//! {
//!   "produtos": [{"nome": "X-Burger", "preco_base": 10.0, "categoria": "Sanduíches"}],
//!   "opcoes":   [{"nome_opcao": "Bacon", "preco_adicional": 3.0, "tipo": "carne"}],
//!   "usuarios": [{"nome_usuario": "joao", "senha": "123", "cargo": "garcom"}]
//! }
//! ```
//!
//! Documents without an id get one derived from their name, so re-running
//! the seed updates in place.

use serde::Deserialize;
use shared::models::{MenuOption, Product, User};
use std::path::Path;

use super::{Store, StoreResult};

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(rename = "produtos", default)]
    pub products: Vec<Product>,
    #[serde(rename = "opcoes", default)]
    pub options: Vec<MenuOption>,
    #[serde(rename = "usuarios", default)]
    pub users: Vec<User>,
}

/// Counts of upserted documents
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: usize,
    pub options: usize,
    pub users: usize,
}

fn derived_id(prefix: &str, name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}:{}", prefix, slug)
}

impl SeedData {
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let raw = std::fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub fn apply(self, store: &Store) -> StoreResult<SeedSummary> {
        let mut summary = SeedSummary::default();

        for mut product in self.products {
            if product.id.is_empty() {
                product.id = derived_id("produto", &product.name);
            }
            store.put_product(product)?;
            summary.products += 1;
        }
        for mut option in self.options {
            if option.id.is_empty() {
                option.id = derived_id("opcao", &option.option_name);
            }
            store.put_option(option)?;
            summary.options += 1;
        }
        for mut user in self.users {
            if user.id.is_empty() {
                user.id = derived_id("usuario", &user.username);
            }
            store.put_user(user)?;
            summary.users += 1;
        }

        Ok(summary)
    }
}
