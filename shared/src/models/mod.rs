//! Data models
//!
//! Documents of the store collections (`produtos`, `opcoes`, `usuarios`,
//! `pedidos`). Field names on the wire keep the store's Portuguese keys.

pub mod cart;
pub mod daily_report;
pub mod menu_option;
pub mod product;
pub mod tab;
pub mod user;

// Re-exports
pub use cart::*;
pub use daily_report::*;
pub use menu_option::*;
pub use product::*;
pub use tab::*;
pub use user::*;
