//! Pricing Composer
//!
//! Turns a product plus selected options into a display name and a frozen
//! unit price.

mod composer;

pub use composer::{ComposedItem, compose};
