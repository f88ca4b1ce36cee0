//! Ticket printing
//!
//! - [`TicketRenderer`]: kitchen, payment and cupom text
//! - [`PrintService`]: renders and sends to the configured printer
//! - [`OrderEventListener`]: prints a kitchen ticket for every new tab

pub mod listener;
pub mod renderer;
pub mod service;

pub use listener::OrderEventListener;
pub use renderer::{CUPOM_WIDTH, TicketRenderer, money};
pub use service::{PrintService, PrintedTicket};
