//! # comanda-printer
//!
//! Thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Fixed-width plain-text ticket building
//! - Windows-1252 encoding for Latin thermal printers
//! - ESC/POS framing (init, feed, cut)
//! - Network printing (TCP port 9100), console and in-memory sinks
//!
//! Business logic (WHAT to print) stays in comanda-server.
//!
//! ## Example
//!
//! ```ignore
//! use comanda_printer::{NetworkPrinter, Printer, TicketBuilder};
//!
//! let mut ticket = TicketBuilder::new(40);
//! ticket.sep_double();
//! ticket.center("COMANDA");
//! ticket.line_lr("2x Coca-Cola Lata", "R$10.00");
//! ticket.feed(3);
//!
//! let printer = NetworkPrinter::from_addr("192.168.1.100:9100")?;
//! printer.print("cozinha", &ticket.finalize()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;
mod ticket;

// Re-exports
pub use encoding::{convert_to_cp1252, text_width, truncate_width};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosFrame;
pub use printer::{ConsolePrinter, MemoryPrinter, NetworkPrinter, PrintJob, Printer, SharedPrinter};
pub use ticket::TicketBuilder;
