//! Print service: render a ticket, hand it to the printer, never fail
//!
//! A missing or failing printer is logged; the ticket text is returned either
//! way so callers can show it.

use comanda_printer::SharedPrinter;
use serde::Serialize;
use shared::models::{CartLine, Tab};

use super::renderer::TicketRenderer;

/// A rendered ticket and whether the printer accepted it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintedTicket {
    pub text: String,
    pub printed: bool,
}

pub struct PrintService {
    renderer: TicketRenderer,
    printer: Option<SharedPrinter>,
}

impl PrintService {
    pub fn new(renderer: TicketRenderer, printer: Option<SharedPrinter>) -> Self {
        Self { renderer, printer }
    }

    pub fn renderer(&self) -> &TicketRenderer {
        &self.renderer
    }

    pub fn has_printer(&self) -> bool {
        self.printer.is_some()
    }

    /// Kitchen ticket for the lines just added to `tab`
    pub async fn print_kitchen_delta(&self, tab: &Tab, lines: &[CartLine]) -> PrintedTicket {
        let text =
            self.renderer
                .render_kitchen_delta(&tab.identifier, &tab.waiter, tab.timestamp, lines);
        self.send(&format!("comanda-{}", tab.identifier), text).await
    }

    /// Kitchen ticket with every item of `tab`
    pub async fn print_kitchen_tab(&self, tab: &Tab) -> PrintedTicket {
        let text = self.renderer.render_kitchen_tab(tab);
        self.send(&format!("comanda-{}", tab.identifier), text).await
    }

    /// Payment ticket for the whole tab
    pub async fn print_payment(&self, tab: &Tab, closed_at: i64) -> PrintedTicket {
        let text = self.renderer.render_payment(tab, closed_at);
        self.send(&format!("pagamento-{}", tab.id), text).await
    }

    async fn send(&self, document: &str, text: String) -> PrintedTicket {
        let Some(printer) = &self.printer else {
            tracing::warn!(document, "No printer configured, ticket not printed");
            return PrintedTicket {
                text,
                printed: false,
            };
        };

        let printed = match printer.print(document, &text).await {
            Ok(()) => {
                tracing::debug!(document, "Ticket printed");
                true
            }
            Err(e) => {
                tracing::warn!(document, error = %e, "Failed to print ticket");
                false
            }
        };
        PrintedTicket { text, printed }
    }
}
