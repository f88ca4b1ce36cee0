//! Tab service
//!
//! Orchestrates the ledger and the status machine with their print side
//! effects: sending a cart prints a kitchen ticket for the new lines,
//! confirming payment prints the payment ticket, marking ready prints
//! nothing.

use std::sync::Arc;

use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{CartLine, IdentifierType, Role, Tab, TabStatus};
use shared::util::now_millis;

use super::ledger::TabLedger;
use super::status::StatusMachine;
use crate::printing::{PrintService, PrintedTicket};
use crate::store::Store;

/// Result of sending a cart
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub tab: Tab,
    pub created: bool,
    pub ticket: PrintedTicket,
}

/// Result of confirming payment
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOutcome {
    pub tab: Tab,
    pub ticket: PrintedTicket,
}

#[derive(Clone)]
pub struct TabService {
    store: Store,
    ledger: TabLedger,
    status: StatusMachine,
    print: Arc<PrintService>,
}

impl TabService {
    pub fn new(store: Store, print: Arc<PrintService>) -> Self {
        Self {
            ledger: TabLedger::new(store.clone()),
            status: StatusMachine::new(store.clone()),
            store,
            print,
        }
    }

    pub fn get(&self, id: &str) -> AppResult<Tab> {
        self.store
            .get_tab(id)?
            .ok_or_else(|| AppError::tab_not_found(id))
    }

    /// Tabs in `status`, oldest first
    pub fn queue(&self, status: TabStatus) -> AppResult<Vec<Tab>> {
        Ok(self.status.queue(status)?)
    }

    /// Add `lines` to the identifier's open tab and print them for the kitchen
    pub async fn send_order(
        &self,
        identifier: &str,
        identifier_type: IdentifierType,
        waiter: &str,
        lines: &[CartLine],
    ) -> AppResult<SendOutcome> {
        let ledger = self.ledger.clone();
        let (identifier, waiter, owned) = (identifier.to_string(), waiter.to_string(), lines.to_vec());
        let outcome = run_blocking(move || {
            ledger.add_to_tab(&identifier, identifier_type, &waiter, &owned)
        })
        .await?;
        let ticket = self.print.print_kitchen_delta(&outcome.tab, lines).await;
        Ok(SendOutcome {
            tab: outcome.tab,
            created: outcome.created,
            ticket,
        })
    }

    /// `novo -> pago`, then print the payment ticket
    pub async fn confirm_payment(&self, id: &str, role: Role) -> AppResult<PaymentOutcome> {
        let tab = self.transition(id, TabStatus::Paid, role).await?;
        let ticket = self.print.print_payment(&tab, now_millis()).await;
        Ok(PaymentOutcome { tab, ticket })
    }

    /// `pago -> pronto`
    pub async fn mark_ready(&self, id: &str, role: Role) -> AppResult<Tab> {
        self.transition(id, TabStatus::Ready, role).await
    }

    async fn transition(&self, id: &str, target: TabStatus, role: Role) -> AppResult<Tab> {
        let status = self.status.clone();
        let id = id.to_string();
        run_blocking(move || status.transition(&id, target, role)).await
    }
}

/// Run a store write (redb commit) off the async runtime
async fn run_blocking<T, F>(write: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(write).await.map_err(|e| {
        tracing::error!("spawn_blocking join error: {e}");
        AppError::internal("Tab write task failed")
    })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::TicketRenderer;
    use comanda_printer::MemoryPrinter;
    use rust_decimal::Decimal;
    use shared::error::ErrorCode;

    fn setup() -> (Arc<MemoryPrinter>, TabService) {
        let store = Store::open_in_memory().unwrap();
        let printer = Arc::new(MemoryPrinter::new());
        let renderer = TicketRenderer::new(40, chrono_tz::America::Sao_Paulo, "ASA DE AGUIA");
        let print = Arc::new(PrintService::new(renderer, Some(printer.clone())));
        (printer, TabService::new(store, print))
    }

    #[tokio::test]
    async fn test_order_lifecycle_with_tickets() {
        let (printer, service) = setup();
        let a = CartLine::new("A", Decimal::new(500, 2), 2);
        let b = CartLine::new("B", Decimal::new(2000, 2), 1);

        let first = service
            .send_order("Mesa 5", IdentifierType::Table, "joao", &[a])
            .await
            .unwrap();
        assert!(first.created);
        assert!(first.ticket.printed);

        let second = service
            .send_order("Mesa 5", IdentifierType::Table, "joao", &[b])
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.tab.total, Decimal::new(3000, 2));
        // delta ticket holds only the new line
        assert!(second.ticket.text.contains("1x B\n"));
        assert!(!second.ticket.text.contains("2x A\n"));

        let paid = service.confirm_payment(&first.tab.id, Role::Cashier).await.unwrap();
        assert_eq!(paid.tab.status, TabStatus::Paid);
        assert!(paid.ticket.text.contains("TOTAL: R$30.00"));

        let ready = service.mark_ready(&first.tab.id, Role::Kitchen).await.unwrap();
        assert_eq!(ready.status, TabStatus::Ready);

        // two kitchen deltas and one payment ticket
        assert_eq!(printer.job_count(), 3);
        assert_eq!(printer.jobs()[2].document, format!("pagamento-{}", first.tab.id));
    }

    #[tokio::test]
    async fn test_rejected_payment_prints_nothing() {
        let (printer, service) = setup();
        let line = CartLine::new("A", Decimal::new(500, 2), 1);
        let sent = service
            .send_order("Ana", IdentifierType::Client, "joao", &[line])
            .await
            .unwrap();
        printer.clear();

        let err = service
            .confirm_payment(&sent.tab.id, Role::Waiter)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(printer.job_count(), 0);

        let err = service.get("missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::TabNotFound);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_sends_share_one_tab() {
        let (printer, service) = setup();
        let mut handles = Vec::new();
        for i in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let line = CartLine::new(format!("Item {}", i), Decimal::new(100, 2), 1);
                service
                    .send_order("Mesa 3", IdentifierType::Table, "joao", &[line])
                    .await
                    .unwrap()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().created {
                created += 1;
            }
        }
        assert_eq!(created, 1);

        let open = service.queue(TabStatus::New).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].items.len(), 16);
        assert_eq!(open[0].total, Decimal::new(1600, 2));
        assert_eq!(printer.job_count(), 16);
    }
}
