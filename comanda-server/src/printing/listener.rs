//! Order-event listener
//!
//! Watches tabs with status `novo` and prints a full kitchen ticket for each
//! tab that enters the query. Appends to an already open tab arrive as
//! `Modified` and are skipped; those are covered by the delta ticket printed
//! when the cart is sent.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::service::PrintService;
use crate::store::{ChangeKind, DocumentChange, TabSubscription};

pub struct OrderEventListener {
    print: Arc<PrintService>,
}

impl OrderEventListener {
    pub fn new(print: Arc<PrintService>) -> Self {
        Self { print }
    }

    /// Run until `shutdown` fires or the subscription ends
    pub async fn run(self, mut subscription: TabSubscription, shutdown: CancellationToken) {
        tracing::info!(query = ?subscription.query(), "Order event listener started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Order event listener received shutdown signal");
                    subscription.unsubscribe();
                    break;
                }
                batch = subscription.next_batch() => {
                    let Some(batch) = batch else {
                        tracing::info!("Tab subscription closed, order event listener stopping");
                        break;
                    };
                    self.handle_batch(&batch).await;
                }
            }
        }
    }

    /// Print one ticket per `Added` change; returns how many were sent
    pub async fn handle_batch(&self, batch: &[DocumentChange]) -> usize {
        let mut tickets = 0;
        for change in batch {
            if change.kind != ChangeKind::Added {
                tracing::trace!(tab_id = %change.tab.id, kind = ?change.kind, "Skipping change");
                continue;
            }

            tracing::info!(
                tab_id = %change.tab.id,
                identifier = %change.tab.identifier,
                items = change.tab.items.len(),
                "New tab detected, printing kitchen ticket"
            );
            let ticket = self.print.print_kitchen_tab(&change.tab).await;
            if !ticket.printed {
                tracing::warn!(tab_id = %change.tab.id, "Kitchen ticket for new tab not printed");
            }
            tickets += 1;
        }
        tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::TicketRenderer;
    use crate::store::{Store, TabQuery};
    use crate::tabs::TabLedger;
    use comanda_printer::MemoryPrinter;
    use rust_decimal::Decimal;
    use shared::models::{CartLine, IdentifierType, Tab, TabStatus};
    use std::time::Duration;

    fn setup() -> (Arc<MemoryPrinter>, OrderEventListener) {
        let printer = Arc::new(MemoryPrinter::new());
        let renderer = TicketRenderer::new(40, chrono_tz::America::Sao_Paulo, "ASA DE AGUIA");
        let print = Arc::new(PrintService::new(renderer, Some(printer.clone())));
        (printer, OrderEventListener::new(print))
    }

    fn tab_with_three_items() -> Tab {
        Tab::open(
            "t1",
            "Mesa 7",
            IdentifierType::Table,
            "joao",
            vec![
                CartLine::new("X-Burger", Decimal::new(1000, 2), 1),
                CartLine::new("Coca", Decimal::new(500, 2), 2),
                CartLine::new("Creme de Acai", Decimal::new(1800, 2), 1),
            ],
            1_753_075_680_000,
        )
    }

    #[tokio::test]
    async fn test_added_prints_all_items_modified_prints_nothing() {
        let (printer, listener) = setup();
        let tab = tab_with_three_items();

        let added = vec![DocumentChange {
            kind: ChangeKind::Added,
            tab: tab.clone(),
        }];
        assert_eq!(listener.handle_batch(&added).await, 1);

        let jobs = printer.jobs();
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].text.contains("1x X-Burger\n2x Coca\n1x Creme de Acai\n"));

        let mut appended = tab;
        appended.append(&[CartLine::new("Suco", Decimal::new(600, 2), 1)], 1_753_075_690_000);
        let modified = vec![DocumentChange {
            kind: ChangeKind::Modified,
            tab: appended,
        }];
        assert_eq!(listener.handle_batch(&modified).await, 0);
        assert_eq!(printer.job_count(), 1);
    }

    #[tokio::test]
    async fn test_run_prints_new_tabs_from_store() {
        let (printer, listener) = setup();
        let store = Store::open_in_memory().unwrap();
        let subscription = store.subscribe_tabs(TabQuery::status(TabStatus::New));
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(listener.run(subscription, shutdown.clone()));

        let ledger = TabLedger::new(store.clone());
        let line = CartLine::new("Coca", Decimal::new(500, 2), 1);
        ledger
            .add_to_tab("Mesa 1", IdentifierType::Table, "joao", &[line.clone()])
            .unwrap();
        ledger
            .add_to_tab("Mesa 1", IdentifierType::Table, "joao", &[line])
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            while printer.job_count() < 1 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        // give the append a chance to (not) print
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(printer.job_count(), 1);

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_stops_when_store_closes() {
        let (_, listener) = setup();
        let store = Store::open_in_memory().unwrap();
        let subscription = store.subscribe_tabs(TabQuery::status(TabStatus::New));
        let handle = tokio::spawn(listener.run(subscription, CancellationToken::new()));

        store.close_subscriptions();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
