//! Tab Ledger
//!
//! One open tab per identifier. Sending a cart either appends to that tab or
//! opens a new one. The read-merge-write runs inside a single store write
//! transaction.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartLine, IdentifierType, Tab};
use shared::util::{new_id, now_millis};

use crate::store::Store;

/// Result of [`TabLedger::add_to_tab`]
#[derive(Debug, Clone)]
pub struct LedgerOutcome {
    pub tab: Tab,
    /// `true` when a new tab was opened
    pub created: bool,
}

#[derive(Clone)]
pub struct TabLedger {
    store: Store,
}

impl TabLedger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Add `lines` to the open tab of `identifier`, opening one if needed
    pub fn add_to_tab(
        &self,
        identifier: &str,
        identifier_type: IdentifierType,
        waiter: &str,
        lines: &[CartLine],
    ) -> AppResult<LedgerOutcome> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AppError::new(ErrorCode::TabTargetMissing));
        }
        if lines.is_empty() {
            return Err(AppError::new(ErrorCode::TabEmpty));
        }
        if let Some(line) = lines.iter().find(|l| l.quantity == 0) {
            return Err(AppError::validation(format!(
                "Quantity must be at least 1: {}",
                line.name
            ))
            .with_detail("item", line.name.clone()));
        }

        let now = now_millis();
        let outcome = self.store.write_tabs(|writer| {
            let outcome = match writer.find_open(identifier)? {
                Some(mut tab) => {
                    tab.append(lines, now);
                    LedgerOutcome { tab, created: false }
                }
                None => {
                    let tab = Tab::open(
                        new_id(),
                        identifier,
                        identifier_type,
                        waiter,
                        lines.to_vec(),
                        now,
                    );
                    LedgerOutcome { tab, created: true }
                }
            };
            writer.put(&outcome.tab)?;
            Ok::<_, AppError>(outcome)
        })?;

        tracing::info!(
            tab_id = %outcome.tab.id,
            identifier = %outcome.tab.identifier,
            created = outcome.created,
            lines = lines.len(),
            total = %outcome.tab.total,
            "Cart added to tab"
        );
        Ok(outcome)
    }
}
