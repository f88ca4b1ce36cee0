//! Status State Machine
//!
//! `novo -> pago -> pronto`. Each transition is gated by role and applied as
//! a compare-and-set inside one write transaction.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Permission, Role, Tab, TabStatus};

use crate::store::{Store, StoreResult};

/// Permission required to move a tab into `target`
fn required_permission(target: TabStatus) -> Option<Permission> {
    match target {
        TabStatus::Paid => Some(Permission::ConfirmPayment),
        TabStatus::Ready => Some(Permission::MarkReady),
        TabStatus::New => None,
    }
}

/// Tabs a role works on, if any: cashier -> `novo`, kitchen -> `pago`
pub fn queue_for(role: Role) -> Option<TabStatus> {
    match role {
        Role::Cashier => Some(TabStatus::New),
        Role::Kitchen => Some(TabStatus::Paid),
        Role::Waiter | Role::Admin => None,
    }
}

#[derive(Clone)]
pub struct StatusMachine {
    store: Store,
}

impl StatusMachine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Tabs in `status`, oldest first
    pub fn queue(&self, status: TabStatus) -> StoreResult<Vec<Tab>> {
        self.store.list_tabs_by_status(status)
    }

    /// Move tab `id` to `target` on behalf of `role`
    ///
    /// The timestamp is left untouched.
    pub fn transition(&self, id: &str, target: TabStatus, role: Role) -> AppResult<Tab> {
        match required_permission(target) {
            Some(permission) if role.can(permission) => {}
            _ => {
                return Err(AppError::permission_denied(format!(
                    "Role '{}' cannot move tabs to '{}'",
                    role, target
                )));
            }
        }

        let tab = self.store.write_tabs(|writer| {
            let mut tab = writer
                .get(id)?
                .ok_or_else(|| AppError::tab_not_found(id))?;

            if tab.status == target {
                let code = match target {
                    TabStatus::Paid => ErrorCode::TabAlreadyPaid,
                    _ => ErrorCode::TabAlreadyReady,
                };
                return Err(AppError::new(code).with_detail("id", id));
            }
            if !tab.status.can_transition_to(target) {
                return Err(AppError::invalid_transition(tab.status.as_str(), target.as_str()));
            }

            tab.status = target;
            writer.put(&tab)?;
            Ok(tab)
        })?;

        tracing::info!(tab_id = %tab.id, status = %tab.status, role = %role, "Tab status changed");
        Ok(tab)
    }
}
