//! Sessions
//!
//! Per-login state (who, which role, cart, target) lives in an explicit
//! [`Session`] held by the [`SessionRegistry`], keyed by the login token.
//! Role screens are dispatched through [`RoleScreen`].

pub mod cart;
pub mod registry;
pub mod screen;

pub use cart::compose_line;
pub use registry::{SessionHandle, SessionRegistry};
pub use screen::{RoleScreen, Screen, ScreenContext, ScreenView};

use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartLine, IdentifierType, Role, Tab, TabTarget, lines_total};

/// Open tab being added to, chosen from the cashier's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditingTab {
    pub id: String,
    pub identifier: String,
    pub identifier_type: IdentifierType,
}

/// State of one logged-in user
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    #[serde(skip)]
    pub token: String,
    pub username: String,
    pub role: Role,
    pub target: TabTarget,
    pub cart: Vec<CartLine>,
    pub editing: Option<EditingTab>,
    pub created_at: i64,
    /// Last authenticated request (ms)
    #[serde(skip)]
    pub last_seen: i64,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>, role: Role, now: i64) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            role,
            target: TabTarget::Table(1),
            cart: Vec::new(),
            editing: None,
            created_at: now,
            last_seen: now,
        }
    }

    pub fn set_target(&mut self, target: TabTarget) -> AppResult<()> {
        if !target.is_valid() {
            return Err(AppError::new(ErrorCode::TabTargetMissing));
        }
        self.target = target;
        self.editing = None;
        Ok(())
    }

    /// Send the next cart to `tab` instead of the chosen target
    pub fn begin_editing(&mut self, tab: &Tab) -> AppResult<()> {
        if !tab.is_open() {
            return Err(AppError::with_message(
                ErrorCode::TabAlreadyPaid,
                format!("Tab {} is no longer open", tab.id),
            ));
        }
        self.editing = Some(EditingTab {
            id: tab.id.clone(),
            identifier: tab.identifier.clone(),
            identifier_type: tab.identifier_type,
        });
        Ok(())
    }

    /// Identifier and type the cart will be sent to
    pub fn destination(&self) -> (String, IdentifierType) {
        match &self.editing {
            Some(editing) => (editing.identifier.clone(), editing.identifier_type),
            None => (self.target.identifier(), self.target.identifier_type()),
        }
    }

    /// Append a line, returning its index
    pub fn add_line(&mut self, line: CartLine) -> usize {
        self.cart.push(line);
        self.cart.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) -> AppResult<CartLine> {
        if index >= self.cart.len() {
            return Err(AppError::new(ErrorCode::CartLineNotFound).with_detail("index", index));
        }
        Ok(self.cart.remove(index))
    }

    pub fn cart_total(&self) -> Decimal {
        lines_total(&self.cart)
    }

    /// Empty the cart for sending, keeping the lines for a possible restore
    pub fn take_cart(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.cart)
    }

    /// Put back lines of a failed send ahead of anything added meanwhile
    pub fn restore_cart(&mut self, mut lines: Vec<CartLine>) {
        lines.append(&mut self.cart);
        self.cart = lines;
    }

    /// Back to the chosen target (after a send or on cancel)
    pub fn clear_editing(&mut self) {
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, cents: i64, qty: u32) -> CartLine {
        CartLine::new(name, Decimal::new(cents, 2), qty)
    }

    #[test]
    fn test_cart_operations() {
        let mut session = Session::new("t", "joao", Role::Waiter, 0);
        assert_eq!(session.add_line(line("A", 500, 2)), 0);
        assert_eq!(session.add_line(line("B", 2000, 1)), 1);
        assert_eq!(session.cart_total(), Decimal::new(3000, 2));

        let removed = session.remove_line(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(session.cart.len(), 1);

        let err = session.remove_line(5).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLineNotFound);
    }

    #[test]
    fn test_target_and_destination() {
        let mut session = Session::new("t", "joao", Role::Waiter, 0);
        assert_eq!(session.destination(), ("Mesa 1".to_string(), IdentifierType::Table));

        let err = session.set_target(TabTarget::Client("  ".into())).unwrap_err();
        assert_eq!(err.code, ErrorCode::TabTargetMissing);
        assert_eq!(session.target, TabTarget::Table(1));

        session.set_target(TabTarget::Client("Ana".into())).unwrap();
        assert_eq!(session.destination(), ("Ana".to_string(), IdentifierType::Client));
    }

    #[test]
    fn test_editing_overrides_target_until_sent() {
        let mut session = Session::new("t", "maria", Role::Cashier, 0);
        let tab = Tab::open("t9", "Mesa 9", IdentifierType::Table, "joao", vec![line("A", 100, 1)], 1);

        session.begin_editing(&tab).unwrap();
        assert_eq!(session.destination(), ("Mesa 9".to_string(), IdentifierType::Table));
        session.clear_editing();
        assert_eq!(session.destination(), ("Mesa 1".to_string(), IdentifierType::Table));

        let mut paid = tab;
        paid.status = shared::models::TabStatus::Paid;
        assert!(session.begin_editing(&paid).is_err());
    }

    #[test]
    fn test_restore_keeps_order() {
        let mut session = Session::new("t", "joao", Role::Waiter, 0);
        session.add_line(line("A", 100, 1));
        let taken = session.take_cart();
        session.add_line(line("B", 100, 1));
        session.restore_cart(taken);
        let names: Vec<_> = session.cart.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }
}
