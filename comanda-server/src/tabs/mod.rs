//! Tabs
//!
//! - [`TabLedger`]: merges sent carts into the open tab of an identifier
//! - [`status`]: `novo -> pago -> pronto` transitions and queues
//! - [`report`]: daily summary over the timestamp index
//! - [`TabService`]: ledger + transitions + ticket printing

pub mod ledger;
pub mod report;
pub mod service;
pub mod status;

pub use ledger::{LedgerOutcome, TabLedger};
pub use report::daily_report;
pub use service::{PaymentOutcome, SendOutcome, TabService};
pub use status::{StatusMachine, queue_for};
