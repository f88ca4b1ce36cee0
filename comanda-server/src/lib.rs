//! Comanda Server - restaurant order tabs
//!
//! Waiters compose items into a cart and send them to a tab ("comanda")
//! for a table or a client. The cashier confirms payment, the kitchen marks
//! the order ready, and tickets go to a thermal printer along the way.
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/       # config, state, server, background tasks
//! ├── store/      # embedded redb document store + change feed
//! ├── catalog/    # products and options
//! ├── pricing/    # item name/price composition
//! ├── session/    # per-login cart, target and role screens
//! ├── tabs/       # ledger, status machine, daily report
//! ├── printing/   # ticket rendering, printer dispatch, event listener
//! ├── auth/       # session token middleware and permissions
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # errors, logging, business time
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod pricing;
pub mod printing;
pub mod session;
pub mod store;
pub mod tabs;
pub mod utils;

pub use auth::CurrentSession;
pub use core::{Config, Server, ServerState};
pub use store::Store;
pub use tabs::TabService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging (`LOG_LEVEL`, `LOG_DIR`)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty());
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(&level, log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
   ______                                __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
