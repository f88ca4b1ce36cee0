//! Server state
//!
//! Holds the shared handles every handler and background task needs. All
//! fields are cheap to clone.

use std::sync::Arc;

use comanda_printer::{ConsolePrinter, NetworkPrinter, SharedPrinter};
use shared::models::TabStatus;

use crate::catalog::CatalogLoader;
use crate::core::{BackgroundTasks, Config, PrinterTarget, Result, ServerError};
use crate::printing::{OrderEventListener, PrintService, TicketRenderer};
use crate::session::SessionRegistry;
use crate::store::seed::SeedData;
use crate::store::{Store, TabQuery};
use crate::tabs::TabService;

/// Server state
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | configuration (immutable) |
/// | store | embedded document store |
/// | catalog | menu loader |
/// | tabs | ledger, transitions and their tickets |
/// | print | ticket renderer + printer |
/// | sessions | logged-in sessions by token |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Store,
    pub catalog: CatalogLoader,
    pub tabs: TabService,
    pub print: Arc<PrintService>,
    pub sessions: SessionRegistry,
}

impl ServerState {
    /// Wire the services over an opened store
    pub fn new(config: Config, store: Store, printer: Option<SharedPrinter>) -> Self {
        let renderer = TicketRenderer::new(
            config.receipt_width,
            config.timezone,
            config.store_name.clone(),
        );
        let print = Arc::new(PrintService::new(renderer, printer));
        Self {
            catalog: CatalogLoader::new(store.clone()),
            tabs: TabService::new(store.clone(), print.clone()),
            sessions: SessionRegistry::new(config.session_idle_timeout()),
            config,
            store,
            print,
        }
    }

    /// Initialize from configuration
    ///
    /// 1. work directory
    /// 2. database (work_dir/database_file)
    /// 3. seed file, when configured
    /// 4. printer
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir()?;

        let db_path = config.database_path();
        let store = Store::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Database opened");

        if let Some(seed_file) = &config.seed_file {
            let summary = SeedData::from_file(seed_file)?.apply(&store)?;
            tracing::info!(
                file = %seed_file,
                products = summary.products,
                options = summary.options,
                users = summary.users,
                "Seed data applied"
            );
        }

        let printer = build_printer(&config.printer)?;
        Ok(Self::new(config.clone(), store, printer))
    }

    /// Start background tasks
    ///
    /// - order-event listener over `novo` tabs (when enabled)
    /// - idle session sweeper (when sessions expire)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        if self.config.enable_print_listener {
            let subscription = self.store.subscribe_tabs(TabQuery::status(TabStatus::New));
            let listener = OrderEventListener::new(self.print.clone());
            let shutdown = tasks.shutdown_token();
            tasks.spawn("order_listener", listener.run(subscription, shutdown));
        } else {
            tracing::info!("Order event listener disabled");
        }

        if self.sessions.idle_timeout().is_some() {
            let shutdown = tasks.shutdown_token();
            tasks.spawn("session_sweeper", self.sessions.clone().run_sweeper(shutdown));
        }

        tasks
    }
}

fn build_printer(target: &PrinterTarget) -> Result<Option<SharedPrinter>> {
    let printer: Option<SharedPrinter> = match target {
        PrinterTarget::None => {
            tracing::warn!("No printer configured, tickets will only be logged as not printed");
            None
        }
        PrinterTarget::Console => Some(Arc::new(ConsolePrinter)),
        PrinterTarget::Network(addr) => {
            let printer = NetworkPrinter::from_addr(addr)
                .map_err(|e| ServerError::Config(e.to_string()))?;
            tracing::info!(addr = %printer.addr(), "Network printer configured");
            Some(Arc::new(printer))
        }
    };
    Ok(printer)
}
