//! Printer adapters
//!
//! Supports:
//! - Network printers (TCP port 9100, ESC/POS framing)
//! - Console output (writes the ticket to the log)
//! - In-memory job log (tests, previews)

use crate::error::{PrintError, PrintResult};
use crate::escpos::EscPosFrame;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Trait for printer adapters
///
/// A sink for plain ticket text. `document` is a logical job name used for
/// logging only.
#[async_trait]
pub trait Printer: Send + Sync {
    /// Send ticket text to the printer
    async fn print(&self, document: &str, text: &str) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Shared printer handle
pub type SharedPrinter = Arc<dyn Printer>;

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        Self::from_addr(&format!("{}:{}", host, port))
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    ///
    /// A bare IP gets the default port 9100.
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let parsed: SocketAddr = match addr.parse() {
            Ok(a) => a,
            Err(_) => format!("{}:9100", addr)
                .parse()
                .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?,
        };

        Ok(Self {
            addr: parsed,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

#[async_trait]
impl Printer for NetworkPrinter {
    #[instrument(skip(self, text), fields(addr = %self.addr))]
    async fn print(&self, document: &str, text: &str) -> PrintResult<()> {
        let data = EscPosFrame::new().build(text);
        info!("Connecting to printer");

        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        info!("Connected, sending {} bytes", data.len());

        stream.write_all(&data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write failed: {}", e),
            ))
        })?;

        stream.flush().await?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(skip(self), fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}

/// Console printer
///
/// Writes the ticket text to the log at info level. Useful on machines
/// without a thermal printer.
#[derive(Debug, Clone, Default)]
pub struct ConsolePrinter;

#[async_trait]
impl Printer for ConsolePrinter {
    async fn print(&self, document: &str, text: &str) -> PrintResult<()> {
        info!(document = %document, "\n{}", text);
        Ok(())
    }

    async fn is_online(&self) -> bool {
        true
    }
}

/// A job captured by [`MemoryPrinter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub document: String,
    pub text: String,
}

/// In-memory printer
///
/// Records every job instead of printing. Can be switched offline to
/// exercise failure paths.
#[derive(Debug, Default)]
pub struct MemoryPrinter {
    jobs: Mutex<Vec<PrintJob>>,
    offline: Mutex<bool>,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `print` calls fail with [`PrintError::Offline`]
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    /// Snapshot of recorded jobs, oldest first
    pub fn jobs(&self) -> Vec<PrintJob> {
        self.jobs.lock().clone()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn clear(&self) {
        self.jobs.lock().clear();
    }
}

#[async_trait]
impl Printer for MemoryPrinter {
    async fn print(&self, document: &str, text: &str) -> PrintResult<()> {
        if *self.offline.lock() {
            return Err(PrintError::Offline(document.to_string()));
        }
        self.jobs.lock().push(PrintJob {
            document: document.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn is_online(&self) -> bool {
        !*self.offline.lock()
    }
}
