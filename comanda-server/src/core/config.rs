use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

/// Where tickets go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterTarget {
    /// No printer: tickets are rendered and logged as not printed
    None,
    /// Ticket text written to the log
    Console,
    /// Raw TCP thermal printer ("host:port", port defaults to 9100)
    Network(String),
}

impl PrinterTarget {
    fn parse(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            None | Some("") | Some("none") => Self::None,
            Some("console") => Self::Console,
            Some(addr) => Self::Network(addr.to_string()),
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | data directory |
/// | DATABASE_FILE | comanda.redb | redb file inside WORK_DIR |
/// | HTTP_PORT | 3000 | HTTP port |
/// | STORE_NAME | ASA DE AGUIA | ticket header |
/// | TIMEZONE | America/Sao_Paulo | business timezone |
/// | RECEIPT_WIDTH | 40 | kitchen/payment ticket width |
/// | PRINTER | (unset) | `console` or `host:port` |
/// | ENABLE_PRINT_LISTENER | true | spawn the order-event listener |
/// | SESSION_IDLE_MINUTES | 480 | idle minutes before a login expires (0 = never) |
/// | SEED_FILE | (unset) | JSON catalog/users seed |
/// | LOG_LEVEL | info | log level |
/// | LOG_DIR | (unset) | daily log files directory |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/comanda PRINTER=192.168.0.50:9100 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_file: String,
    pub http_port: u16,
    /// Name printed on ticket headers
    pub store_name: String,
    pub timezone: Tz,
    pub receipt_width: usize,
    pub printer: PrinterTarget,
    pub enable_print_listener: bool,
    pub session_idle_minutes: u64,
    pub seed_file: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            database_file: std::env::var("DATABASE_FILE")
                .unwrap_or_else(|_| "comanda.redb".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_name: std::env::var("STORE_NAME").unwrap_or_else(|_| "ASA DE AGUIA".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::America::Sao_Paulo),
            receipt_width: std::env::var("RECEIPT_WIDTH")
                .ok()
                .and_then(|w| w.parse().ok())
                .filter(|w| *w >= 24)
                .unwrap_or(40),
            printer: PrinterTarget::parse(std::env::var("PRINTER").ok()),
            enable_print_listener: std::env::var("ENABLE_PRINT_LISTENER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            session_idle_minutes: std::env::var("SESSION_IDLE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(480),
            seed_file: std::env::var("SEED_FILE").ok().filter(|s| !s.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Override the parts tests care about
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// `None` when sessions never expire
    pub fn session_idle_timeout(&self) -> Option<Duration> {
        (self.session_idle_minutes > 0).then(|| Duration::from_secs(self.session_idle_minutes * 60))
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.database_file)
    }

    /// Create the work directory if missing
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printer_target_parse() {
        assert_eq!(PrinterTarget::parse(None), PrinterTarget::None);
        assert_eq!(PrinterTarget::parse(Some(" ".into())), PrinterTarget::None);
        assert_eq!(
            PrinterTarget::parse(Some("console".into())),
            PrinterTarget::Console
        );
        assert_eq!(
            PrinterTarget::parse(Some("10.0.0.9:9100".into())),
            PrinterTarget::Network("10.0.0.9:9100".into())
        );
    }

    #[test]
    fn test_database_path() {
        let mut config = Config::with_overrides("/tmp/comanda", 0);
        config.database_file = "x.redb".into();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/comanda/x.redb"));
    }

    #[test]
    fn test_session_idle_timeout() {
        let mut config = Config::with_overrides("/tmp/comanda", 0);
        config.session_idle_minutes = 0;
        assert_eq!(config.session_idle_timeout(), None);
        config.session_idle_minutes = 30;
        assert_eq!(config.session_idle_timeout(), Some(Duration::from_secs(1800)));
    }
}
