//! Tab Model (collection `pedidos`)
//!
//! A tab ("comanda") accumulates cart lines for one table or client until it
//! is paid. Lifecycle: `novo` -> `pago` -> `pronto`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tab status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabStatus {
    /// Open, still accepting items
    #[serde(rename = "novo")]
    New,
    #[serde(rename = "pago")]
    Paid,
    /// Terminal
    #[serde(rename = "pronto")]
    Ready,
}

impl TabStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "novo",
            Self::Paid => "pago",
            Self::Ready => "pronto",
        }
    }

    /// The only status this one may move to
    pub fn next(&self) -> Option<TabStatus> {
        match self {
            Self::New => Some(Self::Paid),
            Self::Paid => Some(Self::Ready),
            Self::Ready => None,
        }
    }

    pub fn can_transition_to(&self, target: TabStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for TabStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TabStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novo" => Ok(Self::New),
            "pago" => Ok(Self::Paid),
            "pronto" => Ok(Self::Ready),
            other => Err(format!("unknown tab status: {}", other)),
        }
    }
}

/// What the tab identifier refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierType {
    #[default]
    #[serde(rename = "Mesa")]
    Table,
    #[serde(rename = "Cliente")]
    Client,
}

/// Who a new order is for: a table number or a client name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TabTarget {
    Table(u32),
    Client(String),
}

impl TabTarget {
    /// Identifier stored on the tab ("Mesa 5" or the client name)
    pub fn identifier(&self) -> String {
        match self {
            Self::Table(number) => format!("Mesa {}", number),
            Self::Client(name) => name.trim().to_string(),
        }
    }

    pub fn identifier_type(&self) -> IdentifierType {
        match self {
            Self::Table(_) => IdentifierType::Table,
            Self::Client(_) => IdentifierType::Client,
        }
    }

    /// A client target needs a non-blank name
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Table(number) => *number >= 1,
            Self::Client(name) => !name.trim().is_empty(),
        }
    }
}

/// One composed item with its frozen unit price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "preco_unitario", default)]
    pub unit_price: Decimal,
    #[serde(rename = "quantidade", default = "default_quantity")]
    pub quantity: u32,
    #[serde(rename = "obs", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl CartLine {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }

    /// unit_price × quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Σ line totals
pub fn lines_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Persisted tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "identificador", default)]
    pub identifier: String,
    #[serde(rename = "tipo_identificador", default)]
    pub identifier_type: IdentifierType,
    #[serde(rename = "garcom", default)]
    pub waiter: String,
    #[serde(rename = "itens", default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total: Decimal,
    pub status: TabStatus,
    /// Server time of creation or last append (unix millis)
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl Tab {
    /// New open tab holding `lines`
    pub fn open(
        id: impl Into<String>,
        identifier: impl Into<String>,
        identifier_type: IdentifierType,
        waiter: impl Into<String>,
        lines: Vec<CartLine>,
        now: i64,
    ) -> Self {
        let total = lines_total(&lines);
        Self {
            id: id.into(),
            identifier: identifier.into(),
            identifier_type,
            waiter: waiter.into(),
            items: lines,
            total,
            status: TabStatus::New,
            timestamp: Some(now),
        }
    }

    /// Append lines, growing the total by exactly their sum
    pub fn append(&mut self, lines: &[CartLine], now: i64) {
        self.total += lines_total(lines);
        self.items.extend_from_slice(lines);
        self.timestamp = Some(now);
    }

    pub fn is_open(&self) -> bool {
        self.status == TabStatus::New
    }

    /// Recomputed Σ over items (should always equal `total`)
    pub fn items_total(&self) -> Decimal {
        lines_total(&self.items)
    }
}
