//! Ticket renderer
//!
//! Renders tabs into fixed-width plain text. Every rendering is a pure
//! function of its inputs: same tab, same text.

use chrono_tz::Tz;
use comanda_printer::TicketBuilder;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{CartLine, Tab};

use crate::utils::time::format_millis;

/// Width of the cupom served over HTTP
pub const CUPOM_WIDTH: usize = 32;

const MISSING: &str = "N/A";

/// Ticket renderer
///
/// Kitchen and payment tickets use the configured width; the cupom is
/// always [`CUPOM_WIDTH`] wide.
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    width: usize,
    timezone: Tz,
    store_name: String,
}

impl TicketRenderer {
    pub fn new(width: usize, timezone: Tz, store_name: impl Into<String>) -> Self {
        Self {
            width,
            timezone,
            store_name: store_name.into(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Kitchen ticket for `lines` only
    pub fn render_kitchen_delta(
        &self,
        identifier: &str,
        waiter: &str,
        timestamp: Option<i64>,
        lines: &[CartLine],
    ) -> String {
        let mut b = TicketBuilder::new(self.width);

        b.sep_double();
        b.center(&format!("COMANDA - {}", self.store_name));
        b.sep_double();
        b.line(&format!(
            "Comanda: {}   |   Garçom: {}",
            or_missing(identifier),
            or_missing(waiter)
        ));
        if let Some(time) = timestamp.and_then(|ts| self.format(ts, "%H:%M:%S")) {
            b.line(&format!("Horário do Pedido: {}", time));
        }
        b.sep_single();

        for line in lines {
            b.line(&item_label(line));
            if let Some(note) = line.note.as_deref().filter(|n| !n.trim().is_empty()) {
                b.line(&format!("  > Obs: {}", note));
            }
        }

        b.sep_double();
        b.feed(3);
        b.finalize()
    }

    /// Kitchen ticket with every item of the tab
    pub fn render_kitchen_tab(&self, tab: &Tab) -> String {
        self.render_kitchen_delta(&tab.identifier, &tab.waiter, tab.timestamp, &tab.items)
    }

    /// Payment ticket for the whole tab, closed at `closed_at` (unix millis)
    pub fn render_payment(&self, tab: &Tab, closed_at: i64) -> String {
        let mut b = TicketBuilder::new(self.width);

        b.sep_double();
        b.center(&self.store_name);
        b.center("CONTA");
        b.sep_double();
        b.line(&format!("Comanda: {}", or_missing(&tab.identifier)));
        b.line(&format!("Garçom: {}", or_missing(&tab.waiter)));
        let closed = self
            .format(closed_at, "%d/%m/%Y %H:%M")
            .unwrap_or_else(|| MISSING.to_string());
        b.line(&format!("Fechamento: {}", closed));
        b.sep_single();

        for line in &tab.items {
            b.line_lr(&item_label(line), &format!("R${}", money(line.line_total())));
        }

        b.sep_single();
        b.right(&format!("TOTAL: R${}", money(tab.total)));
        b.sep_double();
        b.center("Obrigado pela preferência!");
        b.feed(3);
        b.finalize()
    }

    /// Two-section cupom: everything for the kitchen, then a tear-off
    /// section for items whose name contains "creme"
    pub fn render_cupom(&self, tab: &Tab) -> String {
        let mut b = TicketBuilder::new(CUPOM_WIDTH);
        let order_line = format!("PEDIDO: {} | CLIENTE: {}", tab.id, or_missing(&tab.identifier));
        let date = tab
            .timestamp
            .and_then(|ts| self.format(ts, "%d/%m/%Y %H:%M"))
            .unwrap_or_else(|| MISSING.to_string());

        b.line(&format!("       {}", self.store_name));
        b.line("       VIA COZINHA");
        b.sep_single();
        b.line(&order_line);
        b.line(&format!("DATA: {}", date));
        b.sep_single();

        let mut total = Decimal::ZERO;
        for line in &tab.items {
            let line_total = line.line_total();
            total += line_total;
            b.line_fill(&item_label(line), &cupom_money(line_total), '.');
        }

        b.sep_single();
        b.line_fill("TOTAL:", &cupom_money(total), ' ');

        let creams: Vec<&CartLine> = tab.items.iter().filter(|l| is_cream(&l.name)).collect();
        if !creams.is_empty() {
            b.newline();
            b.sep_single();
            b.line("        VIA CREMES");
            b.sep_single();
            b.line(&order_line);
            b.sep_single();
            for line in creams {
                b.line(&item_label(line));
            }
            b.sep_single();
        }

        b.feed(3);
        b.finalize()
    }

    fn format(&self, ts: i64, fmt: &str) -> Option<String> {
        format_millis(ts, self.timezone, fmt)
    }
}

/// Name-based split for the cream station
fn is_cream(name: &str) -> bool {
    name.to_lowercase().contains("creme")
}

fn item_label(line: &CartLine) -> String {
    let name = if line.name.trim().is_empty() {
        "Item desconhecido"
    } else {
        line.name.as_str()
    };
    format!("{}x {}", line.quantity, name)
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() { MISSING } else { value }
}

/// Two decimals, half away from zero
pub fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// `R$` plus the amount right-aligned in 7 columns
fn cupom_money(value: Decimal) -> String {
    format!("R${:>7}", money(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Sao_Paulo;
    use shared::models::IdentifierType;

    // 21/07/2025 02:28 in Sao Paulo
    const TS: i64 = 1_753_075_680_000;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn renderer(width: usize) -> TicketRenderer {
        TicketRenderer::new(width, Sao_Paulo, "ASA DE AGUIA")
    }

    fn sample_tab() -> Tab {
        Tab::open(
            "123",
            "Mesa 05",
            IdentifierType::Table,
            "joao",
            vec![
                CartLine::new("Coca-Cola Lata", d("5.00"), 2),
                CartLine::new("Porcao de Fritas G", d("25.00"), 1),
                CartLine::new("Creme de Acai 500ml", d("18.00"), 1),
                CartLine::new("X-Burger Especial", d("20.00"), 1),
            ],
            TS,
        )
    }

    #[test]
    fn test_cupom_golden() {
        let text = renderer(40).render_cupom(&sample_tab());
        let expected = "       ASA DE AGUIA\n\
                        \x20      VIA COZINHA\n\
                        --------------------------------\n\
                        PEDIDO: 123 | CLIENTE: Mesa 05\n\
                        DATA: 21/07/2025 02:28\n\
                        --------------------------------\n\
                        2x Coca-Cola Lata......R$  10.00\n\
                        1x Porcao de Fritas G..R$  25.00\n\
                        1x Creme de Acai 500ml.R$  18.00\n\
                        1x X-Burger Especial...R$  20.00\n\
                        --------------------------------\n\
                        TOTAL:                 R$  73.00\n\
                        \n\
                        --------------------------------\n\
                        \x20       VIA CREMES\n\
                        --------------------------------\n\
                        PEDIDO: 123 | CLIENTE: Mesa 05\n\
                        --------------------------------\n\
                        1x Creme de Acai 500ml\n\
                        --------------------------------\n\
                        \n\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_cupom_without_creams_has_one_section() {
        let mut tab = sample_tab();
        tab.items.retain(|l| !l.name.contains("Creme"));
        let text = renderer(40).render_cupom(&tab);
        assert!(!text.contains("VIA CREMES"));
        assert!(text.ends_with("TOTAL:                 R$  55.00\n\n\n\n"));
    }

    #[test]
    fn test_cupom_clips_long_lines_and_matches_any_case() {
        let tab = Tab::open(
            "1",
            "Ana",
            IdentifierType::Client,
            "joao",
            vec![CartLine::new("CREME DE CUPUACU COM LEITE NINHO", d("22.00"), 1)],
            TS,
        );
        let text = renderer(40).render_cupom(&tab);
        assert!(text.contains("\n1x CREME DE CUPUACU COM LEITE NI\n"));
        assert!(text.contains("VIA CREMES"));
    }

    #[test]
    fn test_kitchen_delta_golden() {
        let lines = vec![
            CartLine::new("X com Bacon", d("13.00"), 2).with_note("sem cebola"),
            CartLine::new("Coca", d("5.00"), 1),
        ];
        let text = renderer(30).render_kitchen_delta("Mesa 5", "joao", Some(TS), &lines);
        let expected = "==============================\n    \
                        COMANDA - ASA DE AGUIA\n\
                        ==============================\n\
                        Comanda: Mesa 5   |   Garçom: joao\n\
                        Horário do Pedido: 02:28:00\n\
                        ------------------------------\n\
                        2x X com Bacon\n  \
                        > Obs: sem cebola\n\
                        1x Coca\n\
                        ==============================\n\
                        \n\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_kitchen_ticket_tolerates_missing_fields() {
        let lines = vec![CartLine::new("", d("1.00"), 1)];
        let text = renderer(30).render_kitchen_delta("", " ", None, &lines);
        assert!(text.contains("Comanda: N/A   |   Garçom: N/A\n"));
        assert!(!text.contains("Horário"));
        assert!(text.contains("1x Item desconhecido\n"));
    }

    #[test]
    fn test_payment_ticket() {
        let tab = sample_tab();
        let text = renderer(40).render_payment(&tab, TS);

        assert!(text.contains("Comanda: Mesa 05\n"));
        assert!(text.contains("Garçom: joao\n"));
        assert!(text.contains("Fechamento: 21/07/2025 02:28\n"));
        assert!(text.contains(&format!("2x Coca-Cola Lata{}R$10.00\n", " ".repeat(16))));
        assert!(text.contains(&format!("{}TOTAL: R$73.00\n", " ".repeat(26))));
        assert!(text.contains("Obrigado pela preferência!"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let r = renderer(40);
        let tab = sample_tab();
        assert_eq!(r.render_cupom(&tab), r.render_cupom(&tab));
        assert_eq!(r.render_payment(&tab, TS), r.render_payment(&tab, TS));
        assert_eq!(r.render_kitchen_tab(&tab), r.render_kitchen_tab(&tab));
    }

    #[test]
    fn test_money() {
        assert_eq!(money(d("15")), "15.00");
        assert_eq!(money(d("2.345")), "2.35");
        assert_eq!(cupom_money(d("1234.5")), "R$1234.50");
    }
}
