use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{BarChart, Block, Borders, Paragraph};
use ratatui::Frame;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::errors::YarikuriError;
use crate::ledger::MonthRecord;
use crate::YarikuriConfig;

use super::{open_widget, widget_action, TuiAction, TuiWidget};

/// Prints the textual breakdown of one summary, then opens the full-screen
/// distribution chart for it.
pub fn show(
    record: &MonthRecord,
    title: &str,
    config: &YarikuriConfig,
) -> Result<(), YarikuriError> {
    println!("\nSummary of {title}:");
    for (category, amount) in record.entries() {
        println!("  {}: {:.2}{}", category, amount, config.currency);
    }
    println!("\nTotal: {:.2}{}", record.total(), config.currency);

    open_widget(DistributionChart::new(record, title, config))
}

/// Full-screen view of one summary: a breakdown panel with each category's
/// share of the total and a bar per category below it.
pub struct DistributionChart {
    title: String,
    bars: Vec<(&'static str, u64)>,
    breakdown: Vec<String>,
    total: Decimal,
    currency: char,
}

impl DistributionChart {
    pub fn new(record: &MonthRecord, title: impl Into<String>, config: &YarikuriConfig) -> Self {
        let total = record.total();
        let bars = record
            .entries()
            .map(|(category, amount)| {
                (category.label(), amount.round().to_u64().unwrap_or(0))
            })
            .collect();
        let breakdown = record
            .entries()
            .map(|(category, amount)| {
                let share = if total.is_zero() {
                    Decimal::ZERO
                } else {
                    amount * Decimal::ONE_HUNDRED / total
                };
                format!(
                    "{:<14} {:>10.2}{}  {:>5.1}%",
                    category.label(),
                    amount,
                    config.currency,
                    share
                )
            })
            .collect();
        Self {
            title: title.into(),
            bars,
            breakdown,
            total,
            currency: config.currency,
        }
    }
}

impl TuiWidget for DistributionChart {
    fn handle_events(&mut self) -> Option<TuiAction> {
        widget_action()
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(self.breakdown.len() as u16 + 2),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.size());

        let breakdown = Paragraph::new(self.breakdown.join("\n")).block(
            Block::default()
                .title(format!(
                    "{} (Total: {:.2}{})",
                    self.title, self.total, self.currency
                ))
                .borders(Borders::ALL),
        );
        frame.render_widget(breakdown, chunks[0]);

        let bars = BarChart::default()
            .block(
                Block::default()
                    .title("Share per category")
                    .borders(Borders::ALL),
            )
            .data(&self.bars)
            .bar_width(12)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(bars, chunks[1]);

        let footer = Paragraph::new("q / Esc / Enter: close");
        frame.render_widget(footer, chunks[2]);
    }
}
