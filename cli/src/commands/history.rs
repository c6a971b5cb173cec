//! `scanwise history` command handler

use std::io::Write;

use serde::Serialize;

use scanwise_core::domain::history::entities::{FavoriteStatus, ScanHistoryItem};

use crate::cli::{HistoryAction, HistoryArgs};
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub async fn execute(
    args: HistoryArgs,
    ctx: &AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let identity = ctx.require_identity()?;
    let history = ctx.service.history();

    match args.action {
        HistoryAction::List => {
            let items = history.list(identity).await?;
            writer.render(&HistoryOutput { items })
        }
        HistoryAction::Clear => {
            history.clear(identity).await?;
            writer.render(&HistoryOutput { items: Vec::new() })
        }
        HistoryAction::Favorite { product_name } => {
            let status = history.add_favorite(identity, &product_name).await?;
            writer.render(&FavoriteOutput {
                product_name,
                status,
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct HistoryOutput {
    items: Vec<ScanHistoryItem>,
}

impl Render for HistoryOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.items.is_empty() {
            writeln!(w, "No scans yet.")?;
            return Ok(());
        }
        for item in &self.items {
            let when = item
                .timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "----".to_string());
            writeln!(
                w,
                "{when}  {:<30} toxicity {:.2}",
                item.product_name, item.toxicity_score
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct FavoriteOutput {
    product_name: String,
    status: FavoriteStatus,
}

impl Render for FavoriteOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match self.status {
            FavoriteStatus::Added => writeln!(w, "Added \"{}\" to favorites.", self.product_name),
            FavoriteStatus::Exists => {
                writeln!(w, "\"{}\" is already a favorite.", self.product_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_history_renders_the_empty_state() {
        let mut buf = Vec::new();
        HistoryOutput { items: Vec::new() }.render_text(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No scans yet.\n");
    }

    #[test]
    fn listed_items_show_name_and_score() {
        let mut buf = Vec::new();
        let items = vec![ScanHistoryItem::new(
            "uid-1",
            "Example Cream",
            Vec::new(),
            0.42,
        )];
        HistoryOutput { items }.render_text(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Example Cream"));
        assert!(out.contains("toxicity 0.42"));
    }
}
