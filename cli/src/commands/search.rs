//! `scanwise search` command handler

use std::io::Write;

use serde::Serialize;

use scanwise_core::domain::search::entities::ProductSuggestion;

use crate::cli::SearchArgs;
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub async fn execute(
    args: SearchArgs,
    ctx: &AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut autocomplete = ctx.service.autocomplete();
    let suggestions = autocomplete.lookup(&args.query).await.to_vec();

    writer.render(&SearchOutput {
        query: args.query,
        suggestions,
    })
}

#[derive(Debug, Serialize)]
struct SearchOutput {
    query: String,
    suggestions: Vec<ProductSuggestion>,
}

impl Render for SearchOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.suggestions.is_empty() {
            writeln!(w, "No products found for \"{}\".", self.query)?;
            return Ok(());
        }
        for (i, s) in self.suggestions.iter().enumerate() {
            writeln!(w, "{:>2}. {} ({}) [{}]", i + 1, s.product_name, s.brands, s.id)?;
        }
        Ok(())
    }
}
