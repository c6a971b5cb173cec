//! `scanwise ingredient` command handler

use std::io::Write;

use serde::Serialize;

use scanwise_core::domain::ingredient::entities::IngredientExplanation;

use crate::cli::IngredientArgs;
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub async fn execute(
    args: IngredientArgs,
    ctx: &AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let explanation = ctx.service.explainer().explain(&args.name).await?;

    writer.render(&IngredientOutput {
        name: args.name,
        explanation,
    })
}

#[derive(Debug, Serialize)]
struct IngredientOutput {
    name: String,
    explanation: IngredientExplanation,
}

impl Render for IngredientOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let e = &self.explanation;
        writeln!(w, "{}", self.name)?;
        writeln!(w, "  {}", e.description)?;

        if e.is_legacy() {
            if let Some(risk) = &e.risk_level {
                writeln!(w, "  risk level: {risk}")?;
            }
            if let Some(uses) = &e.common_uses {
                writeln!(w, "  common uses: {uses}")?;
            }
            if let Some(side_effects) = &e.side_effects {
                writeln!(w, "  side effects: {side_effects}")?;
            }
            return Ok(());
        }

        if !e.functions.is_empty() {
            writeln!(w, "  functions: {}", e.functions.join(", "))?;
        }
        for fact in &e.quick_facts {
            writeln!(w, "  - {fact}")?;
        }
        Ok(())
    }
}
