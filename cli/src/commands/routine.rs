//! `scanwise routine` command handler

use std::io::Write;

use serde::Serialize;

use scanwise_core::domain::routine::entities::{RoutineAnalysis, RoutineProduct};

use crate::cli::{RoutineAction, RoutineArgs};
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub async fn execute(
    args: RoutineArgs,
    ctx: &AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut routine = ctx.service.routine();

    match args.action {
        RoutineAction::Add { query } => {
            let mut autocomplete = ctx.service.autocomplete();
            let suggestions = autocomplete.lookup(&query).await;
            let Some(best) = suggestions.first().cloned() else {
                return Err(CliError::Command(format!("no product found for \"{query}\"")));
            };

            let added = routine.add(&best).await?;
            if !added {
                return Err(CliError::Command(format!(
                    "\"{}\" is already in the routine",
                    best.product_name
                )));
            }
            writer.render(&RoutineListOutput {
                products: routine.products().to_vec(),
            })
        }
        RoutineAction::List => writer.render(&RoutineListOutput {
            products: routine.products().to_vec(),
        }),
        RoutineAction::Remove { index } => {
            if index >= routine.products().len() {
                return Err(CliError::Command(format!("no routine entry at {index}")));
            }
            routine.remove(index);
            writer.render(&RoutineListOutput {
                products: routine.products().to_vec(),
            })
        }
        RoutineAction::Clear => {
            routine.clear();
            writer.render(&RoutineListOutput {
                products: Vec::new(),
            })
        }
        RoutineAction::Analyze => {
            let analysis = routine.analyze().await?;
            writer.render(&RoutineAnalysisOutput { analysis })
        }
    }
}

#[derive(Debug, Serialize)]
struct RoutineListOutput {
    products: Vec<RoutineProduct>,
}

impl Render for RoutineListOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.products.is_empty() {
            writeln!(w, "The routine is empty.")?;
            return Ok(());
        }
        for (i, p) in self.products.iter().enumerate() {
            writeln!(w, "{i}. {} ({} ingredients)", p.name, p.ingredients.len())?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct RoutineAnalysisOutput {
    analysis: RoutineAnalysis,
}

impl Render for RoutineAnalysisOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.analysis.conflicts.is_empty() {
            writeln!(w, "No conflicts found.")?;
        } else {
            writeln!(w, "Conflicts:")?;
            for c in &self.analysis.conflicts {
                writeln!(w, "  {} + {}: {}", c.product1, c.product2, c.reason)?;
            }
        }
        if !self.analysis.analysis.is_empty() {
            writeln!(w, "\n{}", self.analysis.analysis)?;
        }
        Ok(())
    }
}
