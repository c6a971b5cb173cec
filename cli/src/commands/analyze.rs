//! `scanwise analyze` command handler

use std::io::Write;

use serde::Serialize;
use tracing::warn;

use scanwise_core::AnalysisWorkflow;
use scanwise_core::domain::analysis::entities::{AlternativeProduct, AnalysisResult, ProductStatus};
use scanwise_core::domain::analysis::ports::AnalysisGateway;
use scanwise_core::domain::session::ports::AccountGateway;

use crate::cli::{AnalyzeArgs, ProfileFields};
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub async fn execute(
    args: AnalyzeArgs,
    ctx: &mut AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut workflow = ctx.service.workflow();
    workflow.set_mode(args.mode.into());

    {
        let form = workflow.form_mut();
        form.product_name = args.name;
        if let Some(ingredients) = args.ingredients {
            form.ingredients_list = ingredients;
        }
        if let Some(barcode) = args.barcode {
            form.barcode = barcode;
        }
        if let Some(category) = args.category {
            form.category = category;
        }
    }
    apply_profile_fields(&mut workflow, &args.profile);

    if !args.no_profile
        && let Some(identity) = ctx.identity().cloned()
    {
        ctx.service.session.login(identity).await;
        if let Some(profile) = ctx.service.session.profile() {
            workflow.apply_profile(profile);
        }
    }

    submit_and_render(&mut workflow, ctx, writer).await
}

fn apply_profile_fields<A, AC>(workflow: &mut AnalysisWorkflow<A, AC>, fields: &ProfileFields)
where
    A: AnalysisGateway,
    AC: AccountGateway,
{
    let form = workflow.form_mut();
    if let Some(v) = &fields.skin_type {
        form.set_skin_type(v.clone());
    }
    if let Some(v) = &fields.skin_tone {
        form.set_skin_tone(v.clone());
    }
    if let Some(v) = &fields.age_group {
        form.set_age_group(v.clone());
    }
    if !fields.skin_concerns.is_empty() {
        form.set_skin_concerns(fields.skin_concerns.clone());
    }
    if !fields.allergies.is_empty() {
        form.set_allergies(fields.allergies.clone());
    }
}

/// Shared tail of `analyze`, `scan --analyze` and `ocr --analyze`.
pub(crate) async fn submit_and_render<A, AC>(
    workflow: &mut AnalysisWorkflow<A, AC>,
    ctx: &AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError>
where
    A: AnalysisGateway,
    AC: AccountGateway,
{
    let result = workflow.submit(ctx.identity()).await?.clone();
    if result.product_toxicity_score > 0.7 {
        warn!(
            score = result.product_toxicity_score,
            "product scored in the high-risk band"
        );
    }

    writer.render(&AnalysisOutput {
        alternatives: workflow.alternatives().to_vec(),
        result,
    })
}

#[derive(Debug, Serialize)]
struct AnalysisOutput {
    result: AnalysisResult,
    alternatives: Vec<AlternativeProduct>,
}

fn status_label(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Safe => "SAFE",
        ProductStatus::Moderate => "MODERATE",
        ProductStatus::Toxic => "TOXIC",
    }
}

impl Render for AnalysisOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let r = &self.result;
        writeln!(w, "{}", r.product_name)?;
        writeln!(
            w,
            "  status: {}  toxicity: {:.2}",
            status_label(r.product_status),
            r.product_toxicity_score
        )?;
        if let Some(category) = &r.category {
            writeln!(w, "  category: {category}")?;
        }
        if let Some(breakdown) = &r.detailed_score_breakdown {
            writeln!(
                w,
                "  base score: {:.2}  usage factor: {:.2}",
                breakdown.base_score, breakdown.usage_factor
            )?;
        }

        if !r.toxicity_report.is_empty() {
            writeln!(w, "\nIngredients:")?;
            for entry in &r.toxicity_report {
                writeln!(w, "  {:<14} {}", entry.label.as_str(), entry.ingredient)?;
            }
        } else if !r.ingredients.is_empty() {
            writeln!(w, "\nIngredients: {}", r.ingredients.join(", "))?;
        }

        if !r.not_suitable_for_skin_type.is_empty() {
            writeln!(
                w,
                "\nNot suited to your skin type: {}",
                r.not_suitable_for_skin_type.join(", ")
            )?;
        }
        if !r.not_suitable_for_skin_tone.is_empty() {
            writeln!(
                w,
                "Not suited to your skin tone: {}",
                r.not_suitable_for_skin_tone.join(", ")
            )?;
        }

        if let Some(wellness) = &r.wellness_match {
            writeln!(
                w,
                "\nWellness match: {:.0}% ({})",
                wellness.score, wellness.match_level
            )?;
            if !wellness.allergy_matches.is_empty() {
                writeln!(w, "  contains allergens: {}", wellness.allergy_matches.join(", "))?;
            }
        }

        if !r.dupes.is_empty() {
            writeln!(w, "\nDupes:")?;
            for dupe in &r.dupes {
                write!(
                    w,
                    "  {} ({})",
                    dupe.product_name,
                    dupe.brand.as_deref().unwrap_or("Unknown")
                )?;
                if let Some(score) = dupe.toxicity_score {
                    write!(w, "  toxicity {score:.2}")?;
                }
                writeln!(w)?;
                if let Some(reason) = &dupe.reason {
                    writeln!(w, "    {reason}")?;
                }
            }
        }

        if !self.alternatives.is_empty() {
            writeln!(w, "\nSafer alternatives:")?;
            for alt in &self.alternatives {
                writeln!(
                    w,
                    "  {} ({})  toxicity {:.2}",
                    alt.product_name,
                    alt.brand.as_deref().unwrap_or("Unknown"),
                    alt.toxicity_score
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use scanwise_core::domain::analysis::entities::{DupeProduct, ScoreBreakdown};

    use super::*;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            product_name: "Example Cream".to_string(),
            category: Some("moisturizer".to_string()),
            product_toxicity_score: 0.42,
            product_status: ProductStatus::Moderate,
            ingredients: Vec::new(),
            toxicity_report: Vec::new(),
            not_suitable_for_skin_type: Vec::new(),
            not_suitable_for_skin_tone: Vec::new(),
            wellness_match: None,
            detailed_score_breakdown: Some(ScoreBreakdown {
                base_score: 0.35,
                usage_factor: 1.20,
            }),
            efficacy_report: None,
            dupes: vec![DupeProduct {
                product_name: "Budget Cream".to_string(),
                brand: Some("Acme".to_string()),
                toxicity_score: Some(0.21),
                reason: Some("same humectant base".to_string()),
            }],
            routine_report: None,
        }
    }

    #[test]
    fn text_output_includes_score_breakdown_and_dupes() {
        let output = AnalysisOutput {
            result: sample_result(),
            alternatives: Vec::new(),
        };
        let mut buf = Vec::new();
        output.render_text(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("base score: 0.35  usage factor: 1.20"));
        assert!(text.contains("Dupes:"));
        assert!(text.contains("Budget Cream (Acme)  toxicity 0.21"));
        assert!(text.contains("same humectant base"));
    }
}
