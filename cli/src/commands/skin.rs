//! `scanwise skin` command handler

use std::io::Write;

use serde::Serialize;

use scanwise_core::domain::skin::entities::{CategoryGuide, SkinReport};

use crate::cli::{SkinAction, SkinArgs};
use crate::commands::{AppContext, load_image};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub async fn execute(
    args: SkinArgs,
    ctx: &mut AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut skin = ctx.service.skin();

    match args.action {
        SkinAction::Analyze { image, guide } => {
            let payload = load_image(&image)?;
            let report = skin.analyze(payload, ctx.identity()).await?.clone();

            // The backend attaches the report to the account; re-warm the
            // cached profile so later commands see it.
            if let Some(identity) = ctx.identity().cloned() {
                ctx.service.session.login(identity).await;
            }

            let guides = if guide {
                skin.routine_guide().await?
            } else {
                Vec::new()
            };
            writer.render(&SkinOutput { report, guides })
        }
        SkinAction::Guide => {
            let identity = ctx.require_identity()?.clone();
            ctx.service.session.login(identity).await;

            let profile = ctx
                .service
                .session
                .profile()
                .cloned()
                .ok_or_else(|| CliError::Command("could not fetch the profile".into()))?;
            if !skin.adopt_profile_report(&profile) {
                return Err(CliError::Command(
                    "no skin report on file; run `scanwise skin analyze <image>` first".into(),
                ));
            }

            let report = skin
                .report()
                .cloned()
                .unwrap_or_default();
            let guides = skin.routine_guide().await?;
            writer.render(&SkinOutput { report, guides })
        }
    }
}

#[derive(Debug, Serialize)]
struct SkinOutput {
    report: SkinReport,
    guides: Vec<CategoryGuide>,
}

impl Render for SkinOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let r = &self.report;
        writeln!(w, "Skin type: {}", r.skin_type)?;
        for (concern, score) in &r.severity_scores {
            writeln!(w, "  {concern}: {score:.0}%")?;
        }
        if !r.summary.is_empty() {
            writeln!(w, "\n{}", r.summary)?;
        }

        for guide in &self.guides {
            writeln!(w, "\n{}", guide.recommendation.category)?;
            if !guide.recommendation.reason.is_empty() {
                writeln!(w, "  {}", guide.recommendation.reason)?;
            }
            for product in &guide.products {
                writeln!(
                    w,
                    "  - {} ({}% safe)",
                    product.product_name,
                    product.safety_percent()
                )?;
            }
        }
        Ok(())
    }
}
