//! `scanwise profile` command handler

use std::io::Write;

use serde::Serialize;

use scanwise_core::domain::session::entities::UserProfile;

use crate::cli::{ProfileAction, ProfileArgs, ProfileFields};
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub async fn execute(
    args: ProfileArgs,
    ctx: &mut AppContext,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let identity = ctx.require_identity()?.clone();
    ctx.service.session.login(identity).await;

    match args.action {
        ProfileAction::Show => {
            let profile = ctx.service.session.refresh_profile().await?.clone();
            writer.render(&ProfileOutput { profile })
        }
        ProfileAction::Set(fields) => {
            let mut profile = ctx.service.session.profile().cloned().unwrap_or_default();
            merge_fields(&mut profile, fields);
            ctx.service.session.save_profile(&profile).await?;

            let profile = ctx.service.session.profile().cloned().unwrap_or(profile);
            writer.render(&ProfileOutput { profile })
        }
    }
}

/// Unspecified flags keep the remote value.
fn merge_fields(profile: &mut UserProfile, fields: ProfileFields) {
    if fields.skin_type.is_some() {
        profile.skin_type = fields.skin_type;
    }
    if fields.skin_tone.is_some() {
        profile.skin_tone = fields.skin_tone;
    }
    if fields.age_group.is_some() {
        profile.age_group = fields.age_group;
    }
    if !fields.skin_concerns.is_empty() {
        profile.skin_concerns = fields.skin_concerns;
    }
    if !fields.allergies.is_empty() {
        profile.allergies = fields.allergies;
    }
}

#[derive(Debug, Serialize)]
struct ProfileOutput {
    profile: UserProfile,
}

impl Render for ProfileOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let p = &self.profile;
        writeln!(w, "skin type:  {}", p.skin_type.as_deref().unwrap_or("-"))?;
        writeln!(w, "skin tone:  {}", p.skin_tone.as_deref().unwrap_or("-"))?;
        writeln!(w, "age group:  {}", p.age_group.as_deref().unwrap_or("-"))?;
        writeln!(w, "concerns:   {}", join_or_dash(&p.skin_concerns))?;
        writeln!(w, "allergies:  {}", join_or_dash(&p.allergies))?;
        if let Some(report) = &p.latest_skin_report {
            writeln!(w, "last skin scan: {}", report.skin_type)?;
        }
        Ok(())
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
