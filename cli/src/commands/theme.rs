//! `scanwise theme` command handler

use std::io::Write;

use serde::Serialize;

use scanwise_core::domain::session::entities::Theme;

use crate::cli::ThemeArgs;
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

pub fn execute(args: ThemeArgs, ctx: &mut AppContext, writer: &OutputWriter) -> Result<(), CliError> {
    let theme: Theme = args.theme.into();
    ctx.service.session.set_theme(theme);
    writer.render(&ThemeOutput { theme })
}

#[derive(Debug, Serialize)]
struct ThemeOutput {
    theme: Theme,
}

impl Render for ThemeOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let label = match self.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        writeln!(w, "Theme set to {label}.")
    }
}
