//! Command handlers -- one module per subcommand

pub mod analyze;
pub mod capture;
pub mod history;
pub mod ingredient;
pub mod profile;
pub mod routine;
pub mod search;
pub mod skin;
pub mod theme;

use std::path::Path;

use scanwise_core::application::ScanwiseService;
use scanwise_core::domain::capture::entities::ImagePayload;
use scanwise_core::domain::session::entities::Identity;

use crate::error::CliError;

/// Everything a command handler needs: the wired service aggregate plus
/// the credentials passed on the command line, if any.
pub struct AppContext {
    pub service: ScanwiseService,
    identity: Option<Identity>,
}

impl AppContext {
    pub fn new(service: ScanwiseService, identity: Option<Identity>) -> Self {
        Self { service, identity }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn require_identity(&self) -> Result<&Identity, CliError> {
        self.identity.as_ref().ok_or_else(|| {
            CliError::Auth("pass --uid and --token (or set SCANWISE_UID/SCANWISE_TOKEN)".into())
        })
    }
}

/// Reads an image file into an upload payload, inferring the mime type
/// from the extension.
pub fn load_image(path: &Path) -> Result<ImagePayload, CliError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let mime_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };

    Ok(ImagePayload {
        bytes,
        mime_type: mime_type.to_string(),
        file_name,
    })
}
