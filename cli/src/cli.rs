//! CLI argument parsing using clap's derive API
//!
//! Purely declarative; no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scanwise_core::InputMode;
use scanwise_core::domain::session::entities::Theme;

/// ScanWise -- cosmetic ingredient scanner and analyzer.
///
/// Use `scanwise <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "scanwise", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the analysis backend.
    #[arg(
        long,
        global = true,
        env = "SCANWISE_BACKEND_URL",
        default_value = "http://localhost:8000"
    )]
    pub backend_url: String,

    /// Directory for locally persisted state (theme, routine).
    #[arg(
        long,
        global = true,
        env = "SCANWISE_DATA_DIR",
        default_value = ".scanwise"
    )]
    pub data_dir: PathBuf,

    /// User id for authenticated commands.
    #[arg(long, global = true, env = "SCANWISE_UID")]
    pub uid: Option<String>,

    /// Bearer token for authenticated commands.
    #[arg(long, global = true, env = "SCANWISE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the product index.
    Search(SearchArgs),

    /// Analyze a product for toxicity and wellness match.
    Analyze(Box<AnalyzeArgs>),

    /// Recognize a barcode from a still image, optionally analyzing the hit.
    Scan(ScanArgs),

    /// Extract product details from package photos (OCR).
    Ocr(OcrArgs),

    /// Explain a single ingredient.
    Ingredient(IngredientArgs),

    /// Manage and analyze the skincare routine.
    Routine(RoutineArgs),

    /// Show or update the user profile.
    Profile(ProfileArgs),

    /// Scan history and favorites.
    History(HistoryArgs),

    /// AI skin analysis from a selfie.
    Skin(SkinArgs),

    /// Set the persisted theme preference.
    Theme(ThemeArgs),
}

// ---- search ----

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query (minimum 3 characters).
    pub query: String,
}

// ---- analyze ----

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input mode; decides whether ingredients or barcode are authoritative.
    #[arg(long, value_enum, default_value = "manual")]
    pub mode: ModeArg,

    /// Product name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Comma-separated ingredient list (manual mode).
    #[arg(long)]
    pub ingredients: Option<String>,

    /// Barcode or product identifier (search/scan mode).
    #[arg(long)]
    pub barcode: Option<String>,

    /// Product category (e.g. Moisturizer).
    #[arg(long)]
    pub category: Option<String>,

    #[command(flatten)]
    pub profile: ProfileFields,

    /// Skip merging the remote profile into the form.
    #[arg(long)]
    pub no_profile: bool,
}

/// Profile fields shared by `analyze` and `profile set`.
#[derive(Args, Debug)]
pub struct ProfileFields {
    #[arg(long)]
    pub skin_type: Option<String>,

    #[arg(long)]
    pub skin_tone: Option<String>,

    #[arg(long)]
    pub age_group: Option<String>,

    /// May be repeated.
    #[arg(long = "concern")]
    pub skin_concerns: Vec<String>,

    /// May be repeated.
    #[arg(long = "allergy")]
    pub allergies: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Search,
    Scan,
    Manual,
    Browse,
}

impl From<ModeArg> for InputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Search => InputMode::Search,
            ModeArg::Scan => InputMode::Scan,
            ModeArg::Manual => InputMode::Manual,
            ModeArg::Browse => InputMode::Browse,
        }
    }
}

// ---- scan ----

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the barcode image.
    pub image: PathBuf,

    /// Submit the recognized product for analysis immediately.
    #[arg(long)]
    pub analyze: bool,
}

// ---- ocr ----

#[derive(Args, Debug)]
pub struct OcrArgs {
    /// Front-of-package photo.
    pub front: PathBuf,

    /// Back-of-package photo.
    #[arg(long)]
    pub back: Option<PathBuf>,

    /// Submit the extracted product for analysis immediately.
    #[arg(long)]
    pub analyze: bool,
}

// ---- ingredient ----

#[derive(Args, Debug)]
pub struct IngredientArgs {
    /// Ingredient name, exactly as printed on the label.
    pub name: String,
}

// ---- routine ----

#[derive(Args, Debug)]
pub struct RoutineArgs {
    #[command(subcommand)]
    pub action: RoutineAction,
}

#[derive(Subcommand, Debug)]
pub enum RoutineAction {
    /// Search for a product and add the best match to the routine.
    Add {
        /// Search query.
        query: String,
    },
    /// List routine products.
    List,
    /// Remove a product by its position (zero-based).
    Remove { index: usize },
    /// Remove all products.
    Clear,
    /// Run the conflict analysis (needs at least two products).
    Analyze,
}

// ---- profile ----

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Show the remote profile.
    Show,
    /// Update profile fields; unspecified fields keep their value.
    Set(ProfileFields),
}

// ---- history ----

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List recent scans.
    List,
    /// Delete the entire scan history.
    Clear,
    /// Add a product to favorites.
    Favorite { product_name: String },
}

// ---- skin ----

#[derive(Args, Debug)]
pub struct SkinArgs {
    #[command(subcommand)]
    pub action: SkinAction,
}

#[derive(Subcommand, Debug)]
pub enum SkinAction {
    /// Analyze a selfie and print the skin report.
    Analyze {
        /// Path to the selfie.
        image: PathBuf,

        /// Also fetch the routine guide for the fresh report.
        #[arg(long)]
        guide: bool,
    },
    /// Build the routine guide from the profile's last skin report.
    Guide,
}

// ---- theme ----

#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[arg(value_enum)]
    pub theme: ThemeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_accepts_repeated_concerns() {
        let cli = Cli::parse_from([
            "scanwise", "analyze", "--name", "Cream", "--concern", "acne", "--concern", "redness",
        ]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.profile.skin_concerns, vec!["acne", "redness"]);
            }
            _ => panic!("expected analyze"),
        }
    }
}
