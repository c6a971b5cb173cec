mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scanwise_core::domain::common::{
    BackendConfig, BehaviorConfig, ScanwiseConfig, StorageConfig,
};
use scanwise_core::domain::session::entities::Identity;
use scanwise_core::{CoreError, ScanwiseService};

use crate::cli::{Cli, Commands};
use crate::commands::AppContext;
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(err) = run(cli).await {
        // Connectivity failures get the retry-prompting message; everything
        // else renders its own text.
        match &err {
            CliError::Core(core) if core.is_retryable() => {
                eprintln!("Failed to connect to the server. Please try again.");
            }
            _ => eprintln!("error: {err}"),
        }
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(cli.log_level.as_deref().unwrap_or("warn"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ScanwiseConfig {
        backend: BackendConfig {
            base_url: cli.backend_url.clone(),
            ..BackendConfig::default()
        },
        storage: StorageConfig {
            data_dir: cli.data_dir.clone(),
        },
        behavior: BehaviorConfig::default(),
    };

    let identity = match (&cli.uid, &cli.token) {
        (Some(uid), Some(token)) => Some(Identity::new(uid.clone(), token.clone())),
        (None, None) => None,
        _ => {
            return Err(CliError::Config(
                "--uid and --token must be passed together".into(),
            ));
        }
    };

    let service = ScanwiseService::new(config).map_err(|err| match err {
        CoreError::Storage(msg) => CliError::Config(format!("cannot open data dir: {msg}")),
        other => CliError::Core(other),
    })?;
    let mut ctx = AppContext::new(service, identity);
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Search(args) => commands::search::execute(args, &ctx, &writer).await,
        Commands::Analyze(args) => commands::analyze::execute(*args, &mut ctx, &writer).await,
        Commands::Scan(args) => commands::capture::scan(args, &mut ctx, &writer).await,
        Commands::Ocr(args) => commands::capture::ocr(args, &mut ctx, &writer).await,
        Commands::Ingredient(args) => commands::ingredient::execute(args, &ctx, &writer).await,
        Commands::Routine(args) => commands::routine::execute(args, &ctx, &writer).await,
        Commands::Profile(args) => commands::profile::execute(args, &mut ctx, &writer).await,
        Commands::History(args) => commands::history::execute(args, &ctx, &writer).await,
        Commands::Skin(args) => commands::skin::execute(args, &mut ctx, &writer).await,
        Commands::Theme(args) => commands::theme::execute(args, &mut ctx, &writer),
    }
}
