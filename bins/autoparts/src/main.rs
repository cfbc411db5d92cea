//! Autoparts - fuzzy search over a vehicle-parts inventory
//!
//! Serves the HTTP API and offers the same queries offline from the command
//! line.

use autoparts_search::SearchScope;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;
mod context;
mod output;
mod server;

use commands::{check_config, lookup, search, serve, stats};
use context::AppContext;

/// Fuzzy-search API over a vehicle-parts inventory
#[derive(Parser)]
#[command(name = "autoparts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Inventory JSON file, overrides `[data] path`
    #[arg(short, long, global = true)]
    data: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Socket address, overrides `[server] bind`
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Run a fuzzy search
    Search {
        /// Query text
        query: String,

        /// Fields to search
        #[arg(long, value_enum, default_value_t = ScopeArg::All)]
        field: ScopeArg,

        /// Model year the part must fit
        #[arg(short, long)]
        year: Option<i32>,

        /// Required condition, e.g. "nuevo"
        #[arg(long)]
        condition: Option<String>,

        /// Required quality, e.g. "original"
        #[arg(long)]
        quality: Option<String>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Results per page
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a single record by product id
    Lookup {
        /// Product id
        product_id: String,
    },

    /// Show record count and distinct brands, conditions and qualities
    Stats,

    /// Validate and print the effective configuration
    CheckConfig,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeArg {
    All,
    Brand,
    Description,
}

impl From<ScopeArg> for SearchScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => SearchScope::All,
            ScopeArg::Brand => SearchScope::Brand,
            ScopeArg::Description => SearchScope::Description,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            let code = e
                .downcast_ref::<autoparts_core::Error>()
                .map_or(autoparts_core::error::exit_codes::FAILURE, |err| {
                    err.code.exit_code()
                });
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = context::load_config(cli.config.as_deref(), cli.data.as_deref())?;
    context::init_telemetry(&config, cli.verbose)?;

    match cli.command {
        Commands::Serve { bind } => serve::run(AppContext::load(config)?, bind.as_deref()).await,

        Commands::Search {
            query,
            field,
            year,
            condition,
            quality,
            page,
            limit,
        } => {
            let ctx = AppContext::load(config)?;
            let args = search::SearchArgs {
                query,
                scope: field.into(),
                year,
                condition,
                quality,
                page,
                limit,
            };
            search::run(&ctx, args, cli.format)
        }

        Commands::Lookup { product_id } => {
            lookup::run(&AppContext::load(config)?, &product_id, cli.format)
        }

        Commands::Stats => stats::run(&AppContext::load(config)?, cli.format),

        Commands::CheckConfig => check_config::run(&config, cli.format),
    }
}
