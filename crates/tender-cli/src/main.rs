mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tender_core::config::load_config;
use tender_core::tools::ToolKit;

#[derive(Parser)]
#[command(
    name = "tender",
    version,
    about = "Tender document screening and pricing toolkit"
)]
struct Cli {
    /// TOML config file (pricing defaults, report title, market band)
    #[arg(long, global = true, env = "TENDER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a tender document (PDF, DOCX, XLSX or text) for pricing content
    Detect {
        /// Path to the tender document
        file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Build an editable pricing model from a company rate sheet
    BuildModel {
        /// Short description of the tender
        #[arg(short, long, default_value = "")]
        description: String,

        /// File with the tender's pricing rules (free text)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Rate sheet file: `description, unit_cost[, unit[, quantity]]` per line
        #[arg(long, value_name = "FILE")]
        rates: PathBuf,

        /// Write the model JSON to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Price a pricing model (JSON file, or - for stdin)
    Calculate {
        model_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Rough price band for an item
    MarketPrices {
        item: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Render a calculation result (JSON file, or - for stdin) as an HTML report
    RenderReport {
        pricing_file: PathBuf,

        /// Write the HTML to a file instead of printing the JSON response
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Wrap a finished HTML report for delivery
    FinalOutput { html_file: PathBuf },
    /// Call a tool by name with JSON arguments (file, or stdin when omitted)
    Call {
        tool: String,

        #[arg(value_name = "ARGS_FILE")]
        args: Option<PathBuf>,
    },
    /// List the available tools
    Tools,
    /// Inspect or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write a config file with all defaults
    Init {
        #[arg(default_value = "tender.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbose {
        0 => "tender_core=info,tender=info",
        1 => "tender_core=debug,tender=debug",
        _ => "tender_core=trace,tender=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout carries command output; logs go to stderr
    match cli.log_format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        tracing::debug!(
            source = %cli
                .config
                .as_ref()
                .map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
            currency = %config.pricing.currency,
            "loaded configuration"
        );
        let kit = ToolKit::new(config);
        match cli.command {
            Commands::Detect { file, output } => commands::detect::run(&kit, &file, &output),
            Commands::BuildModel {
                description,
                rules,
                rates,
                out,
            } => commands::model::build(&kit, &description, rules.as_deref(), &rates, out),
            Commands::Calculate { model_file, output } => {
                commands::model::calculate(&kit, &model_file, &output)
            }
            Commands::MarketPrices { item, output } => commands::market::run(&kit, &item, &output),
            Commands::RenderReport { pricing_file, out } => {
                commands::report::render(&kit, &pricing_file, out)
            }
            Commands::FinalOutput { html_file } => commands::report::finalize(&kit, &html_file),
            Commands::Call { tool, args } => commands::call::run(&kit, &tool, args.as_deref()),
            Commands::Tools => commands::call::list(),
            Commands::Config { action } => match action {
                ConfigAction::Show => commands::config::show(kit.config()),
                ConfigAction::Init { path, force } => commands::config::init(&path, force),
            },
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
