use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gangctl",
    about = "WarpGrid gang scheduling — admission and queue-order inspection",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the admission gate for units in a listing.
    ///
    /// The listing (a JSON array of units) is used both as the units to
    /// evaluate and as the snapshot siblings are counted in.
    Admit {
        /// JSON file holding the unit listing
        #[arg(short, long)]
        units: String,
        /// Only evaluate this unit (namespace/name)
        #[arg(long)]
        unit: Option<String>,
        /// Path to gang.toml (default: built-in labels)
        #[arg(short, long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print units in ready-queue extraction order
    Order {
        /// JSON file holding the unit listing
        #[arg(short, long)]
        units: String,
        /// Only queue units the admission gate allows
        #[arg(long)]
        admitted_only: bool,
        /// Path to gang.toml (default: built-in labels)
        #[arg(short, long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default gang.toml
    Init,
    /// Load and validate a gang.toml
    Check {
        #[arg(short, long, default_value = "gang.toml")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("gangctl=info".parse()?)
        .add_directive("warpgrid_gang=info".parse()?);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Admit {
            units,
            unit,
            config,
            format,
        } => commands::admit::admit(&units, unit.as_deref(), config.as_deref(), &format),
        Commands::Order {
            units,
            admitted_only,
            config,
            format,
        } => commands::order::order(&units, admitted_only, config.as_deref(), &format),
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(),
            ConfigAction::Check { path } => commands::config::check(&path),
        },
    }
}
