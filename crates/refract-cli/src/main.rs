//! Refract CLI tool
//!
//! Describes and renders records whose shapes are declared in
//! `refract.toml`.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use refract_engine::config::CONFIG_FILE;
use refract_engine::BooleanLiteral;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use output::{resolve_color_choice, StyledOutput};

#[derive(Parser)]
#[command(name = "refract")]
#[command(about = "Record introspection and insert-statement rendering", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file declaring shapes
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Color output: auto, always, never
    #[arg(long, global = true)]
    color: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared shapes
    Shapes,

    /// Print the field descriptors of a shape
    Describe {
        /// Shape name
        shape: String,
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render JSON records as insert statements
    Render {
        /// Shape name
        shape: String,
        /// JSON file holding an object or an array of objects ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Overwrite a field before rendering (field=value), repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
        /// Boolean literal style: reject, keyword, numeric
        #[arg(long)]
        booleans: Option<BooleanLiteral>,
    },

    /// Render a zero-valued instance of a shape
    New {
        /// Shape name
        shape: String,
        /// Boolean literal style: reject, keyword, numeric
        #[arg(long)]
        booleans: Option<BooleanLiteral>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, out: &mut StyledOutput) -> anyhow::Result<()> {
    let config = commands::load_config(&cli.config)?;

    match cli.command {
        Commands::Shapes => commands::shapes::execute(&config, out),

        Commands::Describe { shape, json } => {
            commands::describe::execute(&config, &shape, json, out)
        }

        Commands::Render {
            shape,
            input,
            assignments,
            booleans,
        } => commands::render::execute(&config, &shape, &input, &assignments, booleans, out),

        Commands::New { shape, booleans } => commands::new::execute(&config, &shape, booleans, out),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut out = StyledOutput::new(resolve_color_choice(cli.color.as_deref()));
    if let Err(e) = run(cli, &mut out) {
        out.stderr_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
