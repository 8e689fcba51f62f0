mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "cei",
    version,
    about = "Extract Corporate Equality Index scores from annual PDF reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single report year into cei_<year>.csv
    Year {
        /// Report year, matched against the 4-digit run in PDF file names
        year: u16,

        /// Directory scanned recursively for report PDFs
        #[arg(short, long, value_name = "DIR")]
        input_dir: PathBuf,

        /// Directory the CSV artifact is written to
        #[arg(short, long, value_name = "DIR")]
        output_dir: PathBuf,
    },
    /// Process every year that has a PDF but no CSV artifact yet
    Batch {
        /// Directory scanned recursively for report PDFs
        #[arg(short, long, value_name = "DIR")]
        input_dir: PathBuf,

        /// Directory the CSV artifacts are written to
        #[arg(short, long, value_name = "DIR")]
        output_dir: PathBuf,
    },
    /// List report PDFs and the years detected from their file names
    Scan {
        /// Directory scanned recursively for report PDFs
        #[arg(short, long, value_name = "DIR")]
        input_dir: PathBuf,
    },
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Year {
            year,
            input_dir,
            output_dir,
        } => commands::year::run(year, input_dir, output_dir),
        Commands::Batch {
            input_dir,
            output_dir,
        } => commands::batch::run(input_dir, output_dir),
        Commands::Scan { input_dir } => commands::scan::run(input_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
