use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "surfsup")]
#[command(about = "Climate query API over the Hawaii station dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dataset and serve the JSON API
    Serve {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[arg(long, help = "Address to bind [default: 127.0.0.1]")]
        host: Option<String>,

        #[arg(short, long, help = "Port to listen on [default: 5000]")]
        port: Option<u16>,

        #[arg(long, help = "Runtime worker threads [default: number of CPUs]")]
        workers: Option<usize>,
    },

    /// Load the dataset and print an integrity report without serving
    Validate {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
}

/// Dataset location options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct DatasetArgs {
    #[arg(short, long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Directory holding hawaii_stations.csv and hawaii_measurements.csv"
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Stations CSV file (overrides --data-dir)")]
    pub stations: Option<PathBuf>,

    #[arg(long, help = "Measurements CSV file (overrides --data-dir)")]
    pub measurements: Option<PathBuf>,

    #[arg(long, help = "Read the measurements file through a memory map")]
    pub mmap: bool,

    #[arg(long, help = "Fail on the first invalid row instead of skipping it")]
    pub strict: bool,
}
