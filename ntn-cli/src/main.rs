use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// NADP/NTN deposition data CLI tool
#[derive(Parser)]
#[command(name = "ntn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Local weekly sample file
    #[arg(long, env = "NTN_SAMPLES_PATH", global = true)]
    samples_path: Option<PathBuf>,

    /// Remote site-metadata feed
    #[arg(long, env = "NTN_SITES_URL", global = true)]
    sites_url: Option<String>,

    /// Site feed request timeout in seconds
    #[arg(long, env = "NTN_FEED_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weekly samples for a site between two dates
    Samples {
        /// 4-character site id
        #[arg(long)]
        site_id: String,

        /// Unix timestamp, inclusive
        #[arg(long, allow_hyphen_values = true)]
        start_date: String,

        /// Unix timestamp, inclusive
        #[arg(long, allow_hyphen_values = true)]
        end_date: String,
    },

    /// Metadata for one site
    Site {
        /// 4-character site id
        #[arg(long)]
        site_id: String,
    },

    /// Sites within a radius of a point
    Nearby {
        /// Point as "(lat,lon)" in decimal degrees
        #[arg(long)]
        location: String,

        /// Radius in miles
        #[arg(long, allow_hyphen_values = true)]
        radius: String,

        /// "True" or "False"; inactive sites are listed by default
        #[arg(long)]
        include_inactive: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::build_config(cli.samples_path, cli.sites_url, cli.timeout)?;

    match cli.command {
        Commands::Samples {
            site_id,
            start_date,
            end_date,
        } => commands::samples::run(config, site_id, start_date, end_date).await,
        Commands::Site { site_id } => commands::site::run(config, site_id).await,
        Commands::Nearby {
            location,
            radius,
            include_inactive,
        } => commands::nearby::run(config, location, radius, include_inactive).await,
    }
}
