use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use web_support::config::{load_config, SiteConfig};
use web_support::fetch::PageFetcher;
use web_support::webshare::{save_webshare, SharedComponents};

#[derive(Parser)]
#[command(name = "web-cli")]
#[command(about = "Management CLI for the web support tools", long_about = None)]
struct Cli {
    /// Path to the site configuration file.
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the local shared-component definitions from the webshare product
    Sync,
    /// Fetch a page and print its lines
    Fetch {
        url: String,
        /// Seconds to wait before giving up (config value when omitted)
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// List the shared components defined locally
    Components {
        /// Print the full registry as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web_support=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        SiteConfig::default()
    };
    let default_timeout = Duration::from_secs(config.fetch.timeout_secs);

    match cli.command {
        Commands::Sync => {
            if config.webshare.base_url.is_empty() {
                eprintln!("Error: webshare.base_url is not configured");
                std::process::exit(1);
            }
            let rcd_path = Path::new(&config.webshare.rcd_path);
            if let Err(err) =
                save_webshare(rcd_path, &config.webshare.base_url, default_timeout).await
            {
                eprintln!("Error generating {} file; please try again.", rcd_path.display());
                eprintln!("    {}", err);
                std::process::exit(1);
            }
            println!("Updated {} file", rcd_path.display());
        }
        Commands::Fetch { url, timeout } => {
            let timeout = timeout.map(Duration::from_secs).unwrap_or(default_timeout);
            let fetcher = PageFetcher::new(&url, BTreeMap::new(), timeout)?;
            match fetcher.get_page().await {
                Ok(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                }
                Err(failure) => {
                    eprintln!("Error: {}", failure);
                    std::process::exit(1);
                }
            }
        }
        Commands::Components { json } => {
            let registry = SharedComponents::load(&config.webshare.rcd_path)?;
            if json {
                let components: Vec<_> = registry
                    .names()
                    .filter_map(|name| registry.get(name))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&components)?);
            } else {
                for name in registry.names() {
                    if let Some(component) = registry.get(name) {
                        println!("{}\t{}", name, component.url());
                    }
                }
            }
        }
    }

    Ok(())
}
