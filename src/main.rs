//! seo-apis - Command line access to the Moz, SEMrush and URL classifier APIs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use seo_apis::commands::{ClassifyCommand, KeywordReport, MozCommand, MozReport, SemrushCommand};
use seo_apis::config::{Config, OutputFormat};
use seo_apis::moz::MozParams;
use seo_apis::semrush::VolumeFallback;
use seo_apis::targets::TargetList;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "seo-apis",
    version,
    about = "Query the Moz, SEMrush and URL classifier SEO APIs",
    long_about = "Thin wrappers around the Moz Links API, the SEMrush Analytics API and a URL classifier, with table, JSON, markdown and CSV output."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, markdown, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SEO_TIMEOUT")]
    timeout: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SEO_PROXY")]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Target URLs given inline or from a file.
#[derive(Args)]
struct TargetArgs {
    /// Target URLs (scheme defaults to https)
    targets: Vec<String>,

    /// Read additional targets from a file, one per line
    #[arg(long)]
    file: Option<PathBuf>,

    /// Extra parameters as a JSON object whose values are lists
    #[arg(long)]
    params: Option<String>,

    /// Keep history columns in the output table
    #[arg(long)]
    history: bool,
}

/// Options shared by the SEMrush keyword reports.
#[derive(Args)]
struct KeywordArgs {
    /// Keyword to look up
    keyword: String,

    /// SEMrush regional database (e.g. us, uk, de)
    #[arg(short, long, env = "SEMRUSH_DATABASE")]
    database: Option<String>,

    /// Export columns (comma-separated SEMrush codes, e.g. Ph,Nq,Cp)
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Moz URL metrics for one or more targets
    #[command(alias = "um")]
    UrlMetrics(TargetArgs),

    /// Moz linking root domains for one or more targets
    #[command(alias = "ld")]
    LinkingDomains(TargetArgs),

    /// Moz Domain Authority for a single URL
    #[command(alias = "da")]
    DomainAuthority {
        /// URL to look up
        url: String,
    },

    /// SEMrush keyword overview
    #[command(alias = "k")]
    Keyword(KeywordArgs),

    /// SEMrush monthly search volume
    #[command(alias = "v")]
    Volume {
        #[command(flatten)]
        args: KeywordArgs,

        /// Report missing volume as 0 instead of leaving it empty
        #[arg(long)]
        zero_fallback: bool,
    },

    /// SEMrush organic search results
    #[command(alias = "o")]
    Organic {
        #[command(flatten)]
        args: KeywordArgs,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// SEMrush related keywords
    #[command(alias = "r")]
    Related {
        #[command(flatten)]
        args: KeywordArgs,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Classify a URL into a category
    #[command(alias = "c")]
    Classify {
        /// URL to classify
        url: String,

        /// Page title
        #[arg(long, default_value = "")]
        title: String,

        /// Page snippet or description
        #[arg(long, default_value = "")]
        snippet: String,
    },
}

impl TargetArgs {
    fn target_list(&self) -> Result<TargetList> {
        let mut list = TargetList::new(&self.targets);
        if let Some(path) = &self.file {
            for target in TargetList::from_file(path)?.iter() {
                list.push(target);
            }
        }
        Ok(list)
    }

    fn moz_params(&self) -> Result<MozParams> {
        match &self.params {
            Some(raw) => MozParams::from_json_str(raw).context("Invalid --params"),
            None => Ok(MozParams::new()),
        }
    }
}

fn semrush_command(mut config: Config, args: &KeywordArgs, limit: Option<u32>) -> SemrushCommand {
    if let Some(database) = &args.database {
        config.semrush_database = database.clone();
    }
    if limit.is_some() {
        config.display_limit = limit;
    }
    SemrushCommand::new(config).with_export_columns(args.columns.clone().unwrap_or_default())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let output = match cli.command {
        Commands::UrlMetrics(args) => {
            config.include_history |= args.history;
            let (targets, params) = (args.target_list()?, args.moz_params()?);
            MozCommand::new(config).execute(MozReport::UrlMetrics, &targets, &params).await?
        }

        Commands::LinkingDomains(args) => {
            config.include_history |= args.history;
            let (targets, params) = (args.target_list()?, args.moz_params()?);
            MozCommand::new(config).execute(MozReport::LinkingRootDomains, &targets, &params).await?
        }

        Commands::DomainAuthority { url } => MozCommand::new(config).domain_authority(&url).await?,

        Commands::Keyword(args) => {
            semrush_command(config, &args, None).execute(KeywordReport::Overview, &args.keyword).await?
        }

        Commands::Volume { args, zero_fallback } => {
            if zero_fallback {
                config.volume_fallback = VolumeFallback::Zero;
            }
            semrush_command(config, &args, None).execute(KeywordReport::Volume, &args.keyword).await?
        }

        Commands::Organic { args, limit } => {
            semrush_command(config, &args, limit).execute(KeywordReport::Organic, &args.keyword).await?
        }

        Commands::Related { args, limit } => {
            semrush_command(config, &args, limit).execute(KeywordReport::Related, &args.keyword).await?
        }

        Commands::Classify { url, title, snippet } => {
            ClassifyCommand::new(config).execute(&url, &title, &snippet).await?
        }
    };

    println!("{}", output);

    Ok(())
}
