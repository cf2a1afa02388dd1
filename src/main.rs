use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use simpleranker::config::Config;
use simpleranker::document::Document;
use simpleranker::executor::{dispatch, Parameters, SEARCH_ENDPOINT};
use simpleranker::logging;
use simpleranker::ranking::Ranker;

#[derive(Parser)]
#[command(name = "simpleranker", version, about = "Rank chunk matches by parent document")]
struct Cli {
    /// JSON request file; reads stdin when omitted
    #[arg(long, env = "SIMPLERANKER_INPUT")]
    input: Option<PathBuf>,

    /// Score name used for ranking (overrides ranker.metric)
    #[arg(long)]
    metric: Option<String>,

    /// min, max, mean_min or mean_max (overrides ranker.ranking)
    #[arg(long)]
    ranking: Option<String>,

    /// Documents to rank, e.g. "@r" or "@c" (overrides ranker.access_paths)
    #[arg(long)]
    access_paths: Option<String>,

    /// Deprecated alias of --access-paths
    #[arg(long, hide = true)]
    traversal_paths: Option<String>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

/// One batch as a host would send it.
#[derive(Debug, Deserialize)]
struct RankRequest {
    #[serde(default = "default_endpoint")]
    endpoint: String,
    docs: Vec<Document>,
    #[serde(default)]
    parameters: Parameters,
}

fn default_endpoint() -> String {
    SEARCH_ENDPOINT.to_string()
}

fn read_request(input: Option<&PathBuf>) -> Result<RankRequest> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Request is not a valid ranking batch")
}

fn main() -> Result<()> {
    // 1. Parse CLI args
    let cli = Cli::parse();

    // 2. Load configuration, then let flags win over it
    // An unloadable config is fatal
    let mut config = Config::load()?;
    if let Some(metric) = cli.metric {
        config.ranker.metric = metric;
    }
    if let Some(ranking) = cli.ranking {
        config.ranker.ranking = ranking;
    }
    if let Some(access_paths) = cli.access_paths {
        config.ranker.access_paths = access_paths;
    }
    if let Some(traversal_paths) = cli.traversal_paths {
        config.ranker.traversal_paths = Some(traversal_paths);
    }

    // 3. Initialize logging FIRST (before any other output)
    // stdout is reserved for the ranked batch
    logging::init_logging(&config);

    // 4. Build the ranker; a bad ranking policy stops here
    let ranker = Ranker::new(&config.ranker)?;

    // 5. Run the batch
    let mut request = read_request(cli.input.as_ref())?;
    let handled = dispatch(&[&ranker], &request.endpoint, &mut request.docs, &request.parameters)?;
    tracing::info!(
        endpoint = %request.endpoint,
        documents = request.docs.len(),
        executors = handled,
        "Batch processed"
    );

    // 6. Emit the batch
    let output = serde_json::json!({ "docs": request.docs });
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}
