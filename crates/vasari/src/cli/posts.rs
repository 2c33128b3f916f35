//! Post command handlers.

use super::commands::{Cli, Commands};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use vasari::{
    ConfigError, ContainerPoller, GraphGateway, InstagramConfig, JsonFileLedger, LedgerError,
    LedgerErrorKind, PlatformConfig, PostLedger, PostRef, PostService, PublishError,
    PublishPayload, Publisher, VasariResult,
};

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> VasariResult<()> {
    let ledger = Arc::new(JsonFileLedger::new(&cli.ledger));
    debug!(ledger = %ledger.path().display(), "Using post ledger");

    match cli.command {
        Commands::Publish { request } => {
            let payload = read_payload(&request)?;
            let service = service(cli.config.as_deref(), ledger)?;
            let record = service.upload(payload).await?;
            info!(post = %record.post_ref(), status = %record.status(), "Upload finished");
            print_json(&record)
        }

        Commands::Repost { post_id, request } => {
            let payload = read_payload(&request)?;
            let post = PostRef::new(post_id);
            let service = service(cli.config.as_deref(), ledger)?;
            match service.repost(&post, payload).await? {
                Some(record) => print_json(&record),
                None => Err(not_found(&post).into()),
            }
        }

        Commands::Show { post_id } => {
            let post = PostRef::new(post_id);
            match ledger.find(&post).await? {
                Some(record) => print_json(&record),
                None => Err(not_found(&post).into()),
            }
        }

        Commands::List => print_json(&ledger.list().await?),

        Commands::CheckConfig => check_config(cli.config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> VasariResult<InstagramConfig> {
    match path {
        Some(path) => InstagramConfig::from_file(path),
        None => InstagramConfig::load(),
    }
}

fn service(
    config_path: Option<&Path>,
    ledger: Arc<JsonFileLedger>,
) -> VasariResult<PostService<GraphGateway, JsonFileLedger>> {
    let config = Arc::new(load_config(config_path)?);
    let poller = ContainerPoller::from_config(config.polling());
    let publisher = Publisher::new(Arc::new(GraphGateway::new(config)), poller);
    Ok(PostService::new(publisher, ledger))
}

/// Parse a request given inline or as `@path`.
fn read_payload(arg: &str) -> VasariResult<PublishPayload> {
    let json = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read request file {}: {}", path, e))
        })?,
        None => arg.to_string(),
    };

    serde_json::from_str(&json)
        .map_err(|e| PublishError::validation(format!("Invalid publish request: {}", e)).into())
}

fn not_found(post: &PostRef) -> LedgerError {
    LedgerError::new(LedgerErrorKind::NotFound(post.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> VasariResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(LedgerError::from)?;
    println!("{}", json);
    Ok(())
}

/// What `check-config` reports.
#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    graph_url: &'a str,
    user_id: Option<&'a str>,
    access_token_set: bool,
    configured: bool,
    missing: Vec<&'static str>,
}

fn check_config(path: Option<&Path>) -> VasariResult<()> {
    let config = load_config(path)?;
    let report = ConfigReport {
        graph_url: config.graph_url(),
        user_id: config.account_id(),
        access_token_set: config.access_token().is_some_and(|t| !t.trim().is_empty()),
        configured: config.is_configured(),
        missing: config.missing_fields(),
    };
    print_json(&report)?;

    if report.configured {
        Ok(())
    } else {
        Err(ConfigError::missing_credentials(&report.missing).into())
    }
}
