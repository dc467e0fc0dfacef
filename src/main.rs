use clap::{CommandFactory, Parser};
use nymeria::person::{BulkEnrichParams, EnrichParams};
use nymeria::{auth_cache, Config, NymeriaClient};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line access to the Nymeria API.
#[derive(Debug, Parser)]
#[command(name = "nymeria", version, about)]
struct Cli {
    /// Sets the tool's auth key. It is cached for future uses.
    #[arg(long)]
    auth: Option<String>,

    /// Checks the deliverability of an email address.
    #[arg(long, value_name = "EMAIL")]
    verify: Option<String>,

    /// A JSON encoded list of enrichment params (ex: '[{"profile": "github.com/nymeriaio"}]').
    #[arg(long, value_name = "JSON")]
    enrich: Option<String>,

    /// Retrieves a person by Nymeria id.
    #[arg(long, value_name = "ID")]
    retrieve: Option<String>,

    /// Tests the supplied or cached API key.
    #[arg(long = "check-auth")]
    check_auth: bool,

    /// Purges all of the tool's cached data.
    #[arg(long)]
    purge: bool,

    /// Overrides the API base URL.
    #[arg(long, env = "NYMERIA_BASE_URL", hide = true)]
    base_url: Option<String>,
}

fn pretty_print<T: Serialize>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

fn report<T: Serialize>(result: nymeria::Result<T>) {
    match result {
        Ok(value) => pretty_print(&value),
        Err(e) => println!("Looks like an error occurred ({}).", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nymeria=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cache_dir = auth_cache::cache_dir();

    if cli.purge {
        auth_cache::purge(&cache_dir)?;
        return Ok(());
    }

    let key = match cli.auth.as_deref() {
        Some(key) => {
            if let Err(e) = auth_cache::store_key(&cache_dir, key) {
                tracing::warn!("Failed to cache auth key: {}", e);
            }
            Some(key.to_string())
        }
        None => auth_cache::load_key(&cache_dir),
    };

    let mut config = match key {
        Some(key) => Config::new(&key)?,
        None if std::env::var_os("NYMERIA_API_KEY").is_some() => Config::from_env()?,
        None => anyhow::bail!("no auth key found"),
    };
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = NymeriaClient::new(config)?;

    if let Some(email) = cli.verify.as_deref() {
        report(client.email().verify(email).await);
        return Ok(());
    }

    if let Some(raw) = cli.enrich.as_deref() {
        let params: Vec<EnrichParams> = match serde_json::from_str(raw) {
            Ok(params) => params,
            Err(e) => {
                println!("Looks like an error occurred ({}).", e);
                return Ok(());
            }
        };

        match params.as_slice() {
            [single] => report(client.person().enrich(single).await),
            many => {
                let bulk: Vec<BulkEnrichParams> =
                    many.iter().cloned().map(BulkEnrichParams::from).collect();
                report(client.person().bulk_enrich(&bulk).await)
            }
        }
        return Ok(());
    }

    if let Some(id) = cli.retrieve.as_deref() {
        report(client.person().retrieve(id).await);
        return Ok(());
    }

    if cli.check_auth {
        match client.legacy().check_authentication().await {
            Ok(()) => println!("The API key looks good. You are ready to go!"),
            Err(e) => println!("Looks like the supplied key is not valid ({}).", e),
        }
        return Ok(());
    }

    Cli::command().print_help()?;
    Ok(())
}
