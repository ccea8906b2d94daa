use anyhow::{Context, Result};
use clap::Parser;
use listing_pack::scrapers::HttpScraper;
use listing_pack::{server, Branding, OpenAiClient, Pipeline, PipelineConfig};
use log::info;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "listing-pack",
    about = "HTTP service that turns product URLs into an enriched listing spreadsheet"
)]
struct Cli {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "LISTING_PACK_BIND", default_value = "127.0.0.1:8787")]
    bind: String,

    /// OpenAI API key used for enrichment.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Chat model identifier.
    #[arg(long, env = "LISTING_PACK_MODEL", default_value = listing_pack::core::config::DEFAULT_MODEL)]
    model: String,

    /// Base URL for OpenAI-compatible endpoints.
    #[arg(long, env = "LISTING_PACK_OPENAI_BASE", default_value = listing_pack::core::config::DEFAULT_OPENAI_BASE_URL)]
    openai_base_url: String,

    /// Seconds before enrichment requests time out.
    #[arg(long, env = "LISTING_PACK_OPENAI_TIMEOUT_SECS", default_value_t = 90)]
    openai_timeout_secs: u64,

    /// Seconds before page fetches time out.
    #[arg(long, env = "LISTING_PACK_FETCH_TIMEOUT_SECS", default_value_t = 20)]
    fetch_timeout_secs: u64,

    /// User agent sent with page fetches.
    #[arg(long, env = "LISTING_PACK_USER_AGENT", default_value = listing_pack::core::config::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// URLs processed at once per batch (1 = strictly sequential).
    #[arg(long, env = "LISTING_PACK_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,

    /// Store name shown in the description header.
    #[arg(long, env = "LISTING_PACK_STORE_NAME")]
    store_name: Option<String>,

    /// Tagline shown next to the store name.
    #[arg(long, env = "LISTING_PACK_TAGLINE")]
    tagline: Option<String>,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        let mut branding = Branding::default();
        if let Some(store_name) = &self.store_name {
            branding.closing_message = format!(
                "Thanks for choosing {}: great kit, fair prices, fast UK delivery.",
                store_name
            );
            branding.store_name = store_name.clone();
        }
        if let Some(tagline) = &self.tagline {
            branding.tagline = tagline.clone();
        }

        PipelineConfig::default()
            .with_user_agent(self.user_agent.clone())
            .with_fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .with_concurrency(self.concurrency)
            .with_model(self.model.clone())
            .with_openai_base_url(self.openai_base_url.clone())
            .with_enrichment_timeout(Duration::from_secs(self.openai_timeout_secs))
            .with_branding(branding)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let cli = Cli::parse();
    let config = cli.pipeline_config();

    let scraper = HttpScraper::from_config(&config).context("failed to build page fetcher")?;
    let client = OpenAiClient::new(cli.openai_api_key.clone(), &config)
        .context("failed to build completion client")?;
    info!("Using model {}", client.model());

    let pipeline = Arc::new(Pipeline::new(Box::new(scraper), Arc::new(client), &config));
    let app = server::router(pipeline);

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!("Listening on http://{}", cli.bind);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
