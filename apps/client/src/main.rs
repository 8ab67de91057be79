mod ui;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use roadmap_client::provider::GoTrueClient;
use roadmap_client::roadmap::RoadmapClient;
use roadmap_client::session::SessionStore;

#[derive(Parser, Debug)]
#[command(name = "roadmap", version, about = "Build a personalized learning roadmap", long_about = None)]
struct Cli {
    /// Base URL of the backend serving auth and the generation function
    #[arg(long, env = "SUPABASE_URL")]
    url: String,

    /// Public (anon) API key for the backend
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    anon_key: String,

    /// Show generation failures instead of the fallback roadmap
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the prompts on stdout.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roadmap=warn,roadmap_client=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting roadmap client v{}", env!("CARGO_PKG_VERSION"));

    let sessions = SessionStore::new();
    let provider = GoTrueClient::new(&cli.url, cli.anon_key.clone());
    let client = RoadmapClient::new(&cli.url, cli.anon_key, sessions.clone());

    ui::run(&provider, &client, &sessions, cli.strict).await
}
