use clap::Parser;
use datetime_client::DateTimeClient;
use tracing_subscriber::EnvFilter;

/// Fetches the current datetime from a server.
#[derive(Debug, Parser)]
struct Args {
    /// Server URL
    #[arg(long, default_value = "http://localhost:8000")]
    url: String,
    /// Content type (application/json or text/plain)
    #[arg(long = "type", default_value = "application/json")]
    content_type: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let client = DateTimeClient::new(args.url);

    let datetime = client.fetch(&args.content_type).await?;
    println!("Response from server: {datetime}");

    Ok(())
}
