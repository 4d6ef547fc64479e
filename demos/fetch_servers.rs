use anyhow::Context;
use datetime_client::{ContentType, DateTimeClient, ServerSelector, ServerTargets};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let targets = ServerTargets::from_env();
    anyhow::ensure!(
        !targets.base_url.is_empty(),
        "SERVER_URL, SERVER_PORT and SERVER_PORT_GIN must be set"
    );

    for selector in ServerSelector::ALL {
        let client = DateTimeClient::for_server(&targets, selector);
        for content_type in ContentType::ALL {
            let datetime = client.fetch_as(content_type).await.with_context(|| {
                format!("fetching from {} server as {content_type}", selector.as_str())
            })?;
            println!("{} server ({content_type}): {datetime}", selector.as_str());
        }
    }

    Ok(())
}
