use crate::client::HttpSource;
use metricdash_core::MetricsSource;

/// Print the exposition payload exactly as served.
pub async fn raw_metrics(source: &HttpSource) -> anyhow::Result<()> {
    let body = source
        .fetch()
        .await
        .map_err(|e| anyhow::anyhow!("failed to fetch {}: {}", source.endpoint(), e))?;
    print!("{body}");
    if !body.ends_with('\n') {
        println!();
    }
    Ok(())
}
