//! Bundle a single page into a self-contained HTML file
//!
//! Usage: cargo run --example bundle_page -- <URL> [OUTPUT]
//! Example: cargo run --example bundle_page -- https://news.ycombinator.com hn.html

use anyhow::Context;
use pagebundle::hooks::SpoofHeaders;
use pagebundle::{BundleConfig, BundleResult, Bundler, Diff};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let url = args.get(1).map(String::as_str).unwrap_or("https://news.ycombinator.com");
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bundle.html"));

    let config = BundleConfig::builder()
        .resource_timeout_secs(20)
        .build()
        .context("Failed to build config")?;

    let mut bundler = Bundler::standard(config);
    bundler
        .before_resource_request(SpoofHeaders::new([("Referer", url)]))
        .on_diffs_received(|diffs: Diff| -> BundleResult<Diff> {
            log::info!("{} references ready to inline", diffs.len());
            Ok(diffs)
        });

    log::info!("Bundling {url}");
    let bundle = bundler
        .bundle(url)
        .await
        .with_context(|| format!("Failed to bundle {url}"))?;

    for failure in &bundle.failures {
        log::warn!("Left as written: {} ({})", failure.reference, failure.error);
    }
    log::info!(
        "Inlined {} of {} resources ({:.0}% failed)",
        bundle.inlined,
        bundle.total(),
        bundle.failure_rate() * 100.0
    );

    std::fs::write(&output, &bundle.html)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {} bytes to {}", bundle.html.len(), output.display());

    Ok(())
}
