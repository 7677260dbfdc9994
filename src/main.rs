//! LRU TTL Cache - demo node
//!
//! Drives the cache with a synthetic workload and periodically logs its stats.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::{ByteView, Cache, Config, StoreOptions};

/// Number of distinct keys the synthetic workload cycles through
const KEY_SPACE: u64 = 4096;

/// Main entry point for the demo node.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache facade (backend is built on first write)
/// 4. Run the workload and stats reporter until Ctrl+C/SIGTERM
/// 5. Close the cache, stopping its reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LRU TTL cache demo node");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: policy={}, max_bytes={}, cleanup_interval={:?}, stats_interval={}s",
        config.policy, config.max_bytes, config.cleanup_interval, config.stats_interval
    );

    let options = StoreOptions::from_config(&config)
        .on_evicted(|key, value: &ByteView| debug!(key, bytes = value.len(), "evicted"));
    let cache = Arc::new(Cache::with_options(config.clone(), options));

    let workload = tokio::spawn(run_workload(Arc::clone(&cache)));

    let mut report = tokio::time::interval(Duration::from_secs(config.stats_interval.max(1)));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = report.tick() => {
                let stats = cache.stats().await;
                let json = serde_json::to_string(&stats).context("serializing stats")?;
                info!("Cache stats: {}", json);
            }
        }
    }

    workload.abort();
    cache.close();
    info!("Shutdown complete");
    Ok(())
}

/// Writes and reads keys in a fixed pattern so that both expiry and
/// capacity eviction are exercised.
async fn run_workload(cache: Arc<Cache>) {
    let mut ticker = tokio::time::interval(Duration::from_millis(5));
    let mut i: u64 = 0;

    loop {
        ticker.tick().await;

        let key = format!("key{}", (i * 31) % KEY_SPACE);
        let size = 64 + (i % 17) as usize * 128;
        // Rejections are logged by the facade.
        let _ = cache.add(key, ByteView::from(vec![b'x'; size])).await;

        let probe = format!("key{}", (i * 7) % KEY_SPACE);
        cache.get(&probe).await;

        i = i.wrapping_add(1);
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
