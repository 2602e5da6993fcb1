//! Test helper utilities for explorer integration tests
#![allow(dead_code)]

use std::time::Duration;

use tokio::sync::watch;

use explorer::{ExplorerConfig, SessionSnapshot};

/// Default configuration with a short timeout and the given history size
pub fn test_config(history_capacity: usize) -> ExplorerConfig {
    ExplorerConfig::default()
        .with_history_capacity(history_capacity)
        .with_request_timeout(Duration::from_secs(2))
}

pub fn config_for(service_url: &str) -> ExplorerConfig {
    test_config(5)
        .with_service_url(service_url)
        .with_debounce(Duration::from_millis(50))
}

/// Wait until a published snapshot satisfies `condition`
pub async fn wait_for_snapshot<F>(
    snapshots: &mut watch::Receiver<SessionSnapshot>,
    timeout: Duration,
    condition: F,
) -> Option<SessionSnapshot>
where
    F: FnMut(&SessionSnapshot) -> bool,
{
    match tokio::time::timeout(timeout, snapshots.wait_for(condition)).await {
        Ok(Ok(snapshot)) => Some(snapshot.clone()),
        _ => None,
    }
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
