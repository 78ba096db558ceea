//! Tag key catalogue
//!
//! Keys are fetched once, on a background task, from a [`TagKeySource`].
//! Until the fetch finishes the catalogue is simply empty.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Failed to fetch tag keys: {0}")]
    Fetch(String),
}

/// Somewhere tag keys can be listed from, e.g. the resource groups tagging API
#[async_trait]
pub trait TagKeySource: Send + Sync {
    async fn tag_keys(&self) -> Result<Vec<String>, TagError>;
}

/// Fixed set of keys
#[derive(Debug, Clone, Default)]
pub struct StaticTagKeys(pub Vec<String>);

#[async_trait]
impl TagKeySource for StaticTagKeys {
    async fn tag_keys(&self) -> Result<Vec<String>, TagError> {
        Ok(self.0.clone())
    }
}

/// Tag keys available for completing a filter's key
pub struct TagKeyProvider {
    keys: Arc<RwLock<Vec<String>>>,
    done: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl TagKeyProvider {
    /// Start fetching keys from `source`. Must be called within a tokio runtime.
    pub fn spawn(source: Arc<dyn TagKeySource>) -> Self {
        let keys = Arc::new(RwLock::new(Vec::new()));
        let (done_tx, done) = watch::channel(false);

        let task = tokio::spawn({
            let keys = keys.clone();
            async move {
                match source.tag_keys().await {
                    Ok(mut fetched) => {
                        fetched.sort();
                        fetched.dedup();
                        info!(count = fetched.len(), "Fetched tag keys");
                        *keys.write() = fetched;
                    }
                    Err(e) => warn!(error = %e, "Could not fetch tag keys"),
                }
                done_tx.send_replace(true);
            }
        });

        Self { keys, done, task }
    }

    /// Keys fetched so far
    pub fn keys(&self) -> Vec<String> {
        self.keys.read().clone()
    }

    /// Wait for the fetch to finish. Any number of callers may wait at once.
    pub async fn wait(&self) {
        let mut done = self.done.clone();
        // Err means the fetch task went away without finishing
        if done.wait_for(|finished| *finished).await.is_err() {
            warn!("Tag key fetch ended before completing");
        }
    }

    /// Keys starting with `prefix`
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.keys
            .read()
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl Drop for TagKeyProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl TagKeySource for FailingSource {
        async fn tag_keys(&self) -> Result<Vec<String>, TagError> {
            Err(TagError::Fetch("access denied".to_string()))
        }
    }

    struct SlowSource;

    #[async_trait]
    impl TagKeySource for SlowSource {
        async fn tag_keys(&self) -> Result<Vec<String>, TagError> {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            Ok(vec!["env".to_string()])
        }
    }

    fn keys(values: &[&str]) -> Arc<dyn TagKeySource> {
        Arc::new(StaticTagKeys(values.iter().map(|s| s.to_string()).collect()))
    }

    #[tokio::test]
    async fn test_keys_available_after_fetch() {
        let provider = TagKeyProvider::spawn(keys(&["team", "env", "app", "env"]));
        provider.wait().await;

        assert_eq!(provider.keys(), vec!["app", "env", "team"]);
    }

    #[tokio::test]
    async fn test_completions() {
        let provider = TagKeyProvider::spawn(keys(&["environment", "env", "team"]));
        provider.wait().await;

        assert_eq!(provider.completions("en"), vec!["env", "environment"]);
        assert!(provider.completions("x").is_empty());
        assert_eq!(provider.completions("").len(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_catalogue_empty() {
        let provider = TagKeyProvider::spawn(Arc::new(FailingSource));
        provider.wait().await;

        assert!(provider.keys().is_empty());
    }

    #[tokio::test]
    async fn test_wait_twice() {
        let provider = TagKeyProvider::spawn(keys(&["env"]));
        provider.wait().await;
        provider.wait().await;

        assert_eq!(provider.keys(), vec!["env"]);
    }

    #[tokio::test]
    async fn test_concurrent_waiters_all_see_keys() {
        let provider = Arc::new(TagKeyProvider::spawn(Arc::new(SlowSource)));

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move {
                    provider.wait().await;
                    provider.keys()
                })
            })
            .collect();

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), vec!["env"]);
        }
    }
}
