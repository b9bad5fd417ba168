//! Lazily-initialized shared client handle.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use super::client::KlaviyoClient;
use super::error::KlaviyoResult;
use crate::core::config::KlaviyoConfig;

/// Shared slot holding the Klaviyo client.
///
/// Created empty at startup and handed to the tool router; the client is
/// built on the first tool call and reused for the life of the process.
#[derive(Debug)]
pub struct ClientHandle {
    config: KlaviyoConfig,
    client: OnceCell<KlaviyoClient>,
}

impl ClientHandle {
    pub fn new(config: KlaviyoConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Wrap in an `Arc` for sharing across routes.
    pub fn shared(config: KlaviyoConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Get the client, building it on first use.
    pub async fn client(&self) -> KlaviyoResult<&KlaviyoClient> {
        self.client
            .get_or_try_init(|| async {
                info!("Initializing Klaviyo API client ({})", self.config.base_url);
                KlaviyoClient::new(&self.config)
            })
            .await
    }

    /// Whether the client has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> KlaviyoConfig {
        KlaviyoConfig {
            api_key: Some("pk_test".to_string()),
            base_url: base_url.to_string(),
            revision: "2023-12-15".to_string(),
        }
    }

    #[tokio::test]
    async fn test_client_built_once_on_first_use() {
        let handle = ClientHandle::new(config("https://a.klaviyo.com/api"));
        assert!(!handle.is_initialized());

        let first = handle.client().await.unwrap() as *const KlaviyoClient;
        assert!(handle.is_initialized());
        let second = handle.client().await.unwrap() as *const KlaviyoClient;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_init_is_retried() {
        let handle = ClientHandle::new(config("not a url"));
        assert!(handle.client().await.is_err());
        assert!(!handle.is_initialized());
        assert!(handle.client().await.is_err());
    }
}
