//! Instagram Graph API gateway.

use crate::config::missing_credentials;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use vasari_core::{ContainerId, ContainerSpec, ContainerStatus, RemoteMediaId};
use vasari_error::{PublishError, PublishErrorKind, PublishResult};
use vasari_interface::{MediaGateway, PlatformConfig};

/// Response carrying a newly created object id.
#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

/// Response to a `fields=status_code` query.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status_code: Option<String>,
}

/// Authenticated client for the container endpoints of the Graph API.
///
/// Every call checks the credentials first and refuses to go on the wire
/// without them.
#[derive(Clone)]
pub struct GraphGateway {
    client: Client,
    config: Arc<dyn PlatformConfig>,
}

impl std::fmt::Debug for GraphGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphGateway")
            .field("graph_url", &self.config.graph_url())
            .field("account_id", &self.config.account_id())
            .finish()
    }
}

impl GraphGateway {
    /// Create a gateway with a default HTTP client.
    #[instrument(skip_all, fields(graph_url = %config.graph_url()))]
    pub fn new(config: Arc<dyn PlatformConfig>) -> Self {
        debug!("Creating Graph API gateway");
        Self::with_client(Client::new(), config)
    }

    /// Create a gateway over an existing HTTP client.
    pub fn with_client(client: Client, config: Arc<dyn PlatformConfig>) -> Self {
        Self { client, config }
    }

    /// Access token and account id, or a configuration error.
    fn credentials(&self) -> PublishResult<(&str, &str)> {
        match (self.config.access_token(), self.config.account_id()) {
            (Some(token), Some(account)) if self.config.is_configured() => Ok((token, account)),
            _ => Err(configuration_error(self.config.as_ref())),
        }
    }
}

/// Configuration error naming the missing credentials.
fn configuration_error(config: &dyn PlatformConfig) -> PublishError {
    let missing = missing_credentials(config);
    error!(missing = ?missing, "Instagram configuration incomplete");
    PublishError::new(PublishErrorKind::Configuration(format!(
        "Instagram configuration is missing: {}. \
         Note: When using Facebook Login, Instagram uses Facebook Page access token. \
         Set INSTAGRAM_USER_ID to your Instagram Business Account ID connected to your Facebook Page.",
        missing.join(", ")
    )))
}

/// Extract the message from a Graph API error body.
///
/// Prefers `error.message`, then a top-level `message`, then the whole JSON
/// document; an empty message counts as missing. A body that is not JSON
/// yields `Unknown error`.
pub fn remote_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return "Unknown error".to_string();
    };

    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(non_empty)
        .or_else(|| value.get("message").and_then(non_empty))
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn non_empty(value: &serde_json::Value) -> Option<&str> {
    value.as_str().filter(|m| !m.is_empty())
}

/// Decode a Graph API response, turning non-success into a remote rejection.
async fn read_response<T: DeserializeOwned>(response: Response, action: &str) -> PublishResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        error!(action, "Failed to read response body: {}", e);
        PublishError::new(PublishErrorKind::Transport(format!(
            "Failed to {}: {}",
            action, e
        )))
    })?;

    if !status.is_success() {
        let message = remote_error_message(&body);
        error!(action, status = status.as_u16(), "Failed to {}: {}", action, message);
        return Err(PublishError::new(PublishErrorKind::RemoteRejection(message)));
    }

    serde_json::from_str(&body).map_err(|e| {
        error!(action, body = %body, "Failed to parse response: {}", e);
        PublishError::new(PublishErrorKind::Transport(format!(
            "Failed to parse response to {}: {}",
            action, e
        )))
    })
}

/// Map a send failure to a transport error.
fn send_error(action: &str, e: reqwest::Error) -> PublishError {
    error!(action, "Request failed: {}", e);
    PublishError::new(PublishErrorKind::Transport(format!(
        "Failed to {}: {}",
        action, e
    )))
}

#[async_trait]
impl MediaGateway for GraphGateway {
    #[instrument(skip(self, spec), fields(media_type = spec.media_type()))]
    async fn create_container(&self, spec: &ContainerSpec) -> PublishResult<ContainerId> {
        let (token, account) = self.credentials()?;
        let url = format!("{}/{}/media", self.config.graph_url(), account);
        let action = format!("create {} container", spec.label());
        debug!(url = %url, "Creating media container");

        let mut form = spec.form_fields();
        form.push(("access_token", token.to_string()));

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| send_error(&action, e))?;

        let created: IdResponse = read_response(response, &action).await?;
        info!(container_id = %created.id, "{} container created", spec.label());
        Ok(ContainerId::new(created.id))
    }

    #[instrument(skip(self), fields(container_id = %container))]
    async fn publish_container(&self, container: &ContainerId) -> PublishResult<RemoteMediaId> {
        let (token, account) = self.credentials()?;
        let url = format!("{}/{}/media_publish", self.config.graph_url(), account);
        debug!(url = %url, "Publishing container");

        let form = [("access_token", token), ("creation_id", container.as_str())];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| send_error("publish container", e))?;

        let published: IdResponse = read_response(response, "publish container").await?;
        info!(media_id = %published.id, "Media published successfully");
        Ok(RemoteMediaId::new(published.id))
    }

    #[instrument(skip(self), fields(container_id = %container))]
    async fn container_status(&self, container: &ContainerId) -> PublishResult<ContainerStatus> {
        let (token, _) = self.credentials()?;
        let url = format!("{}/{}", self.config.graph_url(), container);

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", token), ("fields", "status_code")])
            .send()
            .await
            .map_err(|e| send_error("check container status", e))?;

        let status: StatusResponse = read_response(response, "check container status").await?;
        Ok(status
            .status_code
            .as_deref()
            .map(ContainerStatus::from_code)
            .unwrap_or(ContainerStatus::Unknown))
    }

    fn ensure_configured(&self) -> PublishResult<()> {
        self.credentials().map(|_| ())
    }
}
