//! Scripted media gateway for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vasari_core::{ContainerId, ContainerSpec, ContainerStatus, RemoteMediaId};
use vasari_error::{PublishError, PublishErrorKind, PublishResult};
use vasari_interface::MediaGateway;

/// One call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Create(ContainerSpec),
    Status(ContainerId),
    Publish(ContainerId),
}

/// Mock gateway with scripted container statuses.
///
/// Containers are numbered `container-1`, `container-2`, ... in the order
/// their create calls complete and never reuse an id. A create call can be
/// held back so that it completes after later ones. Each container walks its own status script;
/// the last status repeats once the script runs out.
#[derive(Debug, Clone)]
pub struct MockGateway {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    create_calls: Arc<Mutex<u32>>,
    next_id: Arc<Mutex<u32>>,
    created: Arc<Mutex<Vec<(ContainerSpec, ContainerId)>>>,
    create_delays: HashMap<u32, Duration>,
    cursors: Arc<Mutex<HashMap<ContainerId, usize>>>,
    default_script: Vec<ContainerStatus>,
    scripts: HashMap<String, Vec<ContainerStatus>>,
    create_failures: HashMap<u32, PublishErrorKind>,
    publish_failure: Option<PublishErrorKind>,
    configured: bool,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Gateway whose containers finish on the first check.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            create_calls: Arc::new(Mutex::new(0)),
            next_id: Arc::new(Mutex::new(0)),
            created: Arc::new(Mutex::new(Vec::new())),
            create_delays: HashMap::new(),
            cursors: Arc::new(Mutex::new(HashMap::new())),
            default_script: vec![ContainerStatus::Finished],
            scripts: HashMap::new(),
            create_failures: HashMap::new(),
            publish_failure: None,
            configured: true,
        }
    }

    /// Every container walks `script`.
    pub fn with_statuses(mut self, script: Vec<ContainerStatus>) -> Self {
        self.default_script = script;
        self
    }

    /// Container `id` walks `script`.
    pub fn with_statuses_for(mut self, id: &str, script: Vec<ContainerStatus>) -> Self {
        self.scripts.insert(id.to_string(), script);
        self
    }

    /// The `nth` create call (1-based) fails with `kind`.
    pub fn failing_create(mut self, nth: u32, kind: PublishErrorKind) -> Self {
        self.create_failures.insert(nth, kind);
        self
    }

    /// The `nth` create call (1-based) completes only after `delay`.
    pub fn delaying_create(mut self, nth: u32, delay: Duration) -> Self {
        self.create_delays.insert(nth, delay);
        self
    }

    /// Every publish call fails with `kind`.
    pub fn failing_publish(mut self, kind: PublishErrorKind) -> Self {
        self.publish_failure = Some(kind);
        self
    }

    /// Gateway without credentials.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Created containers with their specs, in completion order.
    pub fn created(&self) -> Vec<(ContainerSpec, ContainerId)> {
        self.created.lock().unwrap().clone()
    }

    /// Id assigned to the container created from `spec`.
    pub fn id_for(&self, spec: &ContainerSpec) -> Option<ContainerId> {
        self.created()
            .into_iter()
            .find(|(created, _)| created == spec)
            .map(|(_, id)| id)
    }

    /// Specs of every create call, in order.
    pub fn creates(&self) -> Vec<ContainerSpec> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Create(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    /// Containers checked, one entry per status call.
    pub fn status_checks(&self) -> Vec<ContainerId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Status(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Containers published, in order.
    pub fn publishes(&self) -> Vec<ContainerId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::Publish(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) -> PublishResult<()> {
        if !self.configured {
            return Err(PublishError::new(PublishErrorKind::Configuration(
                "Instagram configuration is missing: access token".to_string(),
            )));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl MediaGateway for MockGateway {
    async fn create_container(&self, spec: &ContainerSpec) -> PublishResult<ContainerId> {
        self.record(GatewayCall::Create(spec.clone()))?;
        let nth = {
            let mut calls = self.create_calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if let Some(delay) = self.create_delays.get(&nth) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(kind) = self.create_failures.get(&nth) {
            return Err(PublishError::new(kind.clone()));
        }

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            ContainerId::new(format!("container-{}", *next))
        };
        self.created.lock().unwrap().push((spec.clone(), id.clone()));
        Ok(id)
    }

    async fn publish_container(&self, container: &ContainerId) -> PublishResult<RemoteMediaId> {
        self.record(GatewayCall::Publish(container.clone()))?;
        if let Some(kind) = &self.publish_failure {
            return Err(PublishError::new(kind.clone()));
        }
        Ok(RemoteMediaId::new(format!("media-{}", container)))
    }

    async fn container_status(&self, container: &ContainerId) -> PublishResult<ContainerStatus> {
        self.record(GatewayCall::Status(container.clone()))?;
        let script = self
            .scripts
            .get(container.as_str())
            .unwrap_or(&self.default_script);
        let mut cursors = self.cursors.lock().unwrap();
        let cursor = cursors.entry(container.clone()).or_insert(0);
        let status = script
            .get(*cursor)
            .or_else(|| script.last())
            .copied()
            .unwrap_or(ContainerStatus::Finished);
        *cursor += 1;
        Ok(status)
    }

    fn ensure_configured(&self) -> PublishResult<()> {
        if self.configured {
            Ok(())
        } else {
            Err(PublishError::new(PublishErrorKind::Configuration(
                "Instagram configuration is missing: access token".to_string(),
            )))
        }
    }
}
