//! In-memory implementation of the webhook API for testing.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! sparkform-client = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use sparkform_client::mock::MockWebhookApi;
//!
//! let api = MockWebhookApi::new().with_next_id("e4093700-7733-11ed-9039-2f08fa6ecfde");
//! let service = api.clone().into_service();
//!
//! // ... exercise code that uses `service` ...
//! assert_eq!(api.calls().len(), 2);
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::webhook::{Webhook, WebhookApi, WebhookInput, WebhookService};
use crate::{Error, Result};

/// A call received by [`MockWebhookApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `fetch_webhook(id)`
    Fetch(String),
    /// `create_webhook(input)`
    Create(WebhookInput),
    /// `update_webhook(id, input)`
    Update(String, WebhookInput),
    /// `delete_webhook(id)`
    Delete(String),
}

#[derive(Debug, Default)]
struct MockState {
    webhooks: BTreeMap<String, Webhook>,
    next_ids: VecDeque<String>,
    generated: u64,
    calls: Vec<MockCall>,
    failures: VecDeque<Option<(u16, String)>>,
    stalled: bool,
}

/// In-memory stand-in for the SparkPost webhooks API.
///
/// Clones share the same state, so a test can keep one handle for
/// inspection while another is moved into a [`WebhookService`].
#[derive(Debug, Clone, Default)]
pub struct MockWebhookApi {
    state: Arc<Mutex<MockState>>,
}

impl MockWebhookApi {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing webhook.
    pub fn with_webhook(self, webhook: Webhook) -> Self {
        self.lock().webhooks.insert(webhook.id.clone(), webhook);
        self
    }

    /// Queues the id assigned by the next create call.
    pub fn with_next_id(self, id: impl Into<String>) -> Self {
        self.lock().next_ids.push_back(id.into());
        self
    }

    /// Queues a failure with the given HTTP status and message.
    ///
    /// Queued outcomes apply to the following calls in order.
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        self.lock().failures.push_back(Some((status, message.into())));
    }

    /// Queues a pass-through outcome, so a later queued failure hits a later call.
    pub fn pass_next(&self) {
        self.lock().failures.push_back(None);
    }

    /// Makes every call hang until the caller gives up on it.
    pub fn stalled(self) -> Self {
        self.lock().stalled = true;
        self
    }

    /// Returns all calls received so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Returns the stored webhook with the given id.
    pub fn webhook(&self, id: &str) -> Option<Webhook> {
        self.lock().webhooks.get(id).cloned()
    }

    /// Wraps a clone of this mock into a [`WebhookService`].
    pub fn into_service(self) -> WebhookService {
        WebhookService::new(self)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the call and returns whether the call should stall, or a queued failure.
    fn begin(&self, call: MockCall) -> Result<bool> {
        let mut state = self.lock();
        state.calls.push(call);

        if let Some(Some((status, message))) = state.failures.pop_front() {
            return Err(Error::from_status(status, message, None));
        }

        Ok(state.stalled)
    }

    async fn enter(&self, call: MockCall) -> Result<()> {
        if self.begin(call)? {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    fn missing(id: &str) -> Error {
        Error::not_found(format!("resource not found: webhook '{id}' does not exist"))
    }
}

#[async_trait::async_trait]
impl WebhookApi for MockWebhookApi {
    async fn fetch_webhook(&self, id: &str) -> Result<Webhook> {
        self.enter(MockCall::Fetch(id.to_string())).await?;
        self.webhook(id).ok_or_else(|| Self::missing(id))
    }

    async fn create_webhook(&self, input: &WebhookInput) -> Result<String> {
        self.enter(MockCall::Create(input.clone())).await?;

        let mut state = self.lock();
        let id = match state.next_ids.pop_front() {
            Some(id) => id,
            None => {
                state.generated += 1;
                format!("mock-webhook-{}", state.generated)
            }
        };

        let webhook = Webhook {
            id: id.clone(),
            name: input.name.clone(),
            target: input.target.clone(),
            events: input.events.clone(),
            active: input.active.unwrap_or(true),
            exception_subaccounts: Vec::new(),
            auth_type: "none".to_string(),
        };
        state.webhooks.insert(id.clone(), webhook);

        Ok(id)
    }

    async fn update_webhook(&self, id: &str, input: &WebhookInput) -> Result<()> {
        self.enter(MockCall::Update(id.to_string(), input.clone()))
            .await?;

        let mut state = self.lock();
        let webhook = state.webhooks.get_mut(id).ok_or_else(|| Self::missing(id))?;
        webhook.name = input.name.clone();
        webhook.target = input.target.clone();
        webhook.events = input.events.clone();
        if let Some(active) = input.active {
            webhook.active = active;
        }

        Ok(())
    }

    async fn delete_webhook(&self, id: &str) -> Result<()> {
        self.enter(MockCall::Delete(id.to_string())).await?;

        self.lock()
            .webhooks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::missing(id))
    }
}
