//! Maps [`ThemeRequest`]s onto coordinator calls.
//!
//! [`RequestDispatcher::handle`] is the request boundary: every coordinator
//! result, success or failure, becomes exactly one [`ThemeResponse`] carrying
//! the request's correlation id.  Nothing past this point sees a
//! `CollaboratorError`.
//!
//! [`RequestDispatcher::dispatch`] runs `handle` on its own Tokio task and
//! sends the response down an unbounded channel, so a slow activation never
//! holds up a quick `list-themes` behind it.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::application::coordinator::ActivationCoordinator;
use crate::application::ports::CollaboratorError;
use crate::infrastructure::ipc::messages::{ThemeRequest, ThemeResponse};

/// Runs requests against an [`ActivationCoordinator`].
#[derive(Clone)]
pub struct RequestDispatcher {
    coordinator: Arc<ActivationCoordinator>,
    responses: mpsc::UnboundedSender<ThemeResponse>,
}

impl RequestDispatcher {
    pub fn new(
        coordinator: Arc<ActivationCoordinator>,
        responses: mpsc::UnboundedSender<ThemeResponse>,
    ) -> Self {
        Self {
            coordinator,
            responses,
        }
    }

    /// Executes `request` and returns its response.
    pub async fn handle(&self, request: ThemeRequest) -> ThemeResponse {
        debug!(
            correlation_id = request.correlation_id(),
            "handling {}",
            request.kind()
        );

        match request {
            ThemeRequest::ListThemes { correlation_id } => {
                match self.coordinator.list_themes().await {
                    Ok(themes) => ThemeResponse::ThemesList {
                        correlation_id,
                        themes,
                    },
                    Err(err) => failure(correlation_id, "list-themes", &err),
                }
            }
            ThemeRequest::ActiveThemeInfo { correlation_id } => {
                match self.coordinator.active_theme_info().await {
                    Ok(info) => ThemeResponse::ActiveThemeInfo {
                        correlation_id,
                        info,
                    },
                    Err(err) => failure(correlation_id, "active-theme-info", &err),
                }
            }
            ThemeRequest::ActivateTheme {
                correlation_id,
                theme,
            } => match self.coordinator.activate_theme(&theme).await {
                Ok(config) => ThemeResponse::ThemeActivated {
                    correlation_id,
                    config,
                },
                Err(err) => failure(correlation_id, "activate-theme", &err),
            },
            ThemeRequest::AppConfig { correlation_id } => {
                match self.coordinator.app_config().await {
                    Ok(config) => ThemeResponse::AppConfig {
                        correlation_id,
                        config,
                    },
                    Err(err) => failure(correlation_id, "app-config", &err),
                }
            }
        }
    }

    /// Handles `request` on a new task and sends the response to the channel.
    pub fn dispatch(&self, request: ThemeRequest) -> JoinHandle<()> {
        tokio::spawn(self.respond(request))
    }

    /// The task body behind [`dispatch`](Self::dispatch), for callers that
    /// spawn into their own `JoinSet`.
    pub fn respond(&self, request: ThemeRequest) -> impl Future<Output = ()> + Send + 'static {
        let dispatcher = self.clone();
        async move {
            let response = dispatcher.handle(request).await;
            dispatcher.send(response);
        }
    }

    /// Sends a response that did not come from a coordinator call.
    pub fn send(&self, response: ThemeResponse) {
        if self.responses.send(response).is_err() {
            warn!("response channel closed, dropping response");
        }
    }
}

fn failure(correlation_id: String, kind: &str, err: &CollaboratorError) -> ThemeResponse {
    error!(correlation_id = %correlation_id, "{kind} failed: {err}");
    ThemeResponse::error(correlation_id, err.message())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
