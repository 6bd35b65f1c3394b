use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api_client::GenerateApi;
use crate::session::{Completion, IdeaSession, PendingRequest, SessionError, ToggleAction};

/// Drives an [`IdeaSession`] against a [`GenerateApi`].
///
/// The session lock is held only while issuing or completing a request, never across
/// the network call, so a new submission can overtake a pending judge request.
pub struct Controller<A> {
    api: A,
    session: Mutex<IdeaSession>,
}

impl<A: GenerateApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            session: Mutex::new(IdeaSession::new()),
        }
    }

    /// Copy of the current session, for rendering.
    pub async fn snapshot(&self) -> IdeaSession {
        self.session.lock().await.clone()
    }

    pub async fn submit(&self, idea: &str) -> Result<Completion, SessionError> {
        let pending = self.session.lock().await.submit(idea)?;
        Ok(self.send(pending).await)
    }

    pub async fn toggle_judge(&self) -> ToggleAction {
        let action = self.session.lock().await.toggle_judge();
        if let ToggleAction::Fetch(pending) = &action {
            self.send(pending.clone()).await;
        }
        action
    }

    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }

    async fn send(&self, pending: PendingRequest) -> Completion {
        let mode = pending.ticket.mode();
        let outcome = self
            .api
            .generate(&pending.request)
            .await
            .map_err(|e| e.to_string());

        if let Err(message) = &outcome {
            warn!(%mode, error = %message, "generation request failed");
        }

        let completion = self.session.lock().await.complete(pending.ticket, outcome);
        match completion {
            Completion::Applied => info!(%mode, "generation result applied"),
            Completion::Stale => info!(%mode, "discarded stale generation result"),
        }
        completion
    }
}
