//! Delayed hand-off to another screen, tied to the owning session.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::CompanionError;
use crate::navigation::{Navigator, Route};

/// A navigation scheduled to fire after a delay.
///
/// Cancelled explicitly with [`ScheduledHandoff::cancel`] or implicitly when
/// dropped, so a torn-down session never navigates.
#[derive(Debug)]
pub struct ScheduledHandoff {
    route: Route,
    handle: JoinHandle<()>,
}

impl ScheduledHandoff {
    /// Must be called from within a Tokio runtime.
    pub fn schedule(
        delay: Duration,
        navigator: Arc<dyn Navigator>,
        route: Route,
    ) -> Result<Self, CompanionError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| CompanionError::NoRuntime)?;

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            info!(route = route.path(), "escalation hand-off");
            navigator.navigate(route);
        });

        debug!(route = route.path(), delay_ms = delay.as_millis() as u64, "hand-off scheduled");
        Ok(Self { route, handle })
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!(route = self.route.path(), "hand-off cancelled");
            self.handle.abort();
        }
    }
}

impl Drop for ScheduledHandoff {
    fn drop(&mut self) {
        self.cancel();
    }
}
