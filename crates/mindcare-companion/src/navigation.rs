use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Named screens the coordinator can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Assessment,
    Login,
    Home,
    Counselor,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Assessment => "/",
            Route::Login => "/login",
            Route::Home => "/home",
            Route::Counselor => "/counselor",
        }
    }
}

/// Navigation collaborator. Routing mechanics live on the other side.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Publishes the most recently requested route on a watch channel so a
/// client can poll or await it.
#[derive(Debug)]
pub struct WatchNavigator {
    tx: watch::Sender<Option<Route>>,
}

impl WatchNavigator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Route>> {
        self.tx.subscribe()
    }

    /// The last route requested, if any.
    pub fn pending(&self) -> Option<Route> {
        *self.tx.borrow()
    }
}

impl Default for WatchNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for WatchNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = route.path(), "navigation requested");
        self.tx.send_replace(Some(route));
    }
}
