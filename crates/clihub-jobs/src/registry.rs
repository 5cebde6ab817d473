//! Cancellation registry: one revocable handle per in-flight job.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Maps job ids to the cancellation tokens their executions watch.
///
/// Tokens are children of a single root token, so firing the root (at
/// shutdown) cancels every registered execution at once. The registry only
/// holds the revocation handle; entry lifetime matches the execution, with
/// the dispatcher unregistering on every exit path.
#[derive(Debug)]
pub struct CancellationRegistry {
    root: CancellationToken,
    tokens: RwLock<HashMap<Uuid, CancellationToken>>,
}

impl CancellationRegistry {
    /// Create a registry with a fresh root token.
    pub fn new() -> Self {
        Self {
            root: CancellationToken::new(),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Register an execution and return the token it should watch.
    pub async fn register(&self, id: Uuid) -> CancellationToken {
        let token = self.root.child_token();
        self.tokens.write().await.insert(id, token.clone());
        token
    }

    /// Fire the token for a job. Returns whether an execution was registered.
    ///
    /// The entry stays until the dispatcher unregisters it.
    pub async fn cancel(&self, id: Uuid) -> bool {
        match self.tokens.read().await.get(&id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Drop a job's entry once its execution has finished.
    pub async fn unregister(&self, id: Uuid) {
        self.tokens.write().await.remove(&id);
    }

    /// A clone of the root token, fired on shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.root.clone()
    }

    /// Fire the root token and return the jobs that had executions in flight.
    pub async fn cancel_all(&self) -> Vec<Uuid> {
        self.root.cancel();
        self.tokens.read().await.keys().copied().collect()
    }
}

impl Default for CancellationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
