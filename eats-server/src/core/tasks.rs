//! Background task management
//!
//! Registry for long-running and periodic tasks with one shared shutdown
//! token. Tasks are wrapped to capture panics so a crashing sweep never
//! takes the process down silently.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Background task registry
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token tasks should select on to observe shutdown
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Register and start a background task
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            if AssertUnwindSafe(future).catch_unwind().await.is_err() {
                tracing::error!(task = name, "Background task panicked");
            }
        });
        tracing::debug!(task = name, "Background task started");
        self.tasks.push(RegisteredTask { name, handle });
    }

    /// Cancel the shared token and wait for every task to finish, up to
    /// `timeout` each. Tasks still running after that are detached.
    pub async fn shutdown(self, timeout: Duration) {
        self.shutdown.cancel();
        for task in self.tasks {
            match tokio::time::timeout(timeout, task.handle).await {
                Ok(Ok(())) => tracing::debug!(task = task.name, "Background task stopped"),
                Ok(Err(e)) => {
                    tracing::warn!(task = task.name, error = %e, "Background task join failed")
                }
                Err(_) => {
                    tracing::warn!(task = task.name, "Background task did not stop in time")
                }
            }
        }
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}
