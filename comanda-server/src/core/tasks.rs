//! Background task management
//!
//! Registers long-lived tasks (the order-event listener), captures their
//! panics and shuts them down together.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Background task registry
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// let token = tasks.shutdown_token();
/// tasks.spawn("order_listener", async move {
///     listener.run(subscription, token).await;
/// });
///
/// // Graceful shutdown
/// tasks.shutdown().await;
/// ```
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

    /// Token tasks watch for the shutdown signal
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Register and start a task
    ///
    /// The future is wrapped so a panic is logged instead of silently
    /// killing the task.
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        let wrapped_future = async move {
            let result: Result<(), Box<dyn std::any::Any + Send>> =
                AssertUnwindSafe(future).catch_unwind().await;
            match result {
                Ok(()) => {
                    if !shutdown.is_cancelled() {
                        tracing::warn!(task = %name, "Background task completed unexpectedly");
                    }
                }
                Err(panic_info) => {
                    let panic_msg: String = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    tracing::error!(task = %name, panic = %panic_msg, "Background task panicked");
                }
            }
        };

        let handle = tokio::spawn(wrapped_future);
        tracing::debug!(task = %name, "Registered background task");
        self.tasks.push(RegisteredTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks that already stopped
    pub fn check_health(&self) -> usize {
        let failed: Vec<_> = self
            .tasks
            .iter()
            .filter(|t| t.handle.is_finished())
            .map(|t| t.name)
            .collect();
        for name in &failed {
            tracing::error!(task = %name, "Background task unexpectedly finished");
        }
        failed.len()
    }

    /// Cancel every task and wait for them to finish
    pub async fn shutdown(self) {
        tracing::info!("Shutting down {} background tasks...", self.tasks.len());

        self.shutdown.cancel();

        for task in self.tasks {
            match task.handle.await {
                Ok(()) => tracing::debug!(task = %task.name, "Task completed"),
                Err(e) if e.is_cancelled() => tracing::debug!(task = %task.name, "Task cancelled"),
                Err(e) => tracing::error!(task = %task.name, error = ?e, "Task panicked"),
            }
        }

        tracing::info!("All background tasks stopped");
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_cancels_tasks() {
        let mut tasks = BackgroundTasks::new();
        let token = tasks.shutdown_token();
        tasks.spawn("waiter", async move {
            token.cancelled().await;
        });
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.check_health(), 0);
        tasks.shutdown().await;
    }

    #[tokio::test]
    async fn test_panic_is_captured() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("boom", async {
            panic!("boom");
        });
        tokio::task::yield_now().await;
        tasks.shutdown().await;
    }
}
