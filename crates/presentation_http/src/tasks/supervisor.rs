//! Task supervisor
//!
//! Runs the server's long-lived tasks in one `JoinSet` under a shared
//! cancellation token. The first shutdown signal, task failure or task exit
//! cancels every task; tasks that have not stopped after the shutdown
//! timeout are aborted.

use std::{collections::HashMap, error::Error as StdError, future::Future, time::Duration};

use thiserror::Error;
use tokio::task::{Id, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Why a supervised task ended the process
#[derive(Debug, Error)]
pub enum TaskError {
    /// The task returned an error
    #[error("Task '{task}' failed: {source}")]
    Failed {
        task: &'static str,
        #[source]
        source: BoxError,
    },

    /// The task panicked
    #[error("Task '{task}' panicked: {source}")]
    Panicked {
        task: &'static str,
        #[source]
        source: JoinError,
    },
}

type TaskOutput = Result<(), BoxError>;
type Joined = Result<(Id, TaskOutput), JoinError>;

/// Owns the root cancellation token and the set of running tasks
#[derive(Debug)]
pub struct TaskSupervisor {
    token: CancellationToken,
    tasks: JoinSet<TaskOutput>,
    names: HashMap<Id, &'static str>,
    shutdown_timeout: Duration,
}

impl TaskSupervisor {
    /// Create a supervisor that waits `shutdown_timeout` for tasks to stop
    pub fn new(shutdown_timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            tasks: JoinSet::new(),
            names: HashMap::new(),
            shutdown_timeout,
        }
    }

    /// Token cancelled when shutdown starts
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Spawn a named task
    ///
    /// The task is expected to return once [`Self::token`] is cancelled.
    pub fn spawn<F, E>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError>,
    {
        info!(task = name, "Starting task");
        let handle = self
            .tasks
            .spawn(async move { task.await.map_err(Into::into) });
        self.names.insert(handle.id(), name);
    }

    /// Run until `shutdown` resolves or any task ends, then stop everything
    ///
    /// Returns the first task failure, or `Ok(())` when every task stopped
    /// cleanly.
    pub async fn run_until<S>(mut self, shutdown: S) -> Result<(), TaskError>
    where
        S: Future<Output = ()>,
    {
        let mut first_error = None;

        if !self.tasks.is_empty() {
            tokio::select! {
                () = shutdown => info!("Shutdown signal received"),
                () = self.token.cancelled() => info!("Shutdown requested"),
                Some(joined) = self.tasks.join_next_with_id() => {
                    first_error = Self::outcome(&mut self.names, joined, false).err();
                }
            }
        }

        self.token.cancel();

        let drained = tokio::time::timeout(
            self.shutdown_timeout,
            Self::drain(&mut self.tasks, &mut self.names, &mut first_error),
        )
        .await;

        if drained.is_err() {
            warn!(
                remaining = ?self.names.values().collect::<Vec<_>>(),
                timeout_secs = self.shutdown_timeout.as_secs(),
                "Tasks did not stop in time, aborting"
            );
            self.tasks.abort_all();
            while self.tasks.join_next().await.is_some() {}
        }

        first_error.map_or(Ok(()), Err)
    }

    async fn drain(
        tasks: &mut JoinSet<TaskOutput>,
        names: &mut HashMap<Id, &'static str>,
        first_error: &mut Option<TaskError>,
    ) {
        while let Some(joined) = tasks.join_next_with_id().await {
            if let Err(e) = Self::outcome(names, joined, true) {
                first_error.get_or_insert(e);
            }
        }
    }

    fn outcome(
        names: &mut HashMap<Id, &'static str>,
        joined: Joined,
        shutting_down: bool,
    ) -> Result<(), TaskError> {
        let (id, result) = match joined {
            Ok((id, output)) => (id, Ok(output)),
            Err(e) => (e.id(), Err(e)),
        };
        let task = names.remove(&id).unwrap_or("unknown");

        match result {
            Ok(Ok(())) => {
                if shutting_down {
                    info!(task, "Task stopped");
                } else {
                    warn!(task, "Task exited, shutting down");
                }
                Ok(())
            },
            Ok(Err(source)) => {
                error!(task, error = %source, "Task failed");
                Err(TaskError::Failed { task, source })
            },
            Err(source) => {
                error!(task, error = %source, "Task panicked");
                Err(TaskError::Panicked { task, source })
            },
        }
    }
}
