//! Long-running tasks of the server process

mod supervisor;

pub use supervisor::{TaskError, TaskSupervisor};
