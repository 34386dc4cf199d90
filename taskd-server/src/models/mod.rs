//! Domain models and validation

pub mod pagination;
pub mod patch;
pub mod task;
pub mod validation;

pub use pagination::Page;
pub use patch::Patch;
pub use task::{NewTask, Task, TaskPatch, TaskStatus, TaskTitle};
pub use validation::ValidationError;
