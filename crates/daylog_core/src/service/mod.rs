//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the daylog operations.
//! - Apply read-boundary defaults, filtering and ordering.
//! - Keep CLI/UI callers decoupled from storage details.

pub mod entry_service;
pub mod history_service;
pub mod project_service;
pub mod project_task_service;
pub mod stats_service;
pub mod task_service;
