//! Daylog domain model.
//!
//! # Responsibility
//! - Define the records stored per collection and the read models returned
//!   to callers after default-filling legacy fields.
//! - Own pure rules that do not need storage: day-key ordering, time-block
//!   layout, carry-over membership and completion stamping.
//!
//! # Invariants
//! - `DayKey` string order equals calendar order.
//! - Stored records keep optional fields optional; defaults are applied only
//!   when converting into read models.

pub mod day_key;
pub mod entry;
pub mod project;
pub mod task;
pub mod time_block;
