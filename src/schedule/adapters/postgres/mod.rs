//! `PostgreSQL` persistence adapter built on diesel and r2d2.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresScheduleRepository, SchedulePgPool};
