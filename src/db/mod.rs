pub mod migrations;
pub mod repository;

pub use migrations::run_migrations;
pub use repository::{MetaRepo, SnapshotRepo};
