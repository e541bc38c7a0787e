// Library for the binary and integration tests

pub mod config;
pub mod error;
pub mod importer;
pub mod inventory;
pub mod models;
pub mod monitoring;
pub mod pipeline;
