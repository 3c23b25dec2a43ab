//! Campus Core: school domain models, validation, and the SQLite data layer.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod records;
pub mod stats;
pub mod transfer;
pub mod validation;
