//! # FTV Common Library
//!
//! Shared code for the FTV worker verification portal:
//! - Worker record model and derived option lists
//! - Remote record store client (hosted table over HTTP)
//! - Identity matching engine
//! - Aggregate statistics and verification time series
//! - Filter/pagination view-model for the dashboard listing
//! - Export row assembly for the report encoders
//! - Passkey session gate and configuration loading

pub mod config;
pub mod error;
pub mod export;
pub mod matcher;
pub mod model;
pub mod session;
pub mod stats;
pub mod store;
pub mod view;

pub use error::{Error, Result};
pub use model::WorkerRecord;
