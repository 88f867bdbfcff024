//! Error types for cadence-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CadenceError {
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CadenceError>;
