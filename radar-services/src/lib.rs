//! Service layer for NewsRadar
//!
//! [`QueryService`] is the single boundary callers talk to: it validates
//! inputs, drives the stores and query engines, and folds every outcome,
//! success or failure, into one uniform JSON envelope. Nothing propagates
//! past it.

pub mod facade;
pub mod validators;

pub use facade::{QueryService, ServiceConfig, SummaryQuery};
