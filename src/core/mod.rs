//! Core implementation: graph engine, policy model and their support code

pub mod config;
pub mod error;
pub mod graph;
pub mod naming;
pub mod policy;
