//! Label approval gate CLI library exports for integration testing.
//!
//! This module exposes the run and reporting steps of the binary.

pub mod action_context;
pub mod check;
pub mod config;
pub mod errors;
pub mod workflow_commands;
