//! HR record core for the HR Pro demo application.
//!
//! This crate keeps employees, leave requests, attendance logs and payroll
//! records mutually consistent: it detects overlapping leave, derives each
//! employee's status from approved leave, aggregates attendance and pay,
//! and persists everything to a key-value store. The [`api`] module exposes
//! the same operations as a small JSON service for a presentation layer.

#![warn(missing_docs)]

pub mod api;
pub mod app;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
