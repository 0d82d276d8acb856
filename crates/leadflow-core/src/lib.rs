//! Core library for Leadflow.
//!
//! Contains the tabular view engine every dashboard table is computed with:
//! filter state and the sort toggle, the filter → sort → derive pipeline,
//! locale-aware collation, the central threshold band tables, percentage
//! breakdowns, and display formatting. The record models for each page live
//! in [`models`]. This crate performs no I/O; it reads record snapshots
//! handed to it by the caller.

pub mod bands;
pub mod collate;
pub mod error;
pub mod format;
pub mod models;
pub mod percent;
pub mod query;
pub mod record;
pub mod view;

pub use leadflow_storage::Identified;
