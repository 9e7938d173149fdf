//! HTTP API server for Satchel.
//!
//! This crate wires the record store, spreadsheet ingestor, access gate, and
//! report renderer into one axum application:
//! - `POST /admin/login` — exchange admin credentials for a bearer token
//! - `POST /upload` — roster + progress spreadsheets (bearer-gated)
//! - `POST /getReport` — one student's academic records by identity fields
//! - `GET /api/bulkDownload/{class}/{section}` — PDF report cards (bearer-gated)
//! - `GET /` — liveness

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
mod routes;
pub mod server;
pub mod state;

pub use error::{Error, Result};
