//! # Knowledge Point Ingest
//!
//! Batch ingestion pipeline for exam-prep knowledge point documents.
//!
//! The pipeline scans a flat directory of semi-structured text files,
//! derives each file's hierarchical code from its filename, parses the
//! three-stage / multi-module structure, fingerprints the raw content for
//! incremental re-processing, and idempotently upserts the result into a
//! SQLite store while producing a machine-readable import report.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌─────────┐
//! │ Scanner  │──▶│ Code +    │──▶│ Parser + │──▶│ SQLite  │
//! │ (dir)    │   │ Detector  │   │ Hasher   │   │ Upsert  │
//! └──────────┘   └───────────┘   └──────────┘   └────┬────┘
//!                                                    │
//!                                               ┌────▼────┐
//!                                               │ Report  │
//!                                               └─────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! kpoint init                   # create database
//! kpoint import                 # ingest knowledge files
//! kpoint import --dry-run       # parse-only preview
//! kpoint stats                  # what's stored
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`scan`] | Source directory scanning |
//! | [`code`] | Filename code extraction |
//! | [`parser`] | Stage/module structure parsing |
//! | [`detect`] | Fingerprinting and change detection |
//! | [`store`] | Idempotent persistence |
//! | [`report`] | Import run reporting |
//! | [`import`] | Pipeline orchestration |
//! | [`stats`] | Database overview |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod code;
pub mod config;
pub mod db;
pub mod detect;
pub mod import;
pub mod migrate;
pub mod models;
pub mod parser;
pub mod report;
pub mod scan;
pub mod stats;
pub mod store;
