//! Input/output collaborators: CSV ingest, result exports, fitted-set JSON.
//!
//! Nothing in here computes; the core stays free of I/O.

pub mod curve;
pub mod export;
pub mod ingest;
