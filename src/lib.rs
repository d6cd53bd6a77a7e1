//! rolescan - role-based access control inventory for Angular-style front ends
//!
//! rolescan walks a source tree, finds every place where role names carrying a
//! marker token (`ROLE_MBAA` by default) are attached to templates or code, and
//! writes a single report of those occurrences.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, console output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scan engine (tree walk, extractors, aggregation)
//! - `issues`: Non-fatal problems collected during a scan
//! - `report`: Report rendering (HTML, TSV, JSON)

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod report;
