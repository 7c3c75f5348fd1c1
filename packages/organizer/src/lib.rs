//! CourseMap Organizer - Batch shell around the requirement engine.
//!
//! Reads the table extractor's JSON output (degree pages with raw table
//! rows), drives [`coursemap_engine`] over every page, and writes the
//! serialized degree requirements, the group registry, and diagnostics as
//! YAML or JSON.
//!
//! # Architecture
//!
//! - [`intake`]: extraction and course-catalog file loading
//! - [`run`]: the organizing run (rayon over pages, shared registry)
//! - [`yaml`]: output document writers
//! - [`config`]: output constants and engine-config loading
//! - [`cli`]: command-line interface
//! - [`error`]: error types and Result alias

pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod run;
pub mod yaml;

// Re-export main functions
pub use run::{organize_extraction, Organized};

// Re-export commonly used items
pub use error::{OrganizerError, Result};
pub use intake::{load_catalog, load_extraction, DegreePage, Extraction};
pub use yaml::{write_output, OutputFormat};
