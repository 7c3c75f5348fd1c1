//! CourseMap Engine - Degree requirement structure inference.
//!
//! This crate turns semi-structured degree-requirement tables (extracted
//! from university catalog pages) into a compact symbolic encoding of
//! graduation requirements: which courses, how many credits, which
//! groups/electives, and how they combine.
//!
//! # Example
//!
//! ```
//! use coursemap_engine::{organize_page, CourseCatalog, EngineConfig, RawRow, RawTable};
//! use coursemap_engine::types::{TableClass, TableId};
//!
//! let table = RawTable {
//!     table_id: TableId(1),
//!     degree: "Biology, BS".to_string(),
//!     header_text: "Biology, BS".to_string(),
//!     table_class: TableClass::CourseList,
//!     source_link: String::new(),
//!     rows: vec![
//!         RawRow {
//!             label: "BIO 101".to_string(),
//!             title: "General Biology".to_string(),
//!             credits: "4".to_string(),
//!             semantic_class: None,
//!             indent_px: 0,
//!             is_table_header: false,
//!             superscripts: Vec::new(),
//!             fragment_link: None,
//!         },
//!         RawRow {
//!             label: "Total Credits".to_string(),
//!             title: String::new(),
//!             credits: "4".to_string(),
//!             semantic_class: None,
//!             indent_px: 0,
//!             is_table_header: false,
//!             superscripts: Vec::new(),
//!             fragment_link: None,
//!         },
//!     ],
//! };
//!
//! let result = organize_page(&[table], &CourseCatalog::default(), &EngineConfig::default())
//!     .expect("valid configuration");
//! assert_eq!(result.tables[0].code, "_BIO101_4_credits_");
//! ```
//!
//! # Architecture
//!
//! Rows flow strictly downstream through five stages:
//!
//! - [`normalize`]: raw extractor records to canonical rows
//! - [`classify`]: row types and provisional header levels
//! - [`groups`]: metagroup detection and group-header promotion
//! - [`credits`]: credit-sum validation
//! - [`resolve`]: cross-references, wildcards, and the group registry
//! - [`collapse`]: hierarchical collapse to one expression per table
//!
//! Supporting modules: [`types`] (data model), [`code`] (the expression
//! grammar), [`phrases`] and [`parse`] (label parsing), [`config`]
//! (per-catalog tunables), [`registry`], [`degree`], [`error`], and
//! [`organize`] (per-page orchestration).

pub mod classify;
pub mod code;
pub mod collapse;
pub mod config;
pub mod credits;
pub mod degree;
pub mod error;
pub mod groups;
pub mod normalize;
pub mod organize;
pub mod parse;
pub mod phrases;
pub mod registry;
pub mod resolve;
pub mod types;

// Re-export the main entry points
pub use organize::{finish_tables, organize_page, prepare_tables, CoverageStats, PageResult, TableFailure};

// Re-export commonly used items
pub use code::{Code, Expr, Modifier, Op, Quantity};
pub use collapse::SerializedTable;
pub use config::EngineConfig;
pub use degree::DegreeType;
pub use error::{EngineError, Result};
pub use registry::{CourseCatalog, GroupRegistry};
pub use types::{Credits, Flag, RawRow, RawTable, RowType, Table, TableClass, TableId};
