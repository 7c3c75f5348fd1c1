//! Output generation: degrees and groups documents.

pub mod text;
pub mod writer;

pub use writer::{write_output, OutputFormat};
