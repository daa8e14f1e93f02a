//! # uasset-core
//!
//! A decoder for the headers of Unreal Engine package files (`.uasset`,
//! `.umap`).
//!
//! This crate provides the core functionality for:
//! - Decoding the archive summary and the version-dependent package header
//! - Resolving names and object indices against the name, export and import tables
//! - Walking the property tag streams of Blueprint exports
//!
//! ## Architecture
//!
//! - [`cursor`]: Positional little-endian reader
//! - [`version`]: The UE4/UE5 object version lines and the gate table
//! - [`summary`]: Archive preamble and custom version block
//! - [`package`]: Package header, exports and imports
//! - [`property`]: Property tag decoding
//! - [`outline`]: Entry points and the outline pass
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use uasset_core::{PackageParser, ParserConfig};
//! use std::fs;
//!
//! let data = fs::read("./Content/BP_Door.uasset")?;
//!
//! let parser = PackageParser::with_config(ParserConfig::new().strict_bools(true));
//! let outline = parser.outline(&data)?;
//!
//! for export in &outline.exports {
//!     println!("{} : {:?}", export.object_name, export.class_name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! Implement [`OutlineVisitor`] to feed a decoded [`Outline`] into your own
//! model.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod outline;
pub mod package;
pub mod property;
pub mod summary;
pub mod version;

#[cfg(test)]
mod testing;

// Re-export primary types for convenience
pub use config::ParserConfig;
pub use cursor::ByteCursor;
pub use error::{Error, Result, Table};
pub use outline::{
    outline, parse, parse_file, BlueprintTags, ExportOutline, ImportOutline, NullVisitor, Outline,
    OutlineVisitor, PackageParser, StatsVisitor, TagStream,
};
pub use package::{
    EngineVersion, NameReference, NameTable, ObjectExport, ObjectImport, ObjectRef, PackageFlags,
    PackageHeader,
};
pub use property::{PropertyTag, PropertyTagExtra};
pub use summary::ArchiveSummary;
pub use version::{Gate, ObjectVersion, ObjectVersionUe5};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
