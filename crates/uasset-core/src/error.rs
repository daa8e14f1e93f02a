//! Error types for the uasset-core library.
//!
//! Every decode failure is surfaced as a typed [`Error`]; a failure aborts the
//! parse of the current buffer only, never the process.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for uasset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Table an index was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// The package name table
    Names,
    /// The export map
    Exports,
    /// The import map
    Imports,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Names => "name table",
            Table::Exports => "export map",
            Table::Imports => "import map",
        })
    }
}

/// Comprehensive error type for all uasset operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A read would run past the end of the buffer
    #[error("unexpected end of buffer at offset {offset}: need {needed} bytes, {available} available")]
    UnexpectedEndOfBuffer {
        /// Cursor position when the read was attempted
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes left in the buffer
        available: usize,
    },

    /// Structurally invalid package data
    #[error("malformed package at offset {offset}: {details}")]
    MalformedInput {
        /// Byte offset where the problem was detected
        offset: usize,
        /// Detailed description of the issue
        details: String,
    },

    /// An index resolved outside its table
    #[error("invalid index {index} into {table} of length {len}")]
    InvalidIndex {
        /// Which table was indexed
        table: Table,
        /// The offending index, as stored in the package
        index: i64,
        /// Length of the table
        len: usize,
    },

    /// A Blueprint tag stream hit the end of the buffer before a `None` tag
    #[error("property tag stream of export {export_index} is not terminated (reached offset {offset})")]
    UnterminatedPropertyTagStream {
        /// 1-based export index whose stream was being walked
        export_index: usize,
        /// Position at which the stream ran out
        offset: usize,
    },
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new end-of-buffer error
    pub fn unexpected_end(offset: usize, needed: usize, available: usize) -> Self {
        Self::UnexpectedEndOfBuffer {
            offset,
            needed,
            available,
        }
    }

    /// Creates a new malformed input error
    pub fn malformed(offset: usize, details: impl Into<String>) -> Self {
        Self::MalformedInput {
            offset,
            details: details.into(),
        }
    }

    /// Creates a new invalid index error
    pub fn invalid_index(table: Table, index: impl Into<i64>, len: usize) -> Self {
        Self::InvalidIndex {
            table,
            index: index.into(),
            len,
        }
    }

    /// Creates a new unterminated tag stream error
    pub fn unterminated_tag_stream(export_index: usize, offset: usize) -> Self {
        Self::UnterminatedPropertyTagStream {
            export_index,
            offset,
        }
    }

    /// Returns true if the failure is confined to one package and a batch
    /// should carry on with the next file
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::FileRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_index(Table::Exports, 7, 3);
        assert_eq!(err.to_string(), "invalid index 7 into export map of length 3");

        let err = Error::unexpected_end(10, 4, 2);
        assert!(err.to_string().contains("offset 10"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::malformed(0, "bad magic").is_recoverable());
        assert!(Error::unexpected_end(0, 4, 0).is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!Error::file_read("/test.uasset", io).is_recoverable());
    }
}
