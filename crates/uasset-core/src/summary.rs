//! The archive preamble and the custom version block.
//!
//! The preamble fixes the legacy version and both object version lines. Every
//! later layout decision is derived from it.

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};
use crate::version::{Gate, ObjectVersion, ObjectVersionUe5};
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Tag every package file starts with
pub const PACKAGE_MAGIC: u32 = 0x9E2A_83C1;

/// Oldest legacy file version this decoder understands
pub const OLDEST_LEGACY_VERSION: i32 = -8;

/// Newest legacy file version this decoder understands
pub const NEWEST_LEGACY_VERSION: i32 = -5;

/// Size of one entry of the optimized custom version block
const CUSTOM_VERSION_SIZE: usize = 20;

/// Size of the fixed prefix of one entry of the GUID custom version block
const GUID_CUSTOM_VERSION_PREFIX_SIZE: usize = 20;

/// How the custom version block is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomVersionFormat {
    /// Fixed-size entries (legacy version below -5)
    Optimized,
    /// Fixed prefix plus a friendly name string
    Guids,
}

/// The fixed-size file preamble
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    /// File tag, always [`PACKAGE_MAGIC`]
    pub magic: u32,
    /// Legacy file version (negative, −8 ..= −5)
    pub legacy_version: i32,
    /// Legacy UE3 version, not used by the decoder
    pub legacy_ue3_version: i32,
    /// Ordinal on the UE4 line
    pub file_version: i32,
    /// Ordinal on the UE5 line, 0 for packages predating it
    pub file_version_ue5: i32,
    /// Licensee version
    pub file_licensee_version: i32,
}

impl ArchiveSummary {
    /// Reads and validates the preamble
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let magic_at = cursor.position();
        let magic = cursor.read_u32()?;
        if magic != PACKAGE_MAGIC {
            return Err(Error::malformed(
                magic_at,
                format!("bad package magic {:#010X}, expected {:#010X}", magic, PACKAGE_MAGIC),
            ));
        }

        let legacy_at = cursor.position();
        let legacy_version = cursor.read_i32()?;
        if !(OLDEST_LEGACY_VERSION..=NEWEST_LEGACY_VERSION).contains(&legacy_version) {
            return Err(Error::malformed(
                legacy_at,
                format!(
                    "unsupported legacy file version {} (expected {}..={})",
                    legacy_version, OLDEST_LEGACY_VERSION, NEWEST_LEGACY_VERSION
                ),
            ));
        }

        let legacy_ue3_version = cursor.read_i32()?;
        let file_version = cursor.read_i32()?;
        let file_version_ue5 = if legacy_version <= -8 {
            cursor.read_i32()?
        } else {
            0
        };
        let file_licensee_version = cursor.read_i32()?;

        let summary = Self {
            magic,
            legacy_version,
            legacy_ue3_version,
            file_version,
            file_version_ue5,
            file_licensee_version,
        };

        if file_version > ObjectVersion::LATEST.raw() {
            warn!(
                "File version {} is newer than {}; decoding as the latest known layout",
                file_version,
                ObjectVersion::LATEST
            );
        }
        if file_version_ue5 > ObjectVersionUe5::LATEST.raw() {
            warn!(
                "UE5 file version {} is newer than {}; decoding as the latest known layout",
                file_version_ue5,
                ObjectVersionUe5::LATEST
            );
        }

        debug!(
            "Archive summary: legacy {}, file version {}, UE5 version {}, licensee {}",
            legacy_version, file_version, file_version_ue5, file_licensee_version
        );

        Ok(summary)
    }

    /// Layout of the custom version block that follows the preamble
    pub fn custom_version_format(&self) -> CustomVersionFormat {
        if self.legacy_version < -5 {
            CustomVersionFormat::Optimized
        } else {
            CustomVersionFormat::Guids
        }
    }

    /// Returns true if the package carries the field guarded by `gate`
    pub fn supports(&self, gate: Gate) -> bool {
        gate.is_open(self.file_version, self.file_version_ue5)
    }

    /// Returns true if the header still carries the texture allocation word
    pub fn has_texture_allocations(&self) -> bool {
        self.legacy_version > -7
    }

    /// The named UE4 version, if it is one this crate knows
    pub fn object_version(&self) -> Option<ObjectVersion> {
        ObjectVersion::from_raw(self.file_version)
    }

    /// The named UE5 version, if any
    pub fn object_version_ue5(&self) -> Option<ObjectVersionUe5> {
        ObjectVersionUe5::from_raw(self.file_version_ue5)
    }
}

/// Skips the custom version block, returning the number of entries in it
pub fn skip_custom_versions(
    cursor: &mut ByteCursor<'_>,
    format: CustomVersionFormat,
) -> Result<usize> {
    let count = cursor.read_count()?;
    for _ in 0..count {
        match format {
            CustomVersionFormat::Optimized => cursor.skip(CUSTOM_VERSION_SIZE)?,
            CustomVersionFormat::Guids => {
                cursor.skip(GUID_CUSTOM_VERSION_PREFIX_SIZE)?;
                let friendly_name = cursor.read_string()?;
                trace!("Custom version {}", friendly_name);
            }
        }
    }
    Ok(count)
}
