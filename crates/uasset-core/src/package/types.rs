//! Small records shared by the package decoders.

use crate::cursor::ByteCursor;
use crate::error::{Error, Result, Table};
use serde::Serialize;
use std::fmt;

/// Size of a serialized GUID in bytes
pub const GUID_SIZE: usize = 16;

/// A 128-bit GUID stored as four little-endian `u32`s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub struct Guid {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl Guid {
    /// Reads a GUID
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            a: cursor.read_u32()?,
            b: cursor.read_u32()?,
            c: cursor.read_u32()?,
            d: cursor.read_u32()?,
        })
    }

    /// Reads a presence byte followed by a GUID when the byte is non-zero
    pub fn read_optional(cursor: &mut ByteCursor<'_>) -> Result<Option<Self>> {
        Ok(if cursor.read_u8()? != 0 {
            Some(Self::read(cursor)?)
        } else {
            None
        })
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}{:08X}{:08X}{:08X}", self.a, self.b, self.c, self.d)
    }
}

/// Reference into the package name table (`FName`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NameReference {
    /// Index into the name table
    pub index: i32,
    /// Instance suffix; 0 means no suffix
    pub number: u32,
}

impl NameReference {
    /// Reads a name reference
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            index: cursor.read_i32()?,
            number: cursor.read_u32()?,
        })
    }
}

/// The package's interned string pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameTable(Vec<String>);

impl NameTable {
    /// Wraps an already decoded list of names
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table holds no names
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name stored at `index`
    pub fn get(&self, index: i32) -> Result<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.0.get(i))
            .map(String::as_str)
            .ok_or_else(|| Error::invalid_index(Table::Names, index, self.0.len()))
    }

    /// Resolves a name reference to its base string, ignoring the instance number
    pub fn resolve(&self, name: &NameReference) -> Result<&str> {
        self.get(name.index)
    }

    /// Resolves a name reference to its display form (`Base_N-1` when numbered)
    pub fn display(&self, name: &NameReference) -> Result<String> {
        let base = self.resolve(name)?;
        Ok(match name.number {
            0 => base.to_owned(),
            n => format!("{}_{}", base, n - 1),
        })
    }

    /// Iterates the names in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Engine version a package was saved with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineVersion {
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
    /// Patch version
    pub patch: u16,
    /// Changelist in the low 31 bits, licensee flag in the top bit
    pub changelist_and_licensee_bit: u32,
    /// Source branch name, may be empty
    pub branch: String,
}

impl EngineVersion {
    const LICENSEE_BIT: u32 = 0x8000_0000;

    /// Reads a structured engine version
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            major: cursor.read_u16()?,
            minor: cursor.read_u16()?,
            patch: cursor.read_u16()?,
            changelist_and_licensee_bit: cursor.read_u32()?,
            branch: cursor.read_string()?,
        })
    }

    /// Synthesizes a 4.0.0 version from a bare changelist (older packages)
    pub fn from_changelist(changelist_and_licensee_bit: u32) -> Self {
        Self {
            major: 4,
            minor: 0,
            patch: 0,
            changelist_and_licensee_bit,
            branch: String::new(),
        }
    }

    /// Returns true if the version was built by a licensee
    pub fn is_licensee_version(&self) -> bool {
        self.changelist_and_licensee_bit & Self::LICENSEE_BIT != 0
    }

    /// The changelist without the licensee flag
    pub fn changelist(&self) -> u32 {
        self.changelist_and_licensee_bit & !Self::LICENSEE_BIT
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}-{}",
            self.major,
            self.minor,
            self.patch,
            self.changelist()
        )?;
        if !self.branch.is_empty() {
            write!(f, "+{}", self.branch)?;
        }
        Ok(())
    }
}

/// Entry of the soft object path table.
///
/// The four leading words are not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SoftObjectPath {
    /// Uninterpreted leading words
    pub unknown: [i32; 4],
    /// The object path
    pub path: String,
}

impl SoftObjectPath {
    /// Reads a soft object path entry
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            unknown: [
                cursor.read_i32()?,
                cursor.read_i32()?,
                cursor.read_i32()?,
                cursor.read_i32()?,
            ],
            path: cursor.read_string()?,
        })
    }
}
