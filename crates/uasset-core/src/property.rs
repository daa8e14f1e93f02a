//! Property tag decoding.
//!
//! A tagged object body is a sequence of property tags, each followed by
//! `size` bytes of value data, and terminated by a tag named `None`. Only the
//! tags are decoded here; value bytes are skipped by their declared size.

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};
use crate::package::{Guid, NameReference, NameTable};
use crate::summary::ArchiveSummary;
use crate::version::Gate;
use serde::Serialize;
use tracing::trace;

/// Name of the tag that terminates a tag stream
pub const NONE_NAME: &str = "None";

/// Type-specific metadata that follows the fixed part of a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum PropertyTagExtra {
    /// Extra data was not decoded: the type name carries an instance number
    None,
    /// `StructProperty`
    Struct {
        /// Name of the struct type
        struct_name: NameReference,
        /// Struct GUID, present past `StructGuidInPropertyTag`
        struct_guid: Option<Guid>,
    },
    /// `BoolProperty`; the value is stored in the tag itself
    Bool {
        /// The property value
        value: bool,
    },
    /// `EnumName`
    Enum {
        /// Name of the enum type
        enum_name: NameReference,
    },
    /// `ArrayProperty`
    Array {
        /// Element type, present past `ArrayPropertyInnerTags`
        inner_type: Option<NameReference>,
    },
    /// `OptionalProperty`
    Optional {
        /// Value type
        inner_type: NameReference,
    },
    /// `SetProperty`
    Set {
        /// Element type
        inner_type: NameReference,
    },
    /// `MapProperty`
    Map {
        /// Key type
        key_type: NameReference,
        /// Value type
        value_type: NameReference,
    },
    /// Any other type, or a set/map predating their tag metadata
    Unknown {
        /// The resolved type name
        type_name: String,
    },
}

/// A decoded property tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyTag {
    /// Property name
    pub name: NameReference,
    /// Property type, e.g. `IntProperty`
    pub type_name: NameReference,
    /// Length of the value data that follows the tag
    pub size: i32,
    /// Element index for static arrays
    pub array_index: i32,
    /// Type-specific metadata
    pub extra: PropertyTagExtra,
    /// Property GUID, present past `PropertyGuidInPropertyTag` when flagged
    pub property_guid: Option<Guid>,
}

impl PropertyTag {
    /// Reads one tag.
    ///
    /// Returns `None` for the terminating tag, in which case only its name has
    /// been consumed.
    pub fn read(
        cursor: &mut ByteCursor<'_>,
        names: &NameTable,
        summary: &ArchiveSummary,
    ) -> Result<Option<Self>> {
        let name = NameReference::read(cursor)?;
        if names.resolve(&name)? == NONE_NAME {
            return Ok(None);
        }

        let type_name = NameReference::read(cursor)?;
        let size = cursor.read_i32()?;
        let array_index = cursor.read_i32()?;

        let resolved_type = names.resolve(&type_name)?;

        let extra = if type_name.number == 0 {
            PropertyTagExtra::read(cursor, resolved_type, summary)?
        } else {
            PropertyTagExtra::None
        };

        let property_guid = if summary.supports(Gate::TagPropertyGuid) {
            Guid::read_optional(cursor)?
        } else {
            None
        };

        Ok(Some(Self {
            name,
            type_name,
            size,
            array_index,
            extra,
            property_guid,
        }))
    }
}

impl PropertyTagExtra {
    fn read(cursor: &mut ByteCursor<'_>, type_name: &str, summary: &ArchiveSummary) -> Result<Self> {
        let set_map = summary.supports(Gate::TagSetMap);
        Ok(match type_name {
            "StructProperty" => PropertyTagExtra::Struct {
                struct_name: NameReference::read(cursor)?,
                struct_guid: if summary.supports(Gate::TagStructGuid) {
                    Some(Guid::read(cursor)?)
                } else {
                    None
                },
            },
            "BoolProperty" => PropertyTagExtra::Bool {
                value: cursor.read_u8()? != 0,
            },
            "EnumName" => PropertyTagExtra::Enum {
                enum_name: NameReference::read(cursor)?,
            },
            "ArrayProperty" => PropertyTagExtra::Array {
                inner_type: if summary.supports(Gate::TagArrayInnerType) {
                    Some(NameReference::read(cursor)?)
                } else {
                    None
                },
            },
            "OptionalProperty" => PropertyTagExtra::Optional {
                inner_type: NameReference::read(cursor)?,
            },
            "SetProperty" if set_map => PropertyTagExtra::Set {
                inner_type: NameReference::read(cursor)?,
            },
            "MapProperty" if set_map => PropertyTagExtra::Map {
                key_type: NameReference::read(cursor)?,
                value_type: NameReference::read(cursor)?,
            },
            other => PropertyTagExtra::Unknown {
                type_name: other.to_owned(),
            },
        })
    }
}

/// Walks the tag stream of one export, skipping each tag's value bytes.
///
/// The stream must end with a `None` tag; running out of buffer first is
/// [`Error::UnterminatedPropertyTagStream`].
pub fn read_tag_stream(
    cursor: &mut ByteCursor<'_>,
    names: &NameTable,
    summary: &ArchiveSummary,
    export_index: usize,
) -> Result<Vec<PropertyTag>> {
    let mut tags = Vec::new();
    loop {
        let offset = cursor.position();
        let tag = match PropertyTag::read(cursor, names, summary) {
            Ok(Some(tag)) => tag,
            Ok(None) => {
                trace!("Export {}: {} tags", export_index, tags.len());
                return Ok(tags);
            }
            Err(Error::UnexpectedEndOfBuffer { .. }) => {
                return Err(Error::unterminated_tag_stream(export_index, cursor.len()))
            }
            Err(e) => return Err(e),
        };

        let size = usize::try_from(tag.size).map_err(|_| {
            Error::malformed(offset, format!("negative property size {}", tag.size))
        })?;
        cursor
            .skip(size)
            .map_err(|_| Error::unterminated_tag_stream(export_index, cursor.len()))?;

        tags.push(tag);
    }
}
