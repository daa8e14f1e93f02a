//! Import map entries.

use super::types::NameReference;
use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::summary::ArchiveSummary;
use crate::version::Gate;
use serde::Serialize;

/// A reference to an object defined in another package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectImport {
    /// Package that defines the object's class
    pub class_package: NameReference,
    /// Name of the object's class
    pub class_name: NameReference,
    /// Outer object (0 = none, >0 export, <0 import)
    pub outer_index: i32,
    /// Name of the object
    pub object_name: NameReference,
    /// Package name; only present in editor packages
    pub package_name: Option<NameReference>,
    /// The import may be missing at load time
    pub import_optional: bool,
}

impl ObjectImport {
    /// Reads one import map entry
    pub fn read(
        cursor: &mut ByteCursor<'_>,
        summary: &ArchiveSummary,
        has_editor_data: bool,
    ) -> Result<Self> {
        let class_package = NameReference::read(cursor)?;
        let class_name = NameReference::read(cursor)?;
        let outer_index = cursor.read_i32()?;
        let object_name = NameReference::read(cursor)?;

        let package_name = if has_editor_data && summary.supports(Gate::ImportPackageName) {
            Some(NameReference::read(cursor)?)
        } else {
            None
        };
        let import_optional = if summary.supports(Gate::ImportOptional) {
            cursor.read_bool32()?
        } else {
            false
        };

        Ok(Self {
            class_package,
            class_name,
            outer_index,
            object_name,
            package_name,
            import_optional,
        })
    }
}
