//! Export map entries.

use super::types::{Guid, NameReference};
use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::summary::ArchiveSummary;
use crate::version::Gate;
use serde::Serialize;

/// Preload dependency bookkeeping of an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportDependencies {
    /// Index of the first dependency in the preload dependency list
    pub first_export_dependency: i32,
    /// Never populated: the on-disk slot for it is decoded into
    /// `serialization_before_create`
    pub serialization_before_serialization: i32,
    /// Count of create-before-serialization dependencies
    pub create_before_serialization: i32,
    /// Count of serialization-before-create dependencies
    pub serialization_before_create: i32,
    /// Count of create-before-create dependencies
    pub create_before_create: i32,
}

impl ExportDependencies {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let mut deps = Self {
            first_export_dependency: cursor.read_i32()?,
            ..Self::default()
        };
        // The second and fourth words both land in serialization_before_create;
        // the fourth one wins.
        deps.serialization_before_create = cursor.read_i32()?;
        deps.create_before_serialization = cursor.read_i32()?;
        deps.serialization_before_create = cursor.read_i32()?;
        deps.create_before_create = cursor.read_i32()?;
        Ok(deps)
    }
}

/// An object defined by this package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectExport {
    /// Class of the object (0 = none, >0 export, <0 import)
    pub class_index: i32,
    /// Super struct, for classes and structs
    pub super_index: i32,
    /// Archetype; 0 when the package predates template indices
    pub template_index: i32,
    /// Name of the object
    pub object_name: NameReference,
    /// `EObjectFlags`
    pub object_flags: u32,
    /// Length of the serialized object
    pub serial_size: i64,
    /// Absolute offset of the serialized object
    pub serial_offset: i64,
    /// The export is a forced export of another package
    pub forced_export: bool,
    /// Stripped from client builds
    pub not_for_client: bool,
    /// Stripped from server builds
    pub not_for_server: bool,
    /// Instance created by a parent class default
    pub is_inherited_instance: bool,
    /// Package flags of a forced export
    pub package_flags: u32,
    /// Not loaded by the editor in game mode
    pub not_always_loaded_for_editor_game: bool,
    /// The export is the package's main asset
    pub is_asset: bool,
    /// A public hash is generated for optional-package references
    pub generate_public_hash: bool,
    /// Present when the package has preload dependencies
    pub dependencies: Option<ExportDependencies>,
}

impl ObjectExport {
    /// Reads one export map entry
    pub fn read(cursor: &mut ByteCursor<'_>, summary: &ArchiveSummary) -> Result<Self> {
        let mut export = Self {
            class_index: cursor.read_i32()?,
            super_index: cursor.read_i32()?,
            ..Self::default()
        };
        if summary.supports(Gate::ExportTemplateIndex) {
            export.template_index = cursor.read_i32()?;
        }
        export.object_name = NameReference::read(cursor)?;
        cursor.skip(4)?;
        export.object_flags = cursor.read_u32()?;

        if summary.supports(Gate::ExportSerial64) {
            export.serial_size = cursor.read_i64()?;
            export.serial_offset = cursor.read_i64()?;
        } else {
            export.serial_size = cursor.read_i32()?.into();
            export.serial_offset = cursor.read_i32()?.into();
        }

        export.forced_export = cursor.read_bool32()?;
        export.not_for_client = cursor.read_bool32()?;
        export.not_for_server = cursor.read_bool32()?;

        if !summary.supports(Gate::ExportPackageGuidRemoved) {
            Guid::read(cursor)?;
        }
        if summary.supports(Gate::ExportIsInheritedInstance) {
            export.is_inherited_instance = cursor.read_bool32()?;
        }

        export.package_flags = cursor.read_u32()?;

        if summary.supports(Gate::ExportNotAlwaysLoadedForEditorGame) {
            export.not_always_loaded_for_editor_game = cursor.read_bool32()?;
        }
        if summary.supports(Gate::ExportIsAsset) {
            export.is_asset = cursor.read_bool32()?;
        }
        if summary.supports(Gate::ExportGeneratePublicHash) {
            export.generate_public_hash = cursor.read_bool32()?;
        }
        if summary.supports(Gate::ExportDependencies) {
            export.dependencies = Some(ExportDependencies::read(cursor)?);
        }

        Ok(export)
    }
}
