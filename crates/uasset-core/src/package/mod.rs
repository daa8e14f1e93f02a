//! Package header decoding.
//!
//! The header follows the archive summary and is a strictly ordered run of
//! fields, many of them present only past a version [`Gate`]. Tables (names,
//! soft object paths, exports, imports) are declared inline as a count and an
//! absolute offset and read out of line.
//!
//! ## Index conventions
//!
//! Object references are signed 1-based indices: `0` is no object, a
//! positive value `n` is export `n - 1` and a negative value `-n` is import
//! `n - 1`. See [`ObjectRef`].

mod export;
mod import;
mod types;

use crate::cursor::ByteCursor;
use crate::error::{Error, Result, Table};
use crate::summary::{skip_custom_versions, ArchiveSummary};
use crate::version::Gate;
use bitflags::bitflags;
use serde::Serialize;
use tracing::{debug, trace};

pub use export::{ExportDependencies, ObjectExport};
pub use import::ObjectImport;
pub use types::{EngineVersion, Guid, NameReference, NameTable, SoftObjectPath, GUID_SIZE};

/// Size of one generation record
const GENERATION_INFO_SIZE: usize = 8;

/// Size of one compressed chunk record
const COMPRESSED_CHUNK_SIZE: usize = 16;

bitflags! {
    /// `EPackageFlags`
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct PackageFlags: u32 {
        /// Newly created, not yet saved
        const NEWLY_CREATED = 0x0000_0001;
        /// Optional on clients
        const CLIENT_OPTIONAL = 0x0000_0002;
        /// Only needed on the server
        const SERVER_SIDE_ONLY = 0x0000_0004;
        /// Native script package
        const COMPILED_IN = 0x0000_0010;
        /// Loaded for diffing only
        const FOR_DIFFING = 0x0000_0020;
        /// Editor-only package
        const EDITOR_ONLY = 0x0000_0040;
        /// Developer module
        const DEVELOPER = 0x0000_0080;
        /// Loaded only in uncooked builds
        const UNCOOKED_ONLY = 0x0000_0100;
        /// Cooked package
        const COOKED = 0x0000_0200;
        /// Holds no asset object
        const CONTAINS_NO_ASSET = 0x0000_0400;
        /// Properties are serialized without tags
        const UNVERSIONED_PROPERTIES = 0x0000_2000;
        /// Holds map data shared with a level
        const CONTAINS_MAP_DATA = 0x0000_4000;
        /// Being compiled
        const COMPILING = 0x0001_0000;
        /// Holds a level
        const CONTAINS_MAP = 0x0002_0000;
        /// Has text to gather for localization
        const REQUIRES_LOCALIZATION_GATHER = 0x0004_0000;
        /// Created for play-in-editor
        const PLAY_IN_EDITOR = 0x0010_0000;
        /// Holds script code
        const CONTAINS_SCRIPT = 0x0020_0000;
        /// Cannot be exported to disk
        const DISALLOW_EXPORT = 0x0040_0000;
        /// Imports are resolved at runtime
        const DYNAMIC_IMPORTS = 0x1000_0000;
        /// Generated at runtime
        const RUNTIME_GENERATED = 0x2000_0000;
        /// Reloaded for the cooker
        const RELOADING_FOR_COOKER = 0x4000_0000;
        /// Editor-only data was stripped
        const FILTER_EDITOR_ONLY = 0x8000_0000;

        // Unused bits still round-trip
        const _ = !0;
    }
}

impl PackageFlags {
    /// Returns true unless editor-only data was filtered out at cook time
    pub fn has_editor_data(self) -> bool {
        !self.contains(PackageFlags::FILTER_EDITOR_ONLY)
    }
}

/// A decoded object reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRef {
    /// No object
    Null,
    /// 0-based position in the export map
    Export(usize),
    /// 0-based position in the import map
    Import(usize),
}

impl ObjectRef {
    /// Decodes a signed 1-based object index
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => ObjectRef::Null,
            i if i > 0 => ObjectRef::Export(i as usize - 1),
            i => ObjectRef::Import(i.unsigned_abs() as usize - 1),
        }
    }
}

/// The decoded package header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageHeader {
    /// Number of entries in the (skipped) custom version block
    pub custom_version_count: usize,
    /// Size of everything before the first export payload
    pub total_header_size: i32,
    /// Editor folder name
    pub folder_name: String,
    /// `EPackageFlags`
    pub package_flags: PackageFlags,
    /// The name table
    pub names: NameTable,
    /// The soft object path table
    pub soft_object_paths: Vec<SoftObjectPath>,
    /// Present in editor packages past `AddedPackageSummaryLocalizationId`
    pub localization_id: Option<String>,
    /// Number of gatherable text entries
    pub gatherable_text_data_count: i32,
    /// Offset of the gatherable text entries
    pub gatherable_text_data_offset: i32,
    /// The export map
    pub exports: Vec<ObjectExport>,
    /// The import map
    pub imports: Vec<ObjectImport>,
    /// Offset of the depends map
    pub depends_offset: i32,
    /// Number of soft package references
    pub soft_package_references_count: i32,
    /// Offset of the soft package references
    pub soft_package_references_offset: i32,
    /// Offset of the searchable names map
    pub searchable_names_offset: i32,
    /// Offset of the thumbnail table
    pub thumbnail_table_offset: i32,
    /// Number of generation records (skipped)
    pub generation_count: usize,
    /// Engine that saved the package
    pub saved_by_engine_version: EngineVersion,
    /// Oldest engine that can load the package
    pub compatible_with_engine_version: EngineVersion,
    /// Package compression flags
    pub compression_flags: u32,
    /// Hash of the package source, used by the cooker
    pub package_source: u32,
    /// Offset of the asset registry data
    pub asset_registry_data_offset: i32,
    /// Offset where bulk data begins
    pub bulk_data_start_offset: i64,
    /// Offset of the world tile info
    pub world_tile_info_data_offset: i32,
    /// Streaming install chunks the package belongs to
    pub chunk_ids: Vec<i32>,
    /// −1 when the package has no preload dependencies
    pub preload_dependency_count: i32,
    /// Offset of the preload dependency list
    pub preload_dependency_offset: i32,
    /// Defaults to the name table length on pre-UE5 packages
    pub names_referenced_from_export_data_count: i32,
    /// −1 when the package has no payload table of contents
    pub payload_toc_offset: i64,
    /// Offset of the data resource table, 0 when absent
    pub data_resource_offset: i32,
}

impl PackageHeader {
    /// Reads the header that follows the archive summary, starting with the
    /// custom version block.
    pub fn read(cursor: &mut ByteCursor<'_>, summary: &ArchiveSummary) -> Result<Self> {
        let mut header = Self {
            custom_version_count: skip_custom_versions(cursor, summary.custom_version_format())?,
            total_header_size: cursor.read_i32()?,
            folder_name: cursor.read_string()?,
            package_flags: PackageFlags::from_bits_retain(cursor.read_u32()?),
            ..Self::default()
        };
        let has_editor_data = header.package_flags.has_editor_data();

        let name_hashes = summary.supports(Gate::NameHash);
        header.names = NameTable::new(cursor.read_deferred_array(|c| {
            let name = c.read_string()?;
            if name_hashes {
                c.skip(4)?;
            }
            Ok(name)
        })?);
        trace!("Read {} names", header.names.len());

        header.soft_object_paths = cursor.read_deferred_array(SoftObjectPath::read)?;

        if has_editor_data && summary.supports(Gate::LocalizationId) {
            header.localization_id = Some(cursor.read_string()?);
        }

        (header.gatherable_text_data_count, header.gatherable_text_data_offset) =
            read_count_and_offset(cursor, summary.supports(Gate::GatherableTextData), (0, 0))?;

        header.exports = cursor.read_deferred_array(|c| ObjectExport::read(c, summary))?;
        trace!("Read {} exports", header.exports.len());

        header.imports =
            cursor.read_deferred_array(|c| ObjectImport::read(c, summary, has_editor_data))?;
        trace!("Read {} imports", header.imports.len());

        header.depends_offset = cursor.read_i32()?;

        (header.soft_package_references_count, header.soft_package_references_offset) =
            read_count_and_offset(cursor, summary.supports(Gate::SoftPackageReferences), (0, 0))?;

        if summary.supports(Gate::SearchableNames) {
            header.searchable_names_offset = cursor.read_i32()?;
        }

        header.thumbnail_table_offset = cursor.read_i32()?;

        cursor.skip(GUID_SIZE)?;
        if has_editor_data && summary.supports(Gate::PersistentGuid) {
            cursor.skip(GUID_SIZE)?;
            if !summary.supports(Gate::OwnerPersistentGuidRemoved) {
                cursor.skip(GUID_SIZE)?;
            }
        }

        header.generation_count = cursor.read_count()?;
        for _ in 0..header.generation_count {
            cursor.skip(GENERATION_INFO_SIZE)?;
        }

        header.saved_by_engine_version = if summary.supports(Gate::EngineVersionObject) {
            EngineVersion::read(cursor)?
        } else {
            EngineVersion::from_changelist(cursor.read_u32()?)
        };

        header.compatible_with_engine_version = if summary.supports(Gate::CompatibleEngineVersion) {
            EngineVersion::read(cursor)?
        } else {
            header.saved_by_engine_version.clone()
        };

        header.compression_flags = cursor.read_u32()?;
        let compressed_chunks = cursor.read_count()?;
        for _ in 0..compressed_chunks {
            cursor.skip(COMPRESSED_CHUNK_SIZE)?;
        }

        header.package_source = cursor.read_u32()?;

        let additional_packages = cursor.read_inline_array(|c| c.read_string())?;
        trace!("Skipped {} additional packages to cook", additional_packages.len());

        if summary.has_texture_allocations() {
            cursor.skip(4)?;
        }

        header.asset_registry_data_offset = cursor.read_i32()?;
        header.bulk_data_start_offset = cursor.read_i64()?;

        if summary.supports(Gate::WorldTileInfo) {
            header.world_tile_info_data_offset = cursor.read_i32()?;
        }

        if summary.supports(Gate::ChunkIds) {
            header.chunk_ids = if summary.supports(Gate::ChunkIdArray) {
                cursor.read_inline_array(|c| c.read_i32())?
            } else {
                vec![cursor.read_i32()?]
            };
        }

        (header.preload_dependency_count, header.preload_dependency_offset) =
            read_count_and_offset(cursor, summary.supports(Gate::PreloadDependencies), (-1, 0))?;

        header.names_referenced_from_export_data_count =
            if summary.supports(Gate::NamesReferencedFromExportData) {
                cursor.read_i32()?
            } else {
                i32::try_from(header.names.len()).unwrap_or(i32::MAX)
            };

        header.payload_toc_offset = if summary.supports(Gate::PayloadToc) {
            cursor.read_i64()?
        } else {
            -1
        };

        if summary.supports(Gate::DataResources) {
            header.data_resource_offset = cursor.read_i32()?.max(0);
        }

        debug!(
            "Package header: {} names, {} exports, {} imports, saved by {}",
            header.names.len(),
            header.exports.len(),
            header.imports.len(),
            header.saved_by_engine_version
        );

        Ok(header)
    }

    /// Returns true unless editor-only data was stripped from the package
    pub fn has_editor_data(&self) -> bool {
        self.package_flags.has_editor_data()
    }

    /// Resolves a name reference to its string
    pub fn name(&self, name: &NameReference) -> Result<&str> {
        self.names.resolve(name)
    }

    /// Returns the export with the given 1-based index
    pub fn export(&self, index: i32) -> Result<&ObjectExport> {
        match ObjectRef::from_index(index) {
            ObjectRef::Export(i) => self.exports.get(i),
            _ => None,
        }
        .ok_or_else(|| Error::invalid_index(Table::Exports, index, self.exports.len()))
    }

    /// Returns the import with the given 1-based index (passed as a negative value)
    pub fn import(&self, index: i32) -> Result<&ObjectImport> {
        match ObjectRef::from_index(index) {
            ObjectRef::Import(i) => self.imports.get(i),
            _ => None,
        }
        .ok_or_else(|| Error::invalid_index(Table::Imports, index, self.imports.len()))
    }

    /// Resolves an object index to the name of the object it refers to
    pub fn class_index_to_object_name(&self, index: i32) -> Result<&str> {
        match ObjectRef::from_index(index) {
            ObjectRef::Null => Err(Error::invalid_index(Table::Exports, index, self.exports.len())),
            ObjectRef::Export(_) => self.name(&self.export(index)?.object_name),
            ObjectRef::Import(_) => self.name(&self.import(index)?.object_name),
        }
    }

    /// Resolves an object index to the name of the object's class.
    ///
    /// Exports name their class through another object index; imports carry
    /// the class name directly. An export whose class is itself is rejected.
    pub fn class_index_to_class_name(&self, index: i32) -> Result<&str> {
        match ObjectRef::from_index(index) {
            ObjectRef::Null => Err(Error::invalid_index(Table::Exports, index, self.exports.len())),
            ObjectRef::Export(_) => {
                let class_index = self.export(index)?.class_index;
                if class_index == index {
                    return Err(Error::invalid_index(Table::Exports, class_index, self.exports.len()));
                }
                self.class_index_to_object_name(class_index)
            }
            ObjectRef::Import(_) => self.name(&self.import(index)?.class_name),
        }
    }
}

fn read_count_and_offset(
    cursor: &mut ByteCursor<'_>,
    present: bool,
    default: (i32, i32),
) -> Result<(i32, i32)> {
    if present {
        Ok((cursor.read_i32()?, cursor.read_i32()?))
    } else {
        Ok(default)
    }
}
