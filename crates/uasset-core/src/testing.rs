//! Byte builders for unit tests.

use crate::package::PackageFlags;
use crate::summary::{ArchiveSummary, PACKAGE_MAGIC};
use crate::version::Gate;

/// Little-endian byte sink with chained writers
#[derive(Debug, Default, Clone)]
pub(crate) struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub(crate) fn zeros(self, count: usize) -> Self {
        self.bytes(&vec![0; count])
    }

    pub(crate) fn u8(self, v: u8) -> Self {
        self.bytes(&[v])
    }

    pub(crate) fn u16(self, v: u16) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    pub(crate) fn i16(self, v: i16) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    pub(crate) fn u32(self, v: u32) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    pub(crate) fn i32(self, v: i32) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    pub(crate) fn u64(self, v: u64) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    pub(crate) fn i64(self, v: i64) -> Self {
        self.bytes(&v.to_le_bytes())
    }

    /// Narrow string, NUL terminated
    pub(crate) fn string(self, s: &str) -> Self {
        self.i32(s.len() as i32 + 1).bytes(s.as_bytes()).u8(0)
    }

    /// UTF-16 string, NUL terminated, with a negative length
    pub(crate) fn wide_string(self, s: &str) -> Self {
        let units: Vec<u16> = s.encode_utf16().chain(Some(0)).collect();
        let mut w = self.i32(-(units.len() as i32));
        for unit in units {
            w = w.u16(unit);
        }
        w
    }

    /// Name reference with a zero instance number
    pub(crate) fn name(self, index: i32) -> Self {
        self.i32(index).u32(0)
    }

    pub(crate) fn patch_i32(&mut self, at: usize, v: i32) {
        self.buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }

    pub(crate) fn patch_i64(&mut self, at: usize, v: i64) {
        self.buf[at..at + 8].copy_from_slice(&v.to_le_bytes());
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Archive summary for the given version pair
pub(crate) fn summary(file_version: i32, file_version_ue5: i32) -> ArchiveSummary {
    ArchiveSummary {
        magic: PACKAGE_MAGIC,
        legacy_version: if file_version_ue5 > 0 { -8 } else { -7 },
        legacy_ue3_version: 0,
        file_version,
        file_version_ue5,
        file_licensee_version: 0,
    }
}

/// Export entry of a [`PackageBuilder`] package
#[derive(Debug, Default, Clone)]
pub(crate) struct TestExport {
    pub(crate) class_index: i32,
    pub(crate) object_name: i32,
    pub(crate) data: Vec<u8>,
}

impl TestExport {
    pub(crate) fn new(class_index: i32, object_name: i32) -> Self {
        Self {
            class_index,
            object_name,
            data: Vec::new(),
        }
    }

    /// Serialized object payload, placed after the header tables
    pub(crate) fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }
}

/// Import entry of a [`PackageBuilder`] package
#[derive(Debug, Default, Clone)]
pub(crate) struct TestImport {
    pub(crate) class_package: i32,
    pub(crate) class_name: i32,
    pub(crate) object_name: i32,
}

impl TestImport {
    pub(crate) fn new(class_package: i32, class_name: i32, object_name: i32) -> Self {
        Self {
            class_package,
            class_name,
            object_name,
        }
    }
}

/// Writes a complete package whose layout follows the version gates
#[derive(Debug, Clone)]
pub(crate) struct PackageBuilder {
    summary: ArchiveSummary,
    flags: PackageFlags,
    names: Vec<String>,
    exports: Vec<TestExport>,
    imports: Vec<TestImport>,
    data_resource_offset: i32,
}

impl PackageBuilder {
    pub(crate) fn new(legacy_version: i32, file_version: i32, file_version_ue5: i32) -> Self {
        Self {
            summary: ArchiveSummary {
                legacy_version,
                ..summary(file_version, file_version_ue5)
            },
            flags: PackageFlags::empty(),
            names: Vec::new(),
            exports: Vec::new(),
            imports: Vec::new(),
            data_resource_offset: 0,
        }
    }

    pub(crate) fn package_flags(mut self, flags: PackageFlags) -> Self {
        self.flags = flags;
        self
    }

    pub(crate) fn names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub(crate) fn export(mut self, export: TestExport) -> Self {
        self.exports.push(export);
        self
    }

    pub(crate) fn import(mut self, import: TestImport) -> Self {
        self.imports.push(import);
        self
    }

    pub(crate) fn data_resource_offset(mut self, offset: i32) -> Self {
        self.data_resource_offset = offset;
        self
    }

    fn supports(&self, gate: Gate) -> bool {
        self.summary.supports(gate)
    }

    fn engine_version(&self, w: ByteWriter) -> ByteWriter {
        w.u16(5).u16(3).u16(2).u32(0).i32(0)
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let s = &self.summary;
        let editor = self.flags.has_editor_data();

        let mut w = ByteWriter::new()
            .u32(PACKAGE_MAGIC)
            .i32(s.legacy_version)
            .i32(0)
            .i32(s.file_version);
        if s.legacy_version <= -8 {
            w = w.i32(s.file_version_ue5);
        }
        w = w.i32(0).i32(0); // licensee, custom versions
        let total_header_size_at = w.len();
        w = w.i32(0).i32(0).u32(self.flags.bits());

        let names_at = w.len();
        w = w.i32(self.names.len() as i32).i32(0);
        w = w.i32(0).i32(0); // soft object paths
        if editor && self.supports(Gate::LocalizationId) {
            w = w.string("");
        }
        if self.supports(Gate::GatherableTextData) {
            w = w.i32(0).i32(0);
        }
        let exports_at = w.len();
        w = w.i32(self.exports.len() as i32).i32(0);
        let imports_at = w.len();
        w = w.i32(self.imports.len() as i32).i32(0);
        w = w.i32(0); // depends
        if self.supports(Gate::SoftPackageReferences) {
            w = w.i32(0).i32(0);
        }
        if self.supports(Gate::SearchableNames) {
            w = w.i32(0);
        }
        w = w.i32(0).zeros(16); // thumbnails, package guid
        if editor && self.supports(Gate::PersistentGuid) {
            w = w.zeros(16);
            if !self.supports(Gate::OwnerPersistentGuidRemoved) {
                w = w.zeros(16);
            }
        }
        w = w.i32(0); // generations
        w = if self.supports(Gate::EngineVersionObject) {
            self.engine_version(w)
        } else {
            w.u32(0)
        };
        if self.supports(Gate::CompatibleEngineVersion) {
            w = self.engine_version(w);
        }
        w = w.u32(0).i32(0).u32(0).i32(0); // compression, chunks, source, packages to cook
        if s.has_texture_allocations() {
            w = w.i32(0);
        }
        w = w.i32(0).i64(0); // asset registry, bulk data
        if self.supports(Gate::WorldTileInfo) {
            w = w.i32(0);
        }
        if self.supports(Gate::ChunkIds) {
            w = w.i32(0);
        }
        if self.supports(Gate::PreloadDependencies) {
            w = w.i32(0).i32(0);
        }
        if self.supports(Gate::NamesReferencedFromExportData) {
            w = w.i32(self.names.len() as i32);
        }
        if self.supports(Gate::PayloadToc) {
            w = w.i64(0);
        }
        if self.supports(Gate::DataResources) {
            w = w.i32(self.data_resource_offset);
        }

        if !self.names.is_empty() {
            let at = w.len() as i32;
            w.patch_i32(names_at + 4, at);
            for name in &self.names {
                w = w.string(name);
                if self.supports(Gate::NameHash) {
                    w = w.u32(0);
                }
            }
        }

        let mut serial_slots = Vec::new();
        if !self.exports.is_empty() {
            let at = w.len() as i32;
            w.patch_i32(exports_at + 4, at);
            for export in &self.exports {
                w = w.i32(export.class_index).i32(0);
                if self.supports(Gate::ExportTemplateIndex) {
                    w = w.i32(0);
                }
                w = w.name(export.object_name).i32(0).u32(0);
                serial_slots.push(w.len());
                w = if self.supports(Gate::ExportSerial64) {
                    w.i64(0).i64(0)
                } else {
                    w.i32(0).i32(0)
                };
                w = w.i32(0).i32(0).i32(0);
                if !self.supports(Gate::ExportPackageGuidRemoved) {
                    w = w.zeros(16);
                }
                if self.supports(Gate::ExportIsInheritedInstance) {
                    w = w.i32(0);
                }
                w = w.u32(0);
                for gate in [
                    Gate::ExportNotAlwaysLoadedForEditorGame,
                    Gate::ExportIsAsset,
                    Gate::ExportGeneratePublicHash,
                ] {
                    if self.supports(gate) {
                        w = w.i32(0);
                    }
                }
                if self.supports(Gate::ExportDependencies) {
                    w = w.i32(-1).i32(0).i32(0).i32(0).i32(0);
                }
            }
        }

        if !self.imports.is_empty() {
            let at = w.len() as i32;
            w.patch_i32(imports_at + 4, at);
            for import in &self.imports {
                w = w
                    .name(import.class_package)
                    .name(import.class_name)
                    .i32(0)
                    .name(import.object_name);
                if editor && self.supports(Gate::ImportPackageName) {
                    w = w.name(0);
                }
                if self.supports(Gate::ImportOptional) {
                    w = w.i32(0);
                }
            }
        }

        let header_size = w.len() as i32;
        w.patch_i32(total_header_size_at, header_size);

        for (export, slot) in self.exports.iter().zip(serial_slots) {
            let offset = w.len();
            let size = export.data.len();
            if self.supports(Gate::ExportSerial64) {
                w.patch_i64(slot, size as i64);
                w.patch_i64(slot + 8, offset as i64);
            } else {
                w.patch_i32(slot, size as i32);
                w.patch_i32(slot + 4, offset as i32);
            }
            w = w.bytes(&export.data);
        }

        w.finish()
    }
}
