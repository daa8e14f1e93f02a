//! The version gate table.
//!
//! Each [`Gate`] names one conditionally present field (or layout change) and
//! the version at which it first appears. Decoders ask the archive summary
//! whether a gate is open instead of comparing versions themselves.

use super::{ObjectVersion, ObjectVersionUe5};
use serde::Serialize;

/// Version at which a gated field appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Threshold {
    /// Introduced on the UE4 line
    Ue4(ObjectVersion),
    /// Introduced on the UE5 line
    Ue5(ObjectVersionUe5),
}

impl Threshold {
    /// Returns true if a package with the given versions is at or past this threshold
    pub fn is_met(self, file_version: i32, file_version_ue5: i32) -> bool {
        match self {
            Threshold::Ue4(v) => file_version >= v.raw(),
            Threshold::Ue5(v) => file_version_ue5 >= v.raw(),
        }
    }
}

macro_rules! gates {
    ($($(#[$doc:meta])* $gate:ident => $line:ident($version:ident),)*) => {
        /// A version-gated field of the package format
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Gate {
            $($(#[$doc])* $gate,)*
        }

        impl Gate {
            /// Every gate, in table order
            pub const ALL: &'static [Gate] = &[$(Gate::$gate,)*];

            /// The version at which this gate opens
            pub const fn threshold(self) -> Threshold {
                match self {
                    $(Gate::$gate => Threshold::$line(version_of!($line, $version)),)*
                }
            }
        }
    };
}

macro_rules! version_of {
    (Ue4, $version:ident) => {
        ObjectVersion::$version
    };
    (Ue5, $version:ident) => {
        ObjectVersionUe5::$version
    };
}

gates! {
    /// Name table entries are followed by a `u32` hash
    NameHash => Ue4(NameHashesSerialized),
    /// Summary carries a localization id (editor data only)
    LocalizationId => Ue4(AddedPackageSummaryLocalizationId),
    /// Summary carries the gatherable text data count/offset
    GatherableTextData => Ue4(SerializeTextInPackages),
    /// Summary carries the soft package references count/offset
    SoftPackageReferences => Ue4(AddStringAssetReferencesMap),
    /// Summary carries the searchable names offset
    SearchableNames => Ue4(AddedSearchableNames),
    /// Summary carries a persistent GUID (editor data only)
    PersistentGuid => Ue4(AddedPackageOwner),
    /// The owner persistent GUID is no longer written
    OwnerPersistentGuidRemoved => Ue4(NonOuterPackageImport),
    /// Saved-by engine version is a structured record instead of a changelist
    EngineVersionObject => Ue4(EngineVersionObject),
    /// Summary carries a compatible-with engine version
    CompatibleEngineVersion => Ue4(PackageSummaryHasCompatibleEngineVersion),
    /// Summary carries the world tile info offset
    WorldTileInfo => Ue4(WorldLevelInfo),
    /// Summary carries chunk ids
    ChunkIds => Ue4(AddedChunkidToAssetdataAndUpackage),
    /// Chunk ids are an array rather than a single value
    ChunkIdArray => Ue4(ChangedChunkidToBeAnArrayOfChunkids),
    /// Summary carries the preload dependency count/offset
    PreloadDependencies => Ue4(PreloadDependenciesInCookedExports),
    /// Export entries carry a template index
    ExportTemplateIndex => Ue4(TemplateindexInCookedExports),
    /// Export serial size and offset are 64-bit
    ExportSerial64 => Ue4(SixtyFourBitExportmapSerialsizes),
    /// Export entries carry the not-always-loaded-for-editor-game flag
    ExportNotAlwaysLoadedForEditorGame => Ue4(LoadForEditorGame),
    /// Export entries carry the is-asset flag
    ExportIsAsset => Ue4(CookedAssetsInEditorSupport),
    /// Export entries carry five dependency fields
    ExportDependencies => Ue4(PreloadDependenciesInCookedExports),
    /// Import entries carry a package name (editor data only)
    ImportPackageName => Ue4(NonOuterPackageImport),
    /// Struct property tags carry the struct GUID
    TagStructGuid => Ue4(StructGuidInPropertyTag),
    /// Array property tags carry the inner type name
    TagArrayInnerType => Ue4(ArrayPropertyInnerTags),
    /// Set and map property tags carry their element type names
    TagSetMap => Ue4(PropertyTagSetMapSupport),
    /// Property tags end with an optional property GUID
    TagPropertyGuid => Ue4(PropertyGuidInPropertyTag),
    /// Summary carries the count of names referenced from export data
    NamesReferencedFromExportData => Ue5(NamesReferencedFromExportData),
    /// Summary carries the payload table of contents offset
    PayloadToc => Ue5(PayloadToc),
    /// Summary carries the data resource offset
    DataResources => Ue5(DataResources),
    /// Export entries no longer carry a package GUID
    ExportPackageGuidRemoved => Ue5(RemoveObjectExportPackageGuid),
    /// Export entries carry the is-inherited-instance flag
    ExportIsInheritedInstance => Ue5(TrackObjectExportIsInherited),
    /// Export entries carry the generate-public-hash flag
    ExportGeneratePublicHash => Ue5(OptionalResources),
    /// Import entries carry the optional flag
    ImportOptional => Ue5(OptionalResources),
}

impl Gate {
    /// Returns true if a package with the given versions carries this field
    pub fn is_open(self, file_version: i32, file_version_ue5: i32) -> bool {
        self.threshold().is_met(file_version, file_version_ue5)
    }
}
