//! The UE5 object version line.
//!
//! Packages saved before UE5 carry no value on this line and decode as `0`,
//! which is below every variant.

version_line! {
    /// Package file version of the UE5 line (`FileVersionUE5`)
    pub enum ObjectVersionUe5 {
        InitialVersion = 1000,
        NamesReferencedFromExportData,
        PayloadToc,
        OptionalResources,
        LargeWorldCoordinates,
        RemoveObjectExportPackageGuid,
        TrackObjectExportIsInherited,
        FSoftObjectPathRemoveAssetPathFNames,
        AddSoftObjectPathList,
        DataResources,
    }
}
