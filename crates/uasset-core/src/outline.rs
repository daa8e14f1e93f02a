//! Package parsing entry points and the outline pass.
//!
//! [`PackageParser::parse`] decodes the archive summary and package header.
//! [`PackageParser::outline`] additionally projects the class name of every
//! export and import and walks the property tag stream of every Blueprint
//! export.
//!
//! ## Failure model
//!
//! The header is all-or-nothing: any decode error aborts the parse. Class
//! name projections and Blueprint walks are per-object; a failure there is
//! recorded on that object and the rest of the outline is still produced.

use crate::config::ParserConfig;
use crate::cursor::ByteCursor;
use crate::error::{Error, Result};
use crate::package::{NameReference, PackageHeader};
use crate::property::{read_tag_stream, PropertyTag};
use crate::summary::ArchiveSummary;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Class name of the exports whose tag streams are walked
pub const BLUEPRINT_CLASS: &str = "Blueprint";

/// Class projection of one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOutline {
    /// 1-based export index
    pub index: i32,
    /// Object name
    pub object_name: String,
    /// Class name; `None` when the class index does not resolve
    pub class_name: Option<String>,
}

/// Class projection of one import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutline {
    /// Negative 1-based import index
    pub index: i32,
    /// Object name
    pub object_name: String,
    /// Class name
    pub class_name: Option<String>,
}

/// Decoded tag stream of one Blueprint export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagStream {
    /// Tags in stream order, not including the terminator
    pub tags: Vec<PropertyTag>,
    /// Position just past the terminating tag's name
    pub end_offset: usize,
}

/// Result of walking one Blueprint export
#[derive(Debug)]
pub struct BlueprintTags {
    /// 1-based export index
    pub export_index: usize,
    /// The decoded stream, or why it could not be decoded
    pub result: Result<TagStream>,
}

impl Serialize for BlueprintTags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BlueprintTags", 2)?;
        state.serialize_field("export_index", &self.export_index)?;
        match &self.result {
            Ok(stream) => state.serialize_field("stream", stream)?,
            Err(e) => state.serialize_field("error", &e.to_string())?,
        }
        state.end()
    }
}

/// A decoded package together with its class projections
#[derive(Debug, Serialize)]
pub struct Outline {
    /// The archive preamble
    pub summary: ArchiveSummary,
    /// The package header
    pub header: PackageHeader,
    /// One entry per export, in export order
    pub exports: Vec<ExportOutline>,
    /// One entry per import, in import order
    pub imports: Vec<ImportOutline>,
    /// One entry per Blueprint export
    pub blueprints: Vec<BlueprintTags>,
}

impl Outline {
    /// Feeds the outline to `visitor`, exports first, then imports, then
    /// Blueprint streams.
    pub fn accept<V: OutlineVisitor + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        visitor.visit_summary(&self.summary)?;
        for export in &self.exports {
            visitor.visit_export(export)?;
        }
        for import in &self.imports {
            visitor.visit_import(import)?;
        }
        for blueprint in &self.blueprints {
            visitor.visit_blueprint(blueprint)?;
        }
        Ok(())
    }

    /// Number of Blueprint walks that failed
    pub fn failed_blueprints(&self) -> usize {
        self.blueprints.iter().filter(|b| b.result.is_err()).count()
    }
}

/// Consumer of a decoded outline.
///
/// Every method defaults to a no-op, so implementors only override what they
/// need. Returning an error stops [`Outline::accept`].
pub trait OutlineVisitor {
    /// Called once with the archive summary
    fn visit_summary(&mut self, summary: &ArchiveSummary) -> Result<()> {
        let _ = summary;
        Ok(())
    }

    /// Called for each export
    fn visit_export(&mut self, export: &ExportOutline) -> Result<()> {
        let _ = export;
        Ok(())
    }

    /// Called for each import
    fn visit_import(&mut self, import: &ImportOutline) -> Result<()> {
        let _ = import;
        Ok(())
    }

    /// Called for each Blueprint export
    fn visit_blueprint(&mut self, blueprint: &BlueprintTags) -> Result<()> {
        let _ = blueprint;
        Ok(())
    }
}

/// A visitor that ignores everything
pub struct NullVisitor;

impl OutlineVisitor for NullVisitor {}

/// A visitor that counts what it sees
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatsVisitor {
    /// Number of exports
    pub export_count: usize,
    /// Number of imports
    pub import_count: usize,
    /// Number of exports whose class did not resolve
    pub unresolved_class_count: usize,
    /// Number of Blueprint exports
    pub blueprint_count: usize,
    /// Number of tags across all decoded Blueprint streams
    pub tag_count: usize,
    /// Number of Blueprint streams that failed to decode
    pub failed_blueprint_count: usize,
}

impl OutlineVisitor for StatsVisitor {
    fn visit_export(&mut self, export: &ExportOutline) -> Result<()> {
        self.export_count += 1;
        if export.class_name.is_none() {
            self.unresolved_class_count += 1;
        }
        Ok(())
    }

    fn visit_import(&mut self, _import: &ImportOutline) -> Result<()> {
        self.import_count += 1;
        Ok(())
    }

    fn visit_blueprint(&mut self, blueprint: &BlueprintTags) -> Result<()> {
        self.blueprint_count += 1;
        match &blueprint.result {
            Ok(stream) => self.tag_count += stream.tags.len(),
            Err(_) => self.failed_blueprint_count += 1,
        }
        Ok(())
    }
}

/// Decoder for whole package buffers
#[derive(Debug, Clone, Default)]
pub struct PackageParser {
    config: ParserConfig,
}

impl PackageParser {
    /// Creates a parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decodes the package header
    pub fn parse(&self, data: &[u8]) -> Result<PackageHeader> {
        let mut cursor = ByteCursor::with_config(data, &self.config);
        let summary = ArchiveSummary::read(&mut cursor)?;
        PackageHeader::read(&mut cursor, &summary)
    }

    /// Decodes the package header and builds the outline
    pub fn outline(&self, data: &[u8]) -> Result<Outline> {
        let mut cursor = ByteCursor::with_config(data, &self.config);
        let summary = ArchiveSummary::read(&mut cursor)?;
        let header = PackageHeader::read(&mut cursor, &summary)?;

        let mut exports = Vec::with_capacity(header.exports.len());
        let mut blueprints = Vec::new();
        for (i, export) in header.exports.iter().enumerate() {
            let index = object_index(i, 1);
            let class_name = project_class_name(&header, index);

            if self.config.walk_blueprints && class_name.as_deref() == Some(BLUEPRINT_CLASS) {
                let export_index = i + 1;
                let result = walk_blueprint(
                    &mut cursor,
                    &header,
                    &summary,
                    export_index,
                    export.serial_offset,
                );
                if let Err(e) = &result {
                    warn!("Blueprint export {}: {}", export_index, e);
                }
                blueprints.push(BlueprintTags {
                    export_index,
                    result,
                });
            }

            exports.push(ExportOutline {
                index,
                object_name: display_name(&header, &export.object_name),
                class_name,
            });
        }

        let imports = header
            .imports
            .iter()
            .enumerate()
            .map(|(i, import)| {
                let index = object_index(i, -1);
                ImportOutline {
                    index,
                    object_name: display_name(&header, &import.object_name),
                    class_name: project_class_name(&header, index),
                }
            })
            .collect();

        debug!(
            "Outline: {} exports, {} imports, {} blueprints",
            exports.len(),
            header.imports.len(),
            blueprints.len()
        );

        Ok(Outline {
            summary,
            header,
            exports,
            imports,
            blueprints,
        })
    }

    /// Reads a file and builds its outline
    pub fn outline_file(&self, path: impl AsRef<Path>) -> Result<Outline> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
        self.outline(&data)
    }
}

/// Converts a 0-based table position into a signed 1-based object index
fn object_index(position: usize, sign: i32) -> i32 {
    i32::try_from(position + 1).unwrap_or(i32::MAX) * sign
}

fn project_class_name(header: &PackageHeader, index: i32) -> Option<String> {
    match header.class_index_to_class_name(index) {
        Ok(name) => Some(name.to_owned()),
        Err(e) => {
            debug!("Object {} has no resolvable class: {}", index, e);
            None
        }
    }
}

fn display_name(header: &PackageHeader, name: &NameReference) -> String {
    header
        .names
        .display(name)
        .unwrap_or_else(|_| format!("<name {}>", name.index))
}

fn walk_blueprint(
    cursor: &mut ByteCursor<'_>,
    header: &PackageHeader,
    summary: &ArchiveSummary,
    export_index: usize,
    serial_offset: i64,
) -> Result<TagStream> {
    let offset = usize::try_from(serial_offset).map_err(|_| {
        Error::malformed(cursor.position(), format!("negative serial offset {}", serial_offset))
    })?;
    cursor.at(offset, |c| {
        let tags = read_tag_stream(c, &header.names, summary, export_index)?;
        Ok(TagStream {
            tags,
            end_offset: c.position(),
        })
    })
}

/// Decodes the package header of `data` with default configuration
pub fn parse(data: &[u8]) -> Result<PackageHeader> {
    PackageParser::new().parse(data)
}

/// Builds the outline of `data` with default configuration
pub fn outline(data: &[u8]) -> Result<Outline> {
    PackageParser::new().outline(data)
}

/// Reads a file and decodes its package header
pub fn parse_file(path: impl AsRef<Path>) -> Result<PackageHeader> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    parse(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ByteWriter, PackageBuilder, TestExport, TestImport};
    use pretty_assertions::assert_eq;

    const NAMES: &[&str] = &[
        "None",
        "Blueprint",
        "BP_Door",
        "/Script/Engine",
        "Class",
        "IntProperty",
        "OpenAngle",
        "StaticMesh",
        "SM_Door",
    ];

    fn blueprint_stream() -> Vec<u8> {
        ByteWriter::new()
            .name(6) // OpenAngle
            .name(5) // IntProperty
            .i32(4)
            .i32(0)
            .u8(0) // no property guid
            .i32(90)
            .name(0)
            .finish()
    }

    fn door_package() -> Vec<u8> {
        PackageBuilder::new(-7, 522, 0)
            .names(NAMES)
            .export(TestExport::new(-1, 2).data(blueprint_stream()))
            .export(TestExport::new(-2, 8))
            .import(TestImport::new(3, 4, 1))
            .import(TestImport::new(3, 4, 7))
            .build()
    }

    #[test]
    fn test_outline_projections() {
        let outline = outline(&door_package()).unwrap();
        assert_eq!(
            outline.exports,
            vec![
                ExportOutline {
                    index: 1,
                    object_name: "BP_Door".into(),
                    class_name: Some("Blueprint".into()),
                },
                ExportOutline {
                    index: 2,
                    object_name: "SM_Door".into(),
                    class_name: Some("StaticMesh".into()),
                },
            ]
        );
        assert_eq!(outline.imports[0].index, -1);
        assert_eq!(outline.imports[1].class_name.as_deref(), Some("Class"));
    }

    #[test]
    fn test_blueprint_walk() {
        let data = door_package();
        let outline = outline(&data).unwrap();
        assert_eq!(outline.blueprints.len(), 1);

        let blueprint = &outline.blueprints[0];
        assert_eq!(blueprint.export_index, 1);
        let stream = blueprint.result.as_ref().unwrap();
        assert_eq!(stream.tags.len(), 1);
        assert_eq!(stream.tags[0].size, 4);
        // The last bytes of the payload are the terminator's name
        let serial_offset = outline.header.exports[0].serial_offset as usize;
        assert_eq!(stream.end_offset, serial_offset + blueprint_stream().len());
    }

    #[test]
    fn test_walk_disabled() {
        let parser = PackageParser::with_config(ParserConfig::new().walk_blueprints(false));
        let outline = parser.outline(&door_package()).unwrap();
        assert!(outline.blueprints.is_empty());
        assert_eq!(outline.exports.len(), 2);
    }

    #[test]
    fn test_broken_blueprint_keeps_header() {
        let unterminated = ByteWriter::new().name(6).name(5).i32(4).i32(0).u8(0).finish();
        let data = PackageBuilder::new(-7, 522, 0)
            .names(NAMES)
            .export(TestExport::new(-1, 2).data(unterminated))
            .import(TestImport::new(3, 4, 1))
            .build();

        let outline = outline(&data).unwrap();
        assert_eq!(outline.failed_blueprints(), 1);
        assert!(matches!(
            outline.blueprints[0].result,
            Err(Error::UnterminatedPropertyTagStream { export_index: 1, .. })
        ));
        assert_eq!(outline.header.exports.len(), 1);
    }

    #[test]
    fn test_unresolved_class() {
        let data = PackageBuilder::new(-7, 522, 0)
            .names(NAMES)
            .export(TestExport::new(0, 2))
            .build();
        let outline = outline(&data).unwrap();
        assert_eq!(outline.exports[0].class_name, None);
    }

    #[test]
    fn test_stats_visitor() {
        let outline = outline(&door_package()).unwrap();
        let mut stats = StatsVisitor::default();
        outline.accept(&mut stats).unwrap();
        assert_eq!(
            stats,
            StatsVisitor {
                export_count: 2,
                import_count: 2,
                unresolved_class_count: 0,
                blueprint_count: 1,
                tag_count: 1,
                failed_blueprint_count: 0,
            }
        );
        assert!(outline.accept(&mut NullVisitor).is_ok());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/door.uasset").unwrap_err();
        assert!(!err.is_recoverable());
    }
}
