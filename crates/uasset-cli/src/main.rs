//! uasset - Outline Unreal Engine package headers
//!
//! This tool decodes the header of `.uasset` / `.umap` files and prints the
//! name table size, every export and import with its class, and the property
//! tags of Blueprint exports.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use uasset_core::{
    NameTable, Outline, PackageParser, ParserConfig, PropertyTagExtra, StatsVisitor,
};
use walkdir::WalkDir;

/// File extensions of package files
const PACKAGE_EXTENSIONS: &[&str] = &["uasset", "umap"];

/// Outline Unreal Engine package headers
#[derive(Parser, Debug)]
#[command(name = "uasset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Reject booleans stored as anything other than 0 or 1
    #[arg(long)]
    strict_bools: bool,

    /// Skip walking the property tags of Blueprint exports
    #[arg(long)]
    no_blueprints: bool,

    /// Maximum element count accepted for any table
    #[arg(long, default_value_t = uasset_core::config::DEFAULT_MAX_TABLE_LEN)]
    max_table_len: usize,

    /// Only print the summary line
    #[arg(long)]
    summary_only: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single package file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of packages to process recursively
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Output format for outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable listing
    Text,
    /// One JSON document per line
    Json,
}

/// Tracks processed package contents so identical files are decoded once
#[derive(Default)]
struct PackageRegistry {
    /// Maps content hash -> first path seen with that content
    seen: HashMap<String, PathBuf>,
    /// Statistics
    stats: RegistryStats,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RegistryStats {
    parsed: usize,
    failed: usize,
    duplicates_skipped: usize,
    blueprints: usize,
    failed_blueprints: usize,
}

impl PackageRegistry {
    fn new() -> Self {
        Self::default()
    }

    /// Compute a short hash of the content (first 16 chars of blake3)
    fn content_hash(content: &[u8]) -> String {
        let hash = blake3::hash(content);
        hash.to_hex()[..16].to_string()
    }

    /// Records `path` under `content_hash`, returning the earlier path if the
    /// same content was already registered
    fn register(&mut self, path: &Path, content_hash: &str) -> Option<&Path> {
        if self.seen.contains_key(content_hash) {
            self.stats.duplicates_skipped += 1;
            return self.seen.get(content_hash).map(PathBuf::as_path);
        }
        self.seen.insert(content_hash.to_string(), path.to_path_buf());
        None
    }

    fn record(&mut self, outline: &Outline) {
        self.stats.parsed += 1;
        self.stats.blueprints += outline.blueprints.len();
        self.stats.failed_blueprints += outline.failed_blueprints();
    }

    fn summary_line(&self) -> String {
        format!(
            "Summary: {} parsed, {} failed, {} duplicates skipped, {} blueprints ({} failed)",
            self.stats.parsed,
            self.stats.failed,
            self.stats.duplicates_skipped,
            self.stats.blueprints,
            self.stats.failed_blueprints
        )
    }
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    outline: &'a Outline,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let parser = PackageParser::with_config(parser_config(&cli));
    let mut registry = PackageRegistry::new();

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, &parser, file, &mut registry)?;
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, &parser, directory, &mut registry)?;
    } else {
        bail!("Either --file or --directory must be specified")
    }

    if cli.format == OutputFormat::Text {
        println!("{}", registry.summary_line());
    }
    Ok(())
}

fn parser_config(cli: &Cli) -> ParserConfig {
    ParserConfig::new()
        .strict_bools(cli.strict_bools)
        .walk_blueprints(!cli.no_blueprints)
        .max_table_len(cli.max_table_len)
}

/// Process a single package file
fn process_single_file(
    cli: &Cli,
    parser: &PackageParser,
    file: &Path,
    registry: &mut PackageRegistry,
) -> Result<()> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    process_package(cli, parser, file, registry)
}

/// Process a directory of packages recursively
fn process_directory(
    cli: &Cli,
    parser: &PackageParser,
    directory: &Path,
    registry: &mut PackageRegistry,
) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let mut files_seen = 0;
    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !is_package_file(path) {
            trace!("Skipping non-package: {}", path.display());
            continue;
        }

        files_seen += 1;
        debug!("Processing package: {}", path.display());
        if let Err(e) = process_package(cli, parser, path, registry) {
            // Log error but continue with other files
            warn!("Error processing {}: {:#}", path.display(), e);
            registry.stats.failed += 1;
        }
    }

    info!("Processed {} package files", files_seen);
    Ok(())
}

/// Returns true if the path has a package file extension
fn is_package_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            PACKAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Decode one package and print its outline
fn process_package(
    cli: &Cli,
    parser: &PackageParser,
    path: &Path,
    registry: &mut PackageRegistry,
) -> Result<()> {
    trace!("Reading {}", path.display());
    let data =
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let content_hash = PackageRegistry::content_hash(&data);
    if let Some(original) = registry.register(path, &content_hash) {
        debug!(
            "Skipping duplicate: {} (same content as {})",
            path.display(),
            original.display()
        );
        return Ok(());
    }

    let outline = parser
        .outline(&data)
        .with_context(|| format!("Failed to decode package: {}", path.display()))?;
    registry.record(&outline);

    if cli.summary_only {
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(path, &outline)?),
        OutputFormat::Json => {
            let report = FileReport {
                path,
                outline: &outline,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    Ok(())
}

/// Render an outline as an indented listing
fn render_text(path: &Path, outline: &Outline) -> Result<String, fmt::Error> {
    let header = &outline.header;
    let summary = &outline.summary;
    let mut out = String::new();

    let version = summary
        .object_version()
        .map(|v| v.to_string())
        .unwrap_or_else(|| summary.file_version.to_string());
    writeln!(out, "{}", path.display())?;
    writeln!(
        out,
        "  version {}, UE5 {}, saved by {}",
        version, summary.file_version_ue5, header.saved_by_engine_version
    )?;
    writeln!(
        out,
        "  {} names, {} exports, {} imports",
        header.names.len(),
        header.exports.len(),
        header.imports.len()
    )?;

    for export in &outline.exports {
        writeln!(
            out,
            "  export {:>4} {} : {}",
            export.index,
            export.object_name,
            export.class_name.as_deref().unwrap_or("?")
        )?;
    }
    for import in &outline.imports {
        writeln!(
            out,
            "  import {:>4} {} : {}",
            import.index,
            import.object_name,
            import.class_name.as_deref().unwrap_or("?")
        )?;
    }

    for blueprint in &outline.blueprints {
        match &blueprint.result {
            Ok(stream) => {
                writeln!(
                    out,
                    "  blueprint {} ({} tags)",
                    blueprint.export_index,
                    stream.tags.len()
                )?;
                for tag in &stream.tags {
                    writeln!(
                        out,
                        "    {}: {}{} [{} bytes]",
                        display(&header.names, &tag.name),
                        display(&header.names, &tag.type_name),
                        describe_extra(&header.names, &tag.extra),
                        tag.size
                    )?;
                }
            }
            Err(e) => {
                writeln!(out, "  blueprint {} failed: {}", blueprint.export_index, e)?;
            }
        }
    }

    let mut stats = StatsVisitor::default();
    if outline.accept(&mut stats).is_ok() && stats.unresolved_class_count > 0 {
        writeln!(out, "  {} exports without a class", stats.unresolved_class_count)?;
    }

    Ok(out)
}

fn display(names: &NameTable, name: &uasset_core::NameReference) -> String {
    names
        .display(name)
        .unwrap_or_else(|_| format!("<name {}>", name.index))
}

fn describe_extra(names: &NameTable, extra: &PropertyTagExtra) -> String {
    match extra {
        PropertyTagExtra::Struct { struct_name, .. } => format!("<{}>", display(names, struct_name)),
        PropertyTagExtra::Bool { value } => format!(" = {}", value),
        PropertyTagExtra::Enum { enum_name } => format!("<{}>", display(names, enum_name)),
        PropertyTagExtra::Array {
            inner_type: Some(inner),
        }
        | PropertyTagExtra::Optional { inner_type: inner }
        | PropertyTagExtra::Set { inner_type: inner } => format!("<{}>", display(names, inner)),
        PropertyTagExtra::Map {
            key_type,
            value_type,
        } => format!("<{}, {}>", display(names, key_type), display(names, value_type)),
        PropertyTagExtra::Array { inner_type: None }
        | PropertyTagExtra::None
        | PropertyTagExtra::Unknown { .. } => String::new(),
    }
}
