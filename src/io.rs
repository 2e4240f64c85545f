//! Reader/Writer traits and format dispatch
//!
//! Graphs come in as JSON or YAML documents with `nodes` and `edges`; layouts
//! go out in the same formats, either as a bare node array or as a full
//! document with the edges carried through.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::error::LayoutError;
use crate::graph::{Graph, LaidOutGraph};
use crate::simulation::LayoutEngine;

/// Errors that can occur during reading, laying out or writing
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// A serialization error occurred
    #[error("write error: {0}")]
    Write(String),

    /// The graph was read but could not be laid out
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result type for reader/writer operations
pub type IoResult<T> = Result<T, IoError>;

/// What a writer emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// Array of `{id, x, y}`
    #[default]
    Nodes,
    /// `{nodes, edges}` with the edges unchanged
    Document,
}

/// A reader parses an input document into a [`Graph`]
pub trait GraphReader {
    /// Parse document text into a graph
    fn parse(&self, content: &str) -> IoResult<Graph>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Read and parse a file
    fn read(&self, input: &Path) -> IoResult<Graph> {
        let content = fs::read_to_string(input)?;
        self.parse(&content)
    }

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer serializes a layout result
pub trait LayoutWriter {
    /// Serialize the layout to text
    fn render(&self, layout: &LaidOutGraph, shape: OutputShape) -> IoResult<String>;

    /// Identifier for this output format (e.g., "json", "yaml")
    fn format_id(&self) -> &str;

    /// Serialize the layout to a file
    fn write(&self, layout: &LaidOutGraph, shape: OutputShape, output: &Path) -> IoResult<()> {
        let content = self.render(layout, shape)?;
        fs::write(output, content)?;
        Ok(())
    }
}

/// Reader for JSON graph documents
#[derive(Debug, Default)]
pub struct JsonGraphReader;

impl GraphReader for JsonGraphReader {
    fn parse(&self, content: &str) -> IoResult<Graph> {
        serde_json::from_str(content).map_err(|e| IoError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Reader for YAML graph documents
#[derive(Debug, Default)]
pub struct YamlGraphReader;

impl GraphReader for YamlGraphReader {
    fn parse(&self, content: &str) -> IoResult<Graph> {
        serde_yaml::from_str(content).map_err(|e| IoError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Writer for pretty-printed JSON (2-space indent)
#[derive(Debug, Default)]
pub struct JsonLayoutWriter;

impl LayoutWriter for JsonLayoutWriter {
    fn render(&self, layout: &LaidOutGraph, shape: OutputShape) -> IoResult<String> {
        let result = match shape {
            OutputShape::Nodes => serde_json::to_string_pretty(&layout.nodes),
            OutputShape::Document => serde_json::to_string_pretty(layout),
        };
        result.map_err(|e| IoError::Write(e.to_string()))
    }

    fn format_id(&self) -> &str {
        "json"
    }
}

/// Writer for YAML
#[derive(Debug, Default)]
pub struct YamlLayoutWriter;

impl LayoutWriter for YamlLayoutWriter {
    fn render(&self, layout: &LaidOutGraph, shape: OutputShape) -> IoResult<String> {
        let result = match shape {
            OutputShape::Nodes => serde_yaml::to_string(&layout.nodes),
            OutputShape::Document => serde_yaml::to_string(layout),
        };
        result.map_err(|e| IoError::Write(e.to_string()))
    }

    fn format_id(&self) -> &str {
        "yaml"
    }
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn GraphReader>>,
    writers: Vec<Box<dyn LayoutWriter>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Create a registry with the JSON and YAML readers and writers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(JsonGraphReader));
        registry.register_reader(Box::new(YamlGraphReader));
        registry.register_writer(Box::new(JsonLayoutWriter));
        registry.register_writer(Box::new(YamlLayoutWriter));
        registry
    }

    pub fn register_reader(&mut self, reader: Box<dyn GraphReader>) {
        self.readers.push(reader);
    }

    pub fn register_writer(&mut self, writer: Box<dyn LayoutWriter>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn GraphReader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn LayoutWriter> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn GraphReader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Find a writer for an output path, treating `yml` as `yaml`
    pub fn writer_for_path(&self, path: &Path) -> IoResult<&dyn LayoutWriter> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;
        let format_id = if ext.eq_ignore_ascii_case("yml") {
            "yaml"
        } else {
            ext
        };

        self.writer_for_format(format_id)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }
}

/// Read the graph at `input` with the matching reader and lay it out
pub fn layout_file(
    registry: &FormatRegistry,
    engine: &LayoutEngine,
    input: &Path,
) -> IoResult<LaidOutGraph> {
    let graph = registry.reader_for_path(input)?.read(input)?;
    Ok(engine.layout_graph(&graph)?)
}
