//! Configuration objects backed by JSON files.
//!
//! A [`ConfigFile`] is a document loaded from disk together with where it came
//! from. Domain configuration types wrap it and read their settings through an
//! [`Accessor`](crate::view::Accessor) on [`ConfigFile::root`]; relative paths
//! found in the settings are resolved against the directory of the file.

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    Result,
    tree::{Document, Node},
    view::{HasBackingNode, lenient},
};

pub mod errors;

pub use errors::ConfigError;

/// How a configuration object came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from an existing file
    LoadedFromFile,
    /// Created empty, without reading any file
    Empty,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::LoadedFromFile => f.write_str("LoadedFromFile"),
            ConfigOrigin::Empty => f.write_str("Empty"),
        }
    }
}

/// A JSON configuration document and its file metadata.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    document: Document,
    root: Node,
    path: Option<PathBuf>,
    work_directory: Option<PathBuf>,
    origin: ConfigOrigin,
    name: Option<String>,
}

impl ConfigFile {
    /// Creates an empty configuration that is not tied to any file
    pub fn empty() -> Self {
        let document = Document::new();
        let root = document.root();
        Self {
            document,
            root,
            path: None,
            work_directory: None,
            origin: ConfigOrigin::Empty,
            name: None,
        }
    }

    /// Loads the configuration stored at `path`.
    ///
    /// The root of the file must be an object.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| ConfigError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;

        let document = Document::from_value(value);
        let root = document.root();
        if !root.is_object() {
            return Err(ConfigError::NotAnObject {
                path: path.to_path_buf(),
                actual: root.kind(),
            }
            .into());
        }

        tracing::debug!(path = %path.display(), nodes = document.node_count(), "Loaded configuration");
        let mut config = Self {
            document,
            root,
            path: None,
            work_directory: None,
            origin: ConfigOrigin::LoadedFromFile,
            name: None,
        };
        config.set_path(path);
        Ok(config)
    }

    /// Loads the configuration at `path`, or starts an empty one bound to
    /// `path` when the file does not exist.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(crate::Error::Config(err)) if err.is_not_found() => {
                tracing::debug!(path = %path.display(), "Configuration file not found, starting empty");
                let mut config = Self::empty();
                config.set_path(path);
                Ok(config)
            }
            other => other,
        }
    }

    fn set_path(&mut self, path: &Path) {
        self.work_directory = Some(
            path.parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        );
        self.path = Some(path.to_path_buf());
    }

    /// Writes the document back to the file it is bound to
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(ConfigError::NoPath)?;
        let json = self.document.to_string_pretty()?;
        fs::write(path, json).map_err(|source| ConfigError::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Binds the configuration to `path` and saves it there
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.set_path(path.as_ref());
        self.save()
    }

    /// Resolves a path found in the settings against the work directory.
    ///
    /// Paths containing colons, line breaks, tabs, control or format
    /// characters are rejected.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        if lenient::is_invalid_relative_path(relative) {
            return Err(ConfigError::InvalidRelativePath {
                path: relative.to_string(),
            }
            .into());
        }
        Ok(match &self.work_directory {
            Some(dir) => dir.join(relative),
            None => PathBuf::from(relative),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The root object of the configuration
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Path of the bound file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory of the bound file; relative settings resolve against it
    pub fn work_directory(&self) -> Option<&Path> {
        self.work_directory.as_deref()
    }

    pub fn origin(&self) -> ConfigOrigin {
        self.origin
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::empty()
    }
}

impl HasBackingNode for ConfigFile {
    fn node(&self) -> &Node {
        &self.root
    }
}
