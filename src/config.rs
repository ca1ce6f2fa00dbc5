// SPDX-FileCopyrightText: 2025 Hong Minhee <https://hongminhee.org/>
// SPDX-License-Identifier: GPL-3.0-or-later
//! Configuration file support.
//!
//! This module loads and parses configuration files (`.title-casing.toml`)
//! that select the mode, the capitalization type, the exception list, and the
//! files to check.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::casing::{CapitalizationType, ExceptionTable, IGNORE_FILE_NAME, TitleCaser};
use crate::report::Mode;

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".title-casing.toml";

/// Configuration for heading checks.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Report mismatches (`warn`, default) or rewrite them (`fix`).
    pub mode: Mode,

    /// General capitalization rule: `title` (default) or `first_letter`.
    pub capitalization_type: CapitalizationType,

    /// Exception list, one term per line (default: `.title-casing-ignore`).
    /// A missing file means no exceptions.
    pub ignore_definition_file: PathBuf,

    /// Glob patterns for files to include (default: empty, meaning all files
    /// must be specified on command line).
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: empty).
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Warn,
            capitalization_type: CapitalizationType::Title,
            ignore_definition_file: PathBuf::from(IGNORE_FILE_NAME),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from a file.
    ///
    /// A relative `ignore_definition_file` is resolved against the directory
    /// containing the configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config =
            Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        if let Some(dir) = path.parent()
            && config.ignore_definition_file.is_relative()
        {
            config.ignore_definition_file = dir.join(&config.ignore_definition_file);
        }
        Ok(config)
    }

    /// Discover and load configuration by searching up the directory tree.
    ///
    /// Starting from `start_dir`, searches for `.title-casing.toml` in each
    /// parent directory until the filesystem root is reached. Returns `None`
    /// if no configuration file is found.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !current.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load the exception list and build the caser this configuration
    /// describes.
    pub fn title_caser(&self) -> Result<TitleCaser, crate::Error> {
        let exceptions = ExceptionTable::from_file(&self.ignore_definition_file)?;
        Ok(TitleCaser::new(self.capitalization_type, exceptions))
    }

    /// Collect files matching the include patterns, excluding those matching
    /// exclude patterns.
    ///
    /// The `base_dir` is used as the starting point for glob pattern matching.
    /// Returns an empty list if no include patterns are configured.
    pub fn collect_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        use glob::{MatchOptions, glob_with};

        if self.include.is_empty() {
            return Ok(Vec::new());
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };

        let mut files = Vec::new();

        for pattern in &self.include {
            let full_pattern = base_dir.join(pattern);
            let pattern_str = full_pattern.to_string_lossy();
            let matches = glob_with(&pattern_str, options)
                .map_err(|e| ConfigError::Glob(pattern.clone(), e))?;

            for entry in matches {
                let path = entry.map_err(ConfigError::GlobIo)?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();

        if !self.exclude.is_empty() {
            let exclude_patterns: Vec<glob::Pattern> = self
                .exclude
                .iter()
                .filter_map(|p| {
                    let full_pattern = base_dir.join(p);
                    glob::Pattern::new(&full_pattern.to_string_lossy()).ok()
                })
                .collect();

            files.retain(|path| {
                let path_str = path.to_string_lossy();
                !exclude_patterns
                    .iter()
                    .any(|pattern| pattern.matches(&path_str))
            });
        }

        Ok(files)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    /// Error parsing the TOML configuration, including unknown `mode` and
    /// `capitalization_type` values.
    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    /// Error parsing a glob pattern.
    #[error("invalid glob pattern '{0}': {1}")]
    Glob(String, #[source] glob::PatternError),
    /// I/O error during glob iteration.
    #[error("error reading file: {0}")]
    GlobIo(#[source] glob::GlobError),
}
