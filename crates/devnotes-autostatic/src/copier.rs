//! Copying referenced static assets into the output tree.
//!
//! Only assets that documents actually declare get copied, so the output
//! tree stays free of unused static content.

use std::{
    collections::HashMap,
    fs,
    path::{Component, Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::matcher::StaticReference;

/// Autostatic plugin errors.
#[derive(Debug, Error)]
pub enum AutostaticError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reference path escaping the content tree.
    #[error("invalid reference path: {0}")]
    InvalidPath(String),
}

/// Result type for plugin operations.
pub type Result<T> = std::result::Result<T, AutostaticError>;

/// Manifest of emitted references.
///
/// Maps each declared asset path to its site path in the output tree.
#[derive(Debug, Clone, Default)]
pub struct StaticManifest {
    entries: HashMap<String, String>,
}

impl StaticManifest {
    /// Create a new empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an emitted reference to the manifest.
    pub fn add(&mut self, declared: impl Into<String>, emitted: impl Into<String>) {
        self.entries.insert(declared.into(), emitted.into());
    }

    /// Get the emitted site path for a declared asset path.
    #[must_use]
    pub fn get(&self, declared: &str) -> Option<&str> {
        self.entries.get(declared).map(String::as_str)
    }

    /// Get all manifest entries.
    #[must_use]
    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }
}

/// Copy counters for one plugin run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// References copied into the output tree.
    pub copied: usize,

    /// References whose source file was missing.
    pub missing: usize,
}

/// Copies declared references from the content tree into the output tree.
#[derive(Debug)]
pub struct ReferenceCopier {
    content_dir: PathBuf,
    output_dir: PathBuf,
}

impl ReferenceCopier {
    /// Create a new copier between a content directory and an output directory.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Copy every reference, skipping those whose source file is missing.
    pub fn copy_references(
        &self,
        references: &[StaticReference],
    ) -> Result<(StaticManifest, CopyStats)> {
        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            count = references.len(),
            "copying static references"
        );

        let mut manifest = StaticManifest::new();
        let mut stats = CopyStats::default();

        for reference in references {
            if self.copy_one(reference, &mut manifest)? {
                stats.copied += 1;
            } else {
                stats.missing += 1;
            }
        }

        info!(
            copied = stats.copied,
            missing = stats.missing,
            "static references processed"
        );
        Ok((manifest, stats))
    }

    /// Copy a single reference. Returns `false` when the source is missing.
    fn copy_one(
        &self,
        reference: &StaticReference,
        manifest: &mut StaticManifest,
    ) -> Result<bool> {
        let source_rel = relative_ref_path(&reference.path)?;
        let source = self.content_dir.join(&source_rel);

        if !source.is_file() {
            warn!(path = %reference.path, "referenced static file missing");
            return Ok(false);
        }

        // An `output=` directive overrides the destination path.
        let output_directive = reference
            .options()
            .into_iter()
            .find_map(|(key, value)| (key == "output" && !value.is_empty()).then_some(value));
        let dest_rel = match output_directive {
            Some(output) => relative_ref_path(&output)?,
            None => source_rel,
        };

        let dest = self.output_dir.join(&dest_rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&source, &dest)?;

        let site_path = format!("/{}", dest_rel.display()).replace('\\', "/");
        manifest.add(reference.path.clone(), site_path);

        debug!(
            src = %source.display(),
            dest = %dest.display(),
            "copied static reference"
        );
        Ok(true)
    }
}

/// Check that a declared path stays inside the tree it is resolved against.
fn relative_ref_path(raw: &str) -> Result<PathBuf> {
    let path = Path::new(raw);

    if path.is_absolute()
        || path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(AutostaticError::InvalidPath(raw.to_string()));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn reference(path: &str, extra: Option<&str>) -> StaticReference {
        StaticReference {
            path: path.to_string(),
            extra: extra.map(str::to_string),
        }
    }

    fn write_source(content_dir: &Path, rel: &str, bytes: &[u8]) {
        let path = content_dir.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, bytes).expect("write source");
    }

    #[test]
    fn test_copy_references() {
        let content = TempDir::new().expect("content dir");
        let output = TempDir::new().expect("output dir");

        write_source(content.path(), "images/foo.png", b"png bytes");
        write_source(content.path(), "extra/report.pdf", b"pdf bytes");

        let copier = ReferenceCopier::new(content.path(), output.path());
        let references = [
            reference("images/foo.png", None),
            reference("extra/report.pdf", None),
        ];

        let (manifest, stats) = copier.copy_references(&references).expect("copy");

        assert_eq!(stats, CopyStats { copied: 2, missing: 0 });
        assert!(output.path().join("images/foo.png").is_file());
        assert!(output.path().join("extra/report.pdf").is_file());
        assert_eq!(manifest.get("images/foo.png"), Some("/images/foo.png"));
        assert_eq!(manifest.entries().len(), 2);
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let content = TempDir::new().expect("content dir");
        let output = TempDir::new().expect("output dir");

        write_source(content.path(), "images/present.png", b"bytes");

        let copier = ReferenceCopier::new(content.path(), output.path());
        let references = [
            reference("images/present.png", None),
            reference("images/absent.png", None),
        ];

        let (manifest, stats) = copier.copy_references(&references).expect("copy");

        assert_eq!(stats, CopyStats { copied: 1, missing: 1 });
        assert!(manifest.get("images/absent.png").is_none());
    }

    #[test]
    fn test_output_directive_renames() {
        let content = TempDir::new().expect("content dir");
        let output = TempDir::new().expect("output dir");

        write_source(content.path(), "extra/report.pdf", b"pdf bytes");

        let copier = ReferenceCopier::new(content.path(), output.path());
        let references = [reference(
            "extra/report.pdf",
            Some("output=downloads/report.pdf"),
        )];

        let (manifest, stats) = copier.copy_references(&references).expect("copy");

        assert_eq!(stats.copied, 1);
        assert!(output.path().join("downloads/report.pdf").is_file());
        assert!(!output.path().join("extra/report.pdf").exists());
        assert_eq!(
            manifest.get("extra/report.pdf"),
            Some("/downloads/report.pdf")
        );
    }

    #[test]
    fn test_parent_escape_is_rejected() {
        let content = TempDir::new().expect("content dir");
        let output = TempDir::new().expect("output dir");

        let copier = ReferenceCopier::new(content.path(), output.path());
        let references = [reference("../outside.txt", None)];

        let result = copier.copy_references(&references);
        assert!(matches!(result, Err(AutostaticError::InvalidPath(_))));
    }

    #[test]
    fn test_absolute_path_is_rejected() {
        let content = TempDir::new().expect("content dir");
        let output = TempDir::new().expect("output dir");

        let copier = ReferenceCopier::new(content.path(), output.path());
        let references = [reference("/etc/passwd", None)];

        let result = copier.copy_references(&references);
        assert!(matches!(result, Err(AutostaticError::InvalidPath(_))));
    }

    #[test]
    fn test_nested_destination_directories_created() {
        let content = TempDir::new().expect("content dir");
        let output = TempDir::new().expect("output dir");

        write_source(content.path(), "images/trips/2019/coast.jpg", b"jpg bytes");

        let copier = ReferenceCopier::new(content.path(), output.path());
        let references = [reference("images/trips/2019/coast.jpg", None)];

        let (_, stats) = copier.copy_references(&references).expect("copy");

        assert_eq!(stats.copied, 1);
        assert!(output.path().join("images/trips/2019/coast.jpg").is_file());
    }
}
