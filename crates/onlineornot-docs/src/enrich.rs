//! Documentation enrichment run: schema → enum table → rewritten docs.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::extract::FieldEnums;
use crate::fetch::SpecSource;
use crate::resources::{build_enum_table, ResourceEnumTable, ResourceKind, ResourcePaths};
use crate::rewrite::rewrite;

/// Default docs root, relative to the provider repository.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Options for [`enrich_docs`].
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Docs root containing `resources/` and `data-sources/`.
    pub docs_dir: PathBuf,
    /// Report files that would change without writing them.
    pub check: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            check: false,
        }
    }
}

/// Outcome of an enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Markdown files inspected.
    pub scanned: usize,
    /// Files whose content changed (or would change, in check mode).
    pub updated: Vec<PathBuf>,
}

impl EnrichReport {
    /// Whether every file was already up to date.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Fetch the schema once, build the enum table, and enrich the docs.
///
/// A failed fetch aborts before any file is touched.
///
/// # Errors
///
/// Propagates fetch/parse errors from [`SpecSource::load`] and I/O errors
/// from [`enrich_docs`].
pub fn run(
    source: &SpecSource,
    paths: &ResourcePaths,
    options: &EnrichOptions,
) -> Result<EnrichReport> {
    let spec = source.load()?;
    let table = build_enum_table(&spec, paths);
    info!(names = table.len(), "built resource enum table");
    enrich_docs(&table, options)
}

/// Rewrite every page under `resources/` and `data-sources/`.
///
/// A page's name is its file stem (`check.md` → `check`). Pages without enum
/// data are still read but never change. Files are written only when their
/// content differs, so repeated runs are no-ops.
///
/// # Errors
///
/// Returns [`Error::Io`] for any filesystem failure other than a missing
/// kind directory, which counts as zero pages.
pub fn enrich_docs(table: &ResourceEnumTable, options: &EnrichOptions) -> Result<EnrichReport> {
    let empty = FieldEnums::new();
    let mut report = EnrichReport::default();

    for kind in ResourceKind::ALL {
        let dir = options.docs_dir.join(kind.docs_subdir());
        for file in markdown_files(&dir)? {
            let Some(name) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let enums = table.get(name).unwrap_or(&empty);
            report.scanned += 1;

            if enrich_file(&file, enums, options.check)? {
                if options.check {
                    info!(path = %file.display(), "out of date");
                } else {
                    info!(path = %file.display(), "updated");
                }
                report.updated.push(file);
            }
        }
    }

    Ok(report)
}

/// Rewrite one file in place; returns whether its content changed.
///
/// Pages that are not valid UTF-8 are left untouched.
fn enrich_file(path: &Path, enums: &FieldEnums, dry_run: bool) -> Result<bool> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let Ok(original) = std::str::from_utf8(&bytes) else {
        debug!(path = %path.display(), "not valid UTF-8; skipping");
        return Ok(false);
    };
    let enriched = rewrite(original, enums);
    if enriched == original {
        debug!(path = %path.display(), "unchanged");
        return Ok(false);
    }
    if !dry_run {
        fs::write(path, enriched).map_err(|e| Error::io(path, e))?;
    }
    Ok(true)
}

/// `.md` files directly inside `dir`, sorted; empty if `dir` does not exist.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "docs directory missing; skipping");
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        let path = entry.path();
        if file_type.is_dir() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
