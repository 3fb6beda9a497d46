//! Package loading
//!
//! Reads every non-test `.go` file of one directory, parses it and merges the
//! declarations into a single [`DeclarationSet`].

use crate::error::{AnalyzerError, AnalyzerResult};
use autofx_parser::{parse_source_with_name, DeclarationSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A parsed package directory, ready for inspection
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub declarations: DeclarationSet,
    pub files: Vec<PathBuf>,
    pub package_root: PathBuf,
}

impl LoadedPackage {
    pub fn name(&self) -> &str {
        &self.declarations.package_name
    }
}

/// Load a Go package from a directory
pub fn load_package(package_dir: &Path) -> AnalyzerResult<LoadedPackage> {
    let display = package_dir.display().to_string();
    let files = collect_go_files(package_dir)?;
    if files.is_empty() {
        return Err(AnalyzerError::package_load(display, "no Go source files found"));
    }

    let mut declarations = DeclarationSet::default();
    for path in &files {
        let file_name = path.to_string_lossy().to_string();
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::package_load(display.clone(), format!("Failed to read file {file_name}: {e}"))
        })?;

        let source = parse_source_with_name(&content, Some(file_name.clone())).map_err(|source| {
            AnalyzerError::ParseFailure {
                file: file_name.clone(),
                source,
            }
        })?;

        if !declarations.package_name.is_empty() && declarations.package_name != source.package_name {
            return Err(AnalyzerError::package_load(
                display,
                format!(
                    "{file_name} declares package {} but earlier files declare {}",
                    source.package_name, declarations.package_name
                ),
            ));
        }

        debug!(
            file = %file_name,
            types = source.types.len(),
            callables = source.callables.len(),
            "parsed source file"
        );
        declarations.add_file(source);
    }

    info!(
        package = %declarations.package_name,
        files = files.len(),
        "loaded package"
    );

    Ok(LoadedPackage {
        declarations,
        files,
        package_root: package_dir.to_path_buf(),
    })
}

/// Non-recursive, `_test.go` excluded, sorted by file name
fn collect_go_files(dir: &Path) -> AnalyzerResult<Vec<PathBuf>> {
    let display = dir.display().to_string();
    let entries = fs::read_dir(dir).map_err(|e| {
        AnalyzerError::package_load(display.clone(), format!("Failed to read directory: {e}"))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AnalyzerError::package_load(display.clone(), format!("Failed to read directory entry: {e}"))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_source = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".go") && !name.ends_with("_test.go"));
        if is_source {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
