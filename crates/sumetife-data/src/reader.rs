//! Input file discovery.

use std::path::{Path, PathBuf};

use sumetife_core::error::{MetricError, Result};
use sumetife_core::models::InputFormat;
use tracing::{debug, warn};

/// Find the files directly inside `dir` whose extension matches `format`,
/// sorted by path.
///
/// Subdirectories are not descended into. The extension match is exact, so
/// `data.CSV` is not picked up for [`InputFormat::Csv`]. Entries that vanish
/// or cannot be inspected while listing are skipped with a warning; failing
/// to list `dir` itself is an error.
pub fn find_metric_files(dir: &Path, format: InputFormat) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MetricError::DataPathNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(MetricError::DirectoryRead {
                    path: dir.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let matches = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .map(|ext| ext == format.extension())
                .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(
        "Found {} .{} files in {}",
        files.len(),
        format.extension(),
        dir.display()
    );
    Ok(files)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "").unwrap();
        path
    }

    fn names(files: &[PathBuf]) -> Vec<&str> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect()
    }

    #[test]
    fn test_find_metric_files_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "01-jan.csv");
        touch(dir.path(), "02-jan.json");
        touch(dir.path(), "notes.txt");

        let csv = find_metric_files(dir.path(), InputFormat::Csv).unwrap();
        let json = find_metric_files(dir.path(), InputFormat::Json).unwrap();

        assert_eq!(names(&csv), vec!["01-jan.csv"]);
        assert_eq!(names(&json), vec!["02-jan.json"]);
    }

    #[test]
    fn test_find_metric_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "03-jan.csv");
        touch(dir.path(), "01-jan.csv");
        touch(dir.path(), "02-jan.csv");

        let files = find_metric_files(dir.path(), InputFormat::Csv).unwrap();
        assert_eq!(names(&files), vec!["01-jan.csv", "02-jan.csv", "03-jan.csv"]);
    }

    #[test]
    fn test_find_metric_files_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("archive");
        std::fs::create_dir_all(&sub).unwrap();
        touch(dir.path(), "01-jan.csv");
        touch(&sub, "old.csv");

        let files = find_metric_files(dir.path(), InputFormat::Csv).unwrap();
        assert_eq!(names(&files), vec!["01-jan.csv"]);
    }

    #[test]
    fn test_find_metric_files_ignores_directory_with_matching_extension() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("backup.csv")).unwrap();

        let files = find_metric_files(dir.path(), InputFormat::Csv).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_metric_files_extension_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "upper.CSV");

        assert!(find_metric_files(dir.path(), InputFormat::Csv)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_find_metric_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(find_metric_files(dir.path(), InputFormat::Json)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_find_metric_files_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = find_metric_files(&missing, InputFormat::Csv).unwrap_err();
        assert!(matches!(err, MetricError::DataPathNotFound(p) if p == missing));
    }

    #[test]
    fn test_find_metric_files_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "01-jan.csv");

        let err = find_metric_files(&file, InputFormat::Csv).unwrap_err();
        assert!(matches!(err, MetricError::DataPathNotFound(_)));
    }
}
