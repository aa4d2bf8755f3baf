#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// A column fixture: the expected label on the first line, one sample value
/// per following line.
pub struct ColumnFixture {
    pub path: PathBuf,
    pub expected: String,
    pub values: Vec<String>,
}

impl ColumnFixture {
    pub fn load(path: &Path) -> Self {
        let contents = fs::read_to_string(path).expect("read fixture");
        let mut lines = contents.lines().map(str::to_string);
        let expected = lines.next().expect("fixture has a label line");
        Self {
            path: path.to_path_buf(),
            expected,
            values: lines.collect(),
        }
    }

    /// Fixtures named `FR*` are written with a decimal comma.
    pub fn prefers_comma(&self) -> bool {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.starts_with("FR"))
    }
}

/// Every `*.txt` column fixture in `tests/data/fixtures/<kind>`, sorted by
/// file name.
pub fn column_fixtures(kind: &str) -> Vec<ColumnFixture> {
    let dir = fixture_path("fixtures").join(kind);
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .expect("fixture directory")
        .map(|entry| entry.expect("directory entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();
    paths.iter().map(|path| ColumnFixture::load(path)).collect()
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }
}
