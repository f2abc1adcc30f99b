//! Helpers shared by the unit tests.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
    sync::atomic::{AtomicUsize, Ordering},
};

/// A scratch directory that is removed when dropped.
pub struct TempDir {
    /// The location of the directory.
    path: PathBuf,
}

impl TempDir {
    /// Creates a new empty directory whose name contains `label`.
    pub fn new(label: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        let path = env::temp_dir().join(format!(
            "acpi-extract-{label}-{}-{}",
            process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();

        Self { path }
    }

    /// Returns the location of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Builds a table with the given header text fields followed by a four byte body.
pub fn table(signature: &[u8; 4], oem_id: &[u8; 6], oem_table_id: &[u8; 8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(40);
    bytes.extend_from_slice(signature);
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&[0x02, 0x00]);
    bytes.extend_from_slice(oem_id);
    bytes.extend_from_slice(oem_table_id);
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(b"INTL");
    bytes.extend_from_slice(&0x2020_0925u32.to_le_bytes());
    bytes.extend_from_slice(&[0x5B, 0x82, 0x10, 0x00]);
    bytes
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
