//! Scratch directories for tests.

/// Creates a temporary directory with a specific prefix.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_test_dir(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_test_dir_with_prefix() {
        let dir = temp_test_dir("masks_");
        assert!(dir.path().exists());
        assert!(dir.path().to_string_lossy().contains("masks_"));
    }
}
