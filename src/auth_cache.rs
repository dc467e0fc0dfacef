//! On-disk cache of the CLI's API key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the cache directory.
pub const CACHE_DIR_ENV: &str = "NYMERIA_CACHE_DIR";

const KEY_FILE: &str = "auth.key";

/// Resolves the cache directory: `$NYMERIA_CACHE_DIR`, then the platform
/// user cache directory, then `/tmp`.
pub fn cache_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    match dirs::cache_dir() {
        Some(dir) => dir.join("nymeria.io"),
        None => PathBuf::from("/tmp/nymeria.io"),
    }
}

/// Writes the key to `<dir>/auth.key`, readable by the owner only.
pub fn store_key(dir: &Path, key: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(KEY_FILE);
    fs::write(&path, key.trim())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }

    tracing::debug!("Cached auth key at {}", path.display());
    Ok(())
}

/// Reads a cached key. Missing, unreadable or blank files yield `None`.
pub fn load_key(dir: &Path) -> Option<String> {
    let key = fs::read_to_string(dir.join(KEY_FILE)).ok()?;
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Deletes the cache directory and everything in it.
pub fn purge(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::info!("Purged cached data in {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("nymeria.io");

        assert_eq!(load_key(&dir), None);
        store_key(&dir, "  abc-123\n").unwrap();
        assert_eq!(load_key(&dir).as_deref(), Some("abc-123"));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        store_key(tmp.path(), "abc-123").unwrap();

        let mode = fs::metadata(tmp.path().join(KEY_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_blank_file_is_no_key() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(KEY_FILE), " \n").unwrap();
        assert_eq!(load_key(tmp.path()), None);
    }

    #[test]
    fn test_purge() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("cache");
        store_key(&dir, "abc-123").unwrap();

        purge(&dir).unwrap();
        assert!(!dir.exists());
        // Purging again is fine.
        purge(&dir).unwrap();
    }
}
