use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

pub type BearerToken = String;

/// Live token shared between the session store and the request gateway.
/// The store is the only writer; the gateway reads at call time so a logout
/// takes effect on the very next request without reconfiguration.
#[derive(Debug, Clone, Default)]
pub struct TokenCell {
    inner: Arc<RwLock<Option<BearerToken>>>,
}

impl TokenCell {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self) -> Option<BearerToken> {
        self.inner.read().clone()
    }

    pub fn set(&self, token: Option<BearerToken>) {
        *self.inner.write() = token;
    }
}

/// Durable persistence for the bearer token: exactly one file holding the
/// raw token string. Absence of the file is the sole "no prior session"
/// signal.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn load(&self) -> Option<BearerToken> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim().to_string();
        if token.is_empty() { None } else { Some(token) }
    }

    pub fn store(&self, token: &str) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, token)
    }

    /// Best-effort removal; a missing file is already the desired state.
    pub fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn token_file_round_trip_and_clear() {
        let tmp = tempdir().unwrap();
        let tf = TokenFile::new(tmp.path().join("nested").join("token"));
        assert_eq!(tf.load(), None);
        tf.store("abc123").unwrap();
        assert_eq!(tf.load(), Some("abc123".to_string()));
        tf.clear();
        assert_eq!(tf.load(), None);
        // clearing twice is a no-op
        tf.clear();
    }

    #[test]
    fn blank_file_counts_as_no_session() {
        let tmp = tempdir().unwrap();
        let tf = TokenFile::new(tmp.path().join("token"));
        tf.store("  \n").unwrap();
        assert_eq!(tf.load(), None);
    }
}
