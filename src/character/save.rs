use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::game_state::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Reads and writes the state blob inside a checksummed envelope:
/// `magic u64 | len u32 | JSON payload | SHA-256`.
pub struct SaveManager {
    save_path: PathBuf,
}

fn invalid_data(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

/// Serializes the state to its raw JSON blob.
pub fn to_blob(state: &GameState) -> io::Result<Vec<u8>> {
    serde_json::to_vec(state).map_err(|e| invalid_data(e.to_string()))
}

/// Parses a raw JSON blob. Missing fields fall back to their defaults.
pub fn from_blob(data: &[u8]) -> io::Result<GameState> {
    serde_json::from_slice(data).map_err(|e| invalid_data(e.to_string()))
}

fn checksum(version_bytes: &[u8], length_bytes: &[u8], data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(data);
    hasher.finalize().to_vec()
}

impl SaveManager {
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "ascent").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine data directory",
            )
        })?;

        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        Ok(Self {
            save_path: data_dir.join("save.dat"),
        })
    }

    /// Uses an explicit file path. The parent directory is created if needed.
    pub fn with_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let save_path = path.as_ref().to_path_buf();
        if let Some(parent) = save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { save_path })
    }

    #[cfg(test)]
    fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "ascent-test-{}-{}",
            std::process::id(),
            test_id
        ));
        Self::with_path(temp_dir.join("save.dat"))
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save(&self, state: &GameState) -> io::Result<()> {
        let data = to_blob(state)?;
        let data_len = u32::try_from(data.len()).map_err(|_| invalid_data("Save too large"))?;

        let version_bytes = SAVE_VERSION_MAGIC.to_le_bytes();
        let length_bytes = data_len.to_le_bytes();
        let digest = checksum(&version_bytes, &length_bytes, &data);

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&version_bytes)?;
        file.write_all(&length_bytes)?;
        file.write_all(&data)?;
        file.write_all(&digest)?;

        Ok(())
    }

    pub fn load(&self) -> io::Result<GameState> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);

        if version != SAVE_VERSION_MAGIC {
            return Err(invalid_data(format!(
                "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, version
            )));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        if stored_checksum.as_slice() != checksum(&version_bytes, &length_bytes, &data) {
            return Err(invalid_data("Checksum verification failed"));
        }

        from_blob(&data)
    }

    /// Loads the save, or starts fresh if it is missing or unreadable.
    /// Returns the state and whether it came from disk.
    pub fn load_or_new(&self, fresh: impl FnOnce() -> GameState) -> (GameState, bool) {
        match self.load() {
            Ok(state) => (state, true),
            Err(_) => (fresh(), false),
        }
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
