use crate::constants::SAVE_VERSION_MAGIC;
use crate::profile::Profile;
use bincode;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Saves and loads the idle profile in a checksummed binary format.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Sets up the save directory at the platform's config location.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "riftrun").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("profile.dat"),
        })
    }

    /// Saves the profile to disk.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized profile (variable length)
    /// - SHA256 checksum over the preceding bytes (32 bytes)
    pub fn save(&self, profile: &Profile) -> io::Result<()> {
        let data = bincode::serialize(profile)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Loads the profile from disk, rejecting missing files, a wrong version
    /// magic, a corrupt checksum, or undeserializable data.
    pub fn load(&self) -> io::Result<Profile> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();
        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
