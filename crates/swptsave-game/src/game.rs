use std::fs;
use std::path::{Path, PathBuf};

use swptsave_frame::CodecConfig;
use tracing::debug;

use crate::error::{GameError, Result};
use crate::file::{stem_of, SaveFile};

/// A game save: every loadable save file of one directory.
#[derive(Debug, Clone)]
pub struct SaveGame {
    name: String,
    directory: PathBuf,
    files: Vec<SaveFile>,
}

impl SaveGame {
    /// Load every regular file of `directory` that parses as a save file.
    pub fn load(directory: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_config(directory, CodecConfig::default())
    }

    /// Load with explicit decode limits.
    ///
    /// The directory is not searched recursively. Files that fail to load
    /// are skipped, since a save directory may hold other data. Files are
    /// visited in path order. Fails with [`GameError::NotFound`] if the
    /// directory cannot be listed or no file loads.
    pub fn load_with_config(directory: impl AsRef<Path>, config: CodecConfig) -> Result<Self> {
        let directory = directory.as_ref();
        let not_found = |err: std::io::Error| {
            debug!(directory = %directory.display(), error = %err, "cannot list save directory");
            GameError::NotFound(directory.to_path_buf())
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(directory).map_err(not_found)? {
            let path = entry.map_err(not_found)?.path();
            // symlinks to regular files count
            if fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match SaveFile::load_with_config(&path, config.clone()) {
                Ok(file) => files.push(file),
                Err(err) => debug!(path = %path.display(), error = %err, "skipping file"),
            }
        }

        if files.is_empty() {
            return Err(GameError::NotFound(directory.to_path_buf()));
        }

        debug!(
            directory = %directory.display(),
            files = files.len(),
            "loaded save game"
        );
        Ok(Self {
            name: stem_of(directory),
            directory: directory.to_path_buf(),
            files,
        })
    }

    /// Save every file at its current path.
    pub fn save(&self) -> Result<()> {
        for file in &self.files {
            file.save()?;
        }
        Ok(())
    }

    /// Move the save into `directory` and write every file there.
    ///
    /// The game takes on the new directory and name for good; the old
    /// directory is left untouched. `directory` must already exist.
    pub fn save_to(&mut self, directory: impl AsRef<Path>) -> Result<()> {
        let directory = directory.as_ref();
        self.directory = directory.to_path_buf();
        self.name = stem_of(directory);
        for file in &mut self.files {
            file.save_to(directory)?;
        }
        debug!(directory = %directory.display(), files = self.files.len(), "saved save game");
        Ok(())
    }

    /// Stem of the directory path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn files(&self) -> &[SaveFile] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut [SaveFile] {
        &mut self.files
    }

    /// First file whose name is `name`.
    pub fn file(&self, name: &str) -> Option<&SaveFile> {
        self.files.iter().find(|file| file.name() == name)
    }

    pub fn file_mut(&mut self, name: &str) -> Option<&mut SaveFile> {
        self.files.iter_mut().find(|file| file.name() == name)
    }
}

impl std::fmt::Display for SaveGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
