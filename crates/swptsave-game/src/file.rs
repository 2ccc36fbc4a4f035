use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use swptsave_frame::{CodecConfig, Property, PropertyReader, PropertyWriter};
use tracing::debug;

use crate::error::{GameError, Result};

/// One file of a save game: an ordered list of properties bound to a path.
///
/// Property order is kept exactly as read; only the explicit move and
/// insert operations reorder it. Names need not be unique.
#[derive(Debug, Clone)]
pub struct SaveFile {
    name: String,
    path: PathBuf,
    properties: Vec<Property>,
    config: CodecConfig,
}

impl SaveFile {
    /// An empty file that will be written to `path` on [`save`](Self::save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: stem_of(&path),
            path,
            properties: Vec::new(),
            config: CodecConfig::default(),
        }
    }

    /// Load every property of the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_config(path, CodecConfig::default())
    }

    /// Load with explicit decode limits, kept for later reloads.
    pub fn load_with_config(path: impl AsRef<Path>, config: CodecConfig) -> Result<Self> {
        let mut file = Self::new(path.as_ref());
        file.config = config;
        file.properties = file.read_properties()?;
        Ok(file)
    }

    /// Replace the in-memory properties with the file's current contents.
    ///
    /// Unsaved edits are discarded. On error the properties are left as
    /// they were.
    pub fn reload(&mut self) -> Result<()> {
        self.properties = self.read_properties()?;
        Ok(())
    }

    /// Write all properties to the file's path, replacing its contents.
    ///
    /// Every property is encoded before the file is opened, so a property
    /// that cannot be encoded leaves the file on disk untouched.
    pub fn save(&self) -> Result<()> {
        let mut encoder = PropertyWriter::new(Vec::new());
        encoder
            .write_all(&self.properties)
            .map_err(|err| GameError::from_frame(&self.path, err))?;
        let bytes = encoder
            .finish()
            .map_err(|err| GameError::from_frame(&self.path, err))?;

        let mut file = File::create(&self.path).map_err(|err| GameError::io(&self.path, err))?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|err| GameError::io(&self.path, err))?;

        debug!(
            path = %self.path.display(),
            properties = self.properties.len(),
            bytes = bytes.len(),
            "saved file"
        );
        Ok(())
    }

    /// Move the file into `directory`, keeping its file name, and save it.
    pub fn save_to(&mut self, directory: impl AsRef<Path>) -> Result<()> {
        self.set_directory(directory.as_ref())?;
        self.save()
    }

    /// Deep copy under `new_name` in the same directory and with the same
    /// extension. Nothing is written until the copy is saved.
    pub fn clone_as(&self, new_name: &str) -> SaveFile {
        let mut file_name = new_name.to_string();
        if let Some(ext) = self.path.extension() {
            file_name.push('.');
            file_name.push_str(&ext.to_string_lossy());
        }
        let path = match self.path.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        };

        let mut copy = SaveFile::new(path);
        copy.config = self.config.clone();
        copy.properties = self.properties.clone();
        copy
    }

    /// File stem of the path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn property(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    pub fn property_mut(&mut self, index: usize) -> Option<&mut Property> {
        self.properties.get_mut(index)
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Insert at `index`; `index == len()` appends.
    pub fn insert_property(&mut self, index: usize, property: Property) -> Result<()> {
        if index > self.properties.len() {
            return Err(self.out_of_range(index));
        }
        self.properties.insert(index, property);
        Ok(())
    }

    pub fn remove_property(&mut self, index: usize) -> Result<Property> {
        if index >= self.properties.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.properties.remove(index))
    }

    pub fn can_move_property_up(&self, index: usize) -> bool {
        index >= 1 && index < self.properties.len()
    }

    pub fn can_move_property_down(&self, index: usize) -> bool {
        index + 1 < self.properties.len()
    }

    /// Swap with the previous property. Returns false, changing nothing,
    /// when the property cannot move.
    pub fn move_property_up(&mut self, index: usize) -> bool {
        if !self.can_move_property_up(index) {
            return false;
        }
        self.properties.swap(index - 1, index);
        true
    }

    /// Swap with the next property. Returns false, changing nothing,
    /// when the property cannot move.
    pub fn move_property_down(&mut self, index: usize) -> bool {
        if !self.can_move_property_down(index) {
            return false;
        }
        self.properties.swap(index, index + 1);
        true
    }

    /// First property named `name` at or after `start`.
    pub fn index_of_property(&self, name: &str, start: usize) -> Option<usize> {
        self.properties
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, property)| property.name == name)
            .map(|(index, _)| index)
    }

    pub(crate) fn set_directory(&mut self, directory: &Path) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| GameError::InvalidPath(self.path.clone()))?;
        self.path = directory.join(file_name);
        self.name = stem_of(&self.path);
        Ok(())
    }

    fn read_properties(&self) -> Result<Vec<Property>> {
        let file = File::open(&self.path).map_err(|err| GameError::io(&self.path, err))?;
        let properties = PropertyReader::with_config(file, self.config.clone())
            .read_all()
            .map_err(|err| GameError::from_frame(&self.path, err))?;

        debug!(
            path = %self.path.display(),
            properties = properties.len(),
            "loaded file"
        );
        Ok(properties)
    }

    fn out_of_range(&self, index: usize) -> GameError {
        GameError::IndexOutOfRange {
            index,
            len: self.properties.len(),
        }
    }
}

impl std::fmt::Display for SaveFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

pub(crate) fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
