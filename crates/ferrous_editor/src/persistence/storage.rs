use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// A named-slot string store.  Saving overwrites a slot whole.
pub trait LayoutStorage {
    /// `Ok(None)` when nothing was ever written to `slot`.
    fn read(&self, slot: &str) -> io::Result<Option<String>>;
    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()>;
}

/// In-process slots; used by tests and headless sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, bypassing the codec.
    pub fn with_slot(mut self, slot: impl Into<String>, contents: impl Into<String>) -> Self {
        self.slots.insert(slot.into(), contents.into());
        self
    }
}

impl LayoutStorage for MemoryStorage {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()> {
        self.slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}

/// One `<slot>.ron` file per slot under `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> io::Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid slot name `{slot}`"),
            ));
        }
        Ok(self.dir.join(format!("{slot}.ron")))
    }
}

impl LayoutStorage for FileStorage {
    fn read(&self, slot: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(slot)?) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes to a sibling temp file first so a crash mid-save never leaves
    /// a truncated slot behind.
    fn write(&mut self, slot: &str, contents: &str) -> io::Result<()> {
        let path = self.slot_path(slot)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("ron.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)
    }
}
