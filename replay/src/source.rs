//! Read-only key to bytes lookup for replay fixtures.

use containers::Slot;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixtureKey {
    State(Slot),
    Block(Slot),
}

impl FixtureKey {
    pub fn slot(self) -> Slot {
        match self {
            Self::State(slot) | Self::Block(slot) => slot,
        }
    }

    pub fn file_name(self) -> String {
        match self {
            Self::State(slot) => format!("state-{slot}.ssz"),
            Self::Block(slot) => format!("block-{slot}.json"),
        }
    }
}

impl fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

pub trait FixtureSource {
    /// Raw bytes stored under `key`, or `None` when nothing is stored there.
    fn fetch(&self, key: FixtureKey) -> io::Result<Option<Vec<u8>>>;

    /// Where `key` is looked up, for diagnostics.
    fn locate(&self, key: FixtureKey) -> String {
        key.to_string()
    }
}

/// Fixtures laid out as `state-{slot}.ssz` and `block-{slot}.json` files.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, key: FixtureKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl FixtureSource for DirectorySource {
    fn fetch(&self, key: FixtureKey) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_of(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn locate(&self, key: FixtureKey) -> String {
        self.path_of(key).display().to_string()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    entries: HashMap<FixtureKey, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FixtureKey, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(key, bytes.into());
    }

    pub fn remove(&mut self, key: FixtureKey) -> Option<Vec<u8>> {
        self.entries.remove(&key)
    }
}

impl FixtureSource for MemorySource {
    fn fetch(&self, key: FixtureKey) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(&key).cloned())
    }

    fn locate(&self, key: FixtureKey) -> String {
        format!("memory:{key}")
    }
}
