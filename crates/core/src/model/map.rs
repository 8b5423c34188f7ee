use super::{ClassEntry, ClassName};
use crate::error::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

/// Output of a resolution run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMap {
    /// Requested seeds, in request order.
    pub seeds: Vec<ClassName>,
    /// Resolved entries in resolution order.
    pub classes: IndexMap<ClassName, ClassEntry>,
    /// Whitelisted names that were referenced but do not exist.
    pub missing: Vec<ClassName>,
}

impl ClassMap {
    pub fn get(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassName, &ClassEntry)> {
        self.classes.iter()
    }

    pub fn method_count(&self) -> usize {
        self.classes.values().map(|c| c.methods.len()).sum()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
