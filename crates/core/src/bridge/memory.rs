use super::{BridgeError, RawClass, ReflectionBridge};
use crate::error::Result;
use crate::model::ClassName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A bridge serving metadata held in memory.
///
/// Loaded from a JSON snapshot of the form `{ "classes": [RawClass, ...] }`
/// or assembled with [`MemoryBridge::with_class`]. It records every fetch so
/// callers can check access order.
#[derive(Debug, Clone, Default)]
pub struct MemoryBridge {
    classes: IndexMap<ClassName, RawClass>,
    unavailable: Option<String>,
    fetches: Vec<ClassName>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    classes: Vec<RawClass>,
}

impl MemoryBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: RawClass) -> Self {
        self.insert(class);
        self
    }

    pub fn insert(&mut self, class: RawClass) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut bridge = Self::new();
        for class in snapshot.classes {
            bridge.insert(class);
        }
        Ok(bridge)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let snapshot = Snapshot {
            classes: self.classes.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Every subsequent call fails as if the foreign runtime went away.
    pub fn set_unavailable(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    /// Names passed to `load_class`, in call order.
    pub fn fetches(&self) -> &[ClassName] {
        &self.fetches
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn check_available(&self) -> std::result::Result<(), BridgeError> {
        match &self.unavailable {
            Some(reason) => Err(BridgeError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl ReflectionBridge for MemoryBridge {
    fn load_class(&mut self, name: &ClassName) -> std::result::Result<RawClass, BridgeError> {
        self.check_available()?;
        self.fetches.push(name.clone());
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| BridgeError::NotFound(name.clone()))
    }

    fn list_package(&mut self, package: &str) -> std::result::Result<Vec<ClassName>, BridgeError> {
        self.check_available()?;
        Ok(self
            .classes
            .keys()
            .filter(|name| name.package_name() == Some(package))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::RawMethod;

    #[test]
    fn serves_inserted_classes() {
        let mut bridge = MemoryBridge::new().with_class(RawClass::class("com.example.Foo"));
        let raw = bridge.load_class(&ClassName::new("com.example.Foo")).unwrap();
        assert_eq!(raw.name.as_str(), "com.example.Foo");
        assert!(matches!(
            bridge.load_class(&ClassName::new("com.example.Bar")),
            Err(BridgeError::NotFound(_))
        ));
        assert_eq!(bridge.fetches().len(), 2);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let bridge = MemoryBridge::new().with_class(
            RawClass::interface("com.example.Shape")
                .with_method(RawMethod::new("area", &[], "double").modifiers(&["public", "abstract"])),
        );
        let json = bridge.to_json_string().unwrap();
        let mut restored = MemoryBridge::from_json_str(&json).unwrap();
        let raw = restored.load_class(&ClassName::new("com.example.Shape")).unwrap();
        assert!(raw.is_interface);
        assert_eq!(raw.methods[0].return_type, "double");
    }

    #[test]
    fn snapshot_fields_default_when_absent() {
        let json = r#"{ "classes": [ { "name": "a.B", "methods": [ { "name": "run", "returnType": "void" } ] } ] }"#;
        let mut bridge = MemoryBridge::from_json_str(json).unwrap();
        let raw = bridge.load_class(&ClassName::new("a.B")).unwrap();
        assert!(raw.superclass.is_none());
        assert!(raw.methods[0].param_types.is_empty());
    }

    #[test]
    fn lists_exact_package_only() {
        let mut bridge = MemoryBridge::new()
            .with_class(RawClass::class("a.b.C"))
            .with_class(RawClass::class("a.b.c.D"))
            .with_class(RawClass::class("a.E"));
        let listed = bridge.list_package("a.b").unwrap();
        assert_eq!(listed, vec![ClassName::new("a.b.C")]);
    }

    #[test]
    fn unavailable_bridge_fails_every_call() {
        let mut bridge = MemoryBridge::new().with_class(RawClass::class("a.B"));
        bridge.set_unavailable("runtime exited");
        assert!(matches!(
            bridge.load_class(&ClassName::new("a.B")),
            Err(BridgeError::Unavailable(_))
        ));
        assert!(bridge.list_package("a").is_err());
    }
}
