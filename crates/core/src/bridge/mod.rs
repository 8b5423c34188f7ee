//! The reflection bridge: where raw class metadata comes from.
//!
//! Every call takes `&mut self`, so a bridge serves exactly one fetch at a
//! time. Implementations backed by a single foreign runtime rely on that.

pub mod memory;

pub use memory::MemoryBridge;

use crate::error::JavaMapError;
use crate::model::ClassName;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("class not found: {0}")]
    NotFound(ClassName),
    #[error("bridge unavailable: {0}")]
    Unavailable(String),
    #[error("malformed metadata for {class}: {reason}")]
    Malformed { class: ClassName, reason: String },
}

impl From<BridgeError> for JavaMapError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::NotFound(name) => JavaMapError::ClassNotFound(name),
            BridgeError::Unavailable(reason) => JavaMapError::BridgeUnavailable(reason),
            malformed @ BridgeError::Malformed { .. } => {
                JavaMapError::BridgeUnavailable(malformed.to_string())
            }
        }
    }
}

pub trait ReflectionBridge {
    /// Fetches the declared metadata of one class.
    fn load_class(&mut self, name: &ClassName) -> Result<RawClass, BridgeError>;

    /// Classes living directly in `package`. Bridges that cannot enumerate return nothing.
    fn list_package(&mut self, _package: &str) -> Result<Vec<ClassName>, BridgeError> {
        Ok(Vec::new())
    }
}

impl<B: ReflectionBridge + ?Sized> ReflectionBridge for &mut B {
    fn load_class(&mut self, name: &ClassName) -> Result<RawClass, BridgeError> {
        (**self).load_class(name)
    }

    fn list_package(&mut self, package: &str) -> Result<Vec<ClassName>, BridgeError> {
        (**self).list_package(package)
    }
}

impl<B: ReflectionBridge + ?Sized> ReflectionBridge for Box<B> {
    fn load_class(&mut self, name: &ClassName) -> Result<RawClass, BridgeError> {
        (**self).load_class(name)
    }

    fn list_package(&mut self, package: &str) -> Result<Vec<ClassName>, BridgeError> {
        (**self).list_package(package)
    }
}

fn has_modifier(modifiers: &[String], modifier: &str) -> bool {
    modifiers.iter().any(|m| m == modifier)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Declared metadata of one class as reported by a bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClass {
    pub name: ClassName,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub is_enum: bool,
    #[serde(default)]
    pub superclass: Option<ClassName>,
    #[serde(default)]
    pub interfaces: Vec<ClassName>,
    #[serde(default)]
    pub fields: Vec<RawField>,
    #[serde(default)]
    pub constructors: Vec<RawConstructor>,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
}

impl RawClass {
    /// A public class extending `java.lang.Object`.
    pub fn class(name: &str) -> Self {
        Self {
            name: ClassName::new(name),
            modifiers: owned(&["public"]),
            is_interface: false,
            is_enum: false,
            superclass: Some(ClassName::new("java.lang.Object")),
            interfaces: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// A public interface. Interfaces report no superclass.
    pub fn interface(name: &str) -> Self {
        Self {
            modifiers: owned(&["public", "abstract", "interface"]),
            is_interface: true,
            superclass: None,
            ..Self::class(name)
        }
    }

    pub fn extends(mut self, superclass: Option<&str>) -> Self {
        self.superclass = superclass.map(ClassName::new);
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(ClassName::new(interface));
        self
    }

    pub fn enumeration(mut self) -> Self {
        self.is_enum = true;
        self
    }

    pub fn with_field(mut self, field: RawField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_constructor(mut self, constructor: RawConstructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_method(mut self, method: RawMethod) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub field_type: String,
    #[serde(default)]
    pub is_synthetic: bool,
}

impl RawField {
    pub fn new(name: &str, field_type: &str, modifiers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            modifiers: owned(modifiers),
            field_type: field_type.to_string(),
            is_synthetic: false,
        }
    }

    pub fn is_public(&self) -> bool {
        has_modifier(&self.modifiers, "public")
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConstructor {
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub param_types: Vec<String>,
    #[serde(default)]
    pub param_names: Option<Vec<String>>,
    #[serde(default)]
    pub is_var_args: bool,
    #[serde(default)]
    pub is_synthetic: bool,
}

impl RawConstructor {
    pub fn new(param_types: &[&str]) -> Self {
        Self {
            modifiers: owned(&["public"]),
            param_types: owned(param_types),
            param_names: None,
            is_var_args: false,
            is_synthetic: false,
        }
    }

    pub fn is_public(&self) -> bool {
        has_modifier(&self.modifiers, "public")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMethod {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub param_types: Vec<String>,
    pub return_type: String,
    #[serde(default)]
    pub param_names: Option<Vec<String>>,
    #[serde(default)]
    pub is_var_args: bool,
    #[serde(default)]
    pub is_synthetic: bool,
    /// Compiler-generated forwarder for a covariant override.
    #[serde(default)]
    pub is_bridge: bool,
    #[serde(default)]
    pub generic_param_types: Option<Vec<String>>,
    #[serde(default)]
    pub generic_return_type: Option<String>,
}

impl RawMethod {
    /// A public instance method.
    pub fn new(name: &str, param_types: &[&str], return_type: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: owned(&["public"]),
            param_types: owned(param_types),
            return_type: return_type.to_string(),
            param_names: None,
            is_var_args: false,
            is_synthetic: false,
            is_bridge: false,
            generic_param_types: None,
            generic_return_type: None,
        }
    }

    pub fn modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = owned(modifiers);
        self
    }

    pub fn var_args(mut self) -> Self {
        self.is_var_args = true;
        self
    }

    pub fn bridge(mut self) -> Self {
        self.is_bridge = true;
        self.is_synthetic = true;
        self
    }

    pub fn param_names(mut self, names: &[&str]) -> Self {
        self.param_names = Some(owned(names));
        self
    }

    pub fn generic(mut self, param_types: &[&str], return_type: &str) -> Self {
        self.generic_param_types = Some(owned(param_types));
        self.generic_return_type = Some(return_type.to_string());
        self
    }

    pub fn is_public(&self) -> bool {
        has_modifier(&self.modifiers, "public")
    }

    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static")
    }

    pub fn is_abstract(&self) -> bool {
        has_modifier(&self.modifiers, "abstract")
    }
}
