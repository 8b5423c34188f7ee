//! [`ReflectionBridge`] over compiled class files.

use crate::classpath::{ClassPath, ClassPathError, binary_names};
use crate::convert::{JavaModifierConverter, JavaTypeConverter};
use crate::jdk::JdkDiscoverer;
use javamap_core::Options;
use javamap_core::bridge::{BridgeError, RawClass, RawConstructor, RawField, RawMethod, ReflectionBridge};
use javamap_core::model::ClassName;
use javamap_core::types::JavaType;
use ristretto_classfile::{ClassAccessFlags, ClassFile, ConstantPool, FieldAccessFlags, MethodAccessFlags};
use std::io::Cursor;
use tracing::{debug, info, warn};

pub struct ClassFileBridge {
    class_path: ClassPath,
}

impl ClassFileBridge {
    pub fn new(class_path: ClassPath) -> Self {
        Self { class_path }
    }

    /// Opens the configured class path, followed by the JDK runtime when enabled.
    pub fn from_options(options: &Options) -> Result<Self, ClassPathError> {
        let mut class_path = ClassPath::open(&options.classpath)?;
        if options.include_jdk {
            let jdk = JdkDiscoverer::new();
            if jdk.assets().is_empty() {
                warn!("no JDK runtime found; java.* classes will be missing");
            }
            for asset in jdk.assets() {
                class_path.push(asset)?;
            }
            if let Some(root) = jdk.jdk_root() {
                info!(
                    root = %root.display(),
                    version = jdk.version().unwrap_or("unknown"),
                    "using JDK runtime"
                );
            }
        }
        Ok(Self::new(class_path))
    }

    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }
}

impl ReflectionBridge for ClassFileBridge {
    fn load_class(&mut self, name: &ClassName) -> Result<RawClass, BridgeError> {
        let bytes = self
            .class_path
            .find(name)?
            .ok_or_else(|| BridgeError::NotFound(name.clone()))?;
        let raw = read_class(name, bytes)?;
        debug!(class = %name, methods = raw.methods.len(), "class file read");
        Ok(raw)
    }

    /// Public top-level classes of `package`.
    fn list_package(&mut self, package: &str) -> Result<Vec<ClassName>, BridgeError> {
        let mut public = Vec::new();
        for name in self.class_path.list_package(package)? {
            let raw = self.load_class(&name)?;
            if raw.modifiers.iter().any(|m| m == "public") {
                public.push(name);
            }
        }
        Ok(public)
    }
}

/// Decodes one class file into the metadata a reflection call would report.
pub fn read_class(name: &ClassName, bytes: Vec<u8>) -> Result<RawClass, BridgeError> {
    let malformed = |reason: String| BridgeError::Malformed {
        class: name.clone(),
        reason,
    };
    let class = ClassFile::from_bytes(&mut Cursor::new(bytes))
        .map_err(|e| malformed(format!("unreadable class file: {e:?}")))?;
    let pool = &class.constant_pool;

    let this = class_at(pool, class.this_class).map_err(malformed)?;
    if !binary_names(name).iter().any(|candidate| *candidate == this) {
        return Err(malformed(format!("class file declares {this}")));
    }

    let is_interface = class.access_flags.contains(ClassAccessFlags::INTERFACE);
    // Reflection reports no superclass for interfaces.
    let superclass = if class.super_class == 0 || is_interface {
        None
    } else {
        Some(ClassName::new(class_at(pool, class.super_class).map_err(malformed)?))
    };
    let interfaces = class
        .interfaces
        .iter()
        .map(|&idx| class_at(pool, idx).map(ClassName::new))
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;

    let mut fields = Vec::new();
    for field in &class.fields {
        fields.push(RawField {
            name: utf8_at(pool, field.name_index).map_err(malformed)?,
            modifiers: JavaModifierConverter::parse_field(field.access_flags),
            field_type: JavaTypeConverter::convert_type(&field.field_type).reflection_name(),
            is_synthetic: field.access_flags.contains(FieldAccessFlags::SYNTHETIC),
        });
    }

    let mut constructors = Vec::new();
    let mut methods = Vec::new();
    for method in &class.methods {
        let method_name = utf8_at(pool, method.name_index).map_err(malformed)?;
        if method_name == "<clinit>" {
            continue;
        }
        let descriptor = utf8_at(pool, method.descriptor_index).map_err(malformed)?;
        let (params, returns) = JavaTypeConverter::convert_method(&descriptor)
            .map_err(|e| malformed(format!("bad descriptor {descriptor}: {e:?}")))?;
        let param_types: Vec<String> = params.iter().map(JavaType::reflection_name).collect();
        let flags = method.access_flags;
        let modifiers = JavaModifierConverter::parse_method(flags);
        let is_var_args = flags.contains(MethodAccessFlags::VARARGS);
        let is_synthetic = flags.contains(MethodAccessFlags::SYNTHETIC);

        if method_name == "<init>" {
            constructors.push(RawConstructor {
                modifiers,
                param_types,
                param_names: None,
                is_var_args,
                is_synthetic,
            });
        } else {
            methods.push(RawMethod {
                name: method_name,
                modifiers,
                param_types,
                return_type: returns.reflection_name(),
                param_names: None,
                is_var_args,
                is_synthetic,
                is_bridge: flags.contains(MethodAccessFlags::BRIDGE),
                generic_param_types: None,
                generic_return_type: None,
            });
        }
    }

    Ok(RawClass {
        name: name.clone(),
        modifiers: JavaModifierConverter::parse_class(class.access_flags),
        is_interface,
        is_enum: class.access_flags.contains(ClassAccessFlags::ENUM),
        superclass,
        interfaces,
        fields,
        constructors,
        methods,
    })
}

fn class_at(pool: &ConstantPool, index: u16) -> Result<String, String> {
    pool.try_get_class(index)
        .map(|name| name.to_string())
        .map_err(|e| format!("bad class reference #{index}: {e:?}"))
}

fn utf8_at(pool: &ConstantPool, index: u16) -> Result<String, String> {
    pool.try_get_utf8(index)
        .map(|value| value.to_string())
        .map_err(|e| format!("bad utf8 constant #{index}: {e:?}"))
}
