//! Turns one class's raw metadata into a [`ClassEntry`].
//!
//! The builder only reads from the bridge. It reports the whitelisted class
//! names it saw that are not resolved yet and leaves queueing them to the
//! resolver.

use crate::bridge::{BridgeError, RawClass, RawConstructor, RawField, RawMethod, ReflectionBridge};
use crate::error::Result;
use crate::model::method::{constructor_prototype, method_prototype, modifier_prefix};
use crate::model::{ClassEntry, ClassName, FieldEntry, MethodEntry};
use crate::overload::group_overloads;
use crate::types::{ClassRef, JavaType, ParamContext, Primitive, TsType, TypeRegistry, TypeTranslator};
use crate::whitelist::Whitelist;
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub const OBJECT_CLASS: &str = "java.lang.Object";

pub struct ClassEntryBuilder<'a> {
    whitelist: &'a Whitelist,
}

impl<'a> ClassEntryBuilder<'a> {
    pub fn new(whitelist: &'a Whitelist) -> Self {
        Self { whitelist }
    }

    fn translator(&self) -> TypeTranslator<'a, Whitelist> {
        TypeTranslator::new(self.whitelist)
    }

    /// Fetches `name` and builds its entry plus the newly referenced class names.
    pub fn build<B: ReflectionBridge + ?Sized>(
        &self,
        name: &ClassName,
        bridge: &mut B,
        resolved: &HashSet<ClassName>,
    ) -> Result<(ClassEntry, IndexSet<ClassName>)> {
        let raw = bridge.load_class(name)?;
        if raw.name != *name {
            return Err(BridgeError::Malformed {
                class: name.clone(),
                reason: format!("bridge answered with {}", raw.name),
            }
            .into());
        }
        self.build_from_raw(raw, resolved)
    }

    pub fn build_from_raw(
        &self,
        raw: RawClass,
        resolved: &HashSet<ClassName>,
    ) -> Result<(ClassEntry, IndexSet<ClassName>)> {
        let translator = self.translator();
        let name = raw.name.clone();

        let fields = raw
            .fields
            .iter()
            .filter(|f| f.is_public() && !f.is_synthetic)
            .map(|f| self.map_field(&name, f))
            .collect::<Result<Vec<_>>>()?;

        let constructors = raw
            .constructors
            .iter()
            .filter(|c| c.is_public() && !c.is_synthetic)
            .map(|c| self.map_constructor(&name, c))
            .collect::<Result<Vec<_>>>()?;

        let methods = self.map_class_methods(&raw)?;
        let variants = group_overloads(&methods);

        let mut interfaces = raw.interfaces.clone();
        if raw.is_interface && interfaces.is_empty() && name.as_str() != OBJECT_CLASS {
            // Interfaces have no superclass; they still ascend to the root.
            interfaces.push(ClassName::new(OBJECT_CLASS));
        }

        let ts_interfaces = raw
            .superclass
            .iter()
            .chain(&interfaces)
            .filter_map(|sup| {
                self.whitelist.lookup(sup).map(|spelling| {
                    TsType::Class(ClassRef {
                        name: sup.clone(),
                        spelling,
                    })
                })
            })
            .collect();

        let as_result = match Primitive::from_keyword(name.as_str()) {
            Some(p) => translator.translate_type(&JavaType::Primitive(p), ParamContext::Return),
            None => translator.translate_type(&JavaType::Object(name.clone()), ParamContext::Return),
        };
        let is_primitive = as_result.is_primitive() || Primitive::from_keyword(name.as_str()).is_some();
        let ts_type = if is_primitive {
            as_result.to_string()
        } else {
            name.short_name().to_string()
        };

        let entry = ClassEntry {
            short_name: name.short_name().to_string(),
            package_name: name.package_name().unwrap_or_default().to_string(),
            quoted_pkg_name: name.quoted_package_name(),
            fixed_path: name.fix_class_path(),
            is_interface: raw.is_interface,
            is_enum: raw.is_enum,
            is_primitive,
            superclass: raw.superclass.clone(),
            interfaces,
            ts_interfaces,
            fields,
            constructors,
            methods,
            variants,
            alias: name.short_name().to_string(),
            ts_type,
            use_alias: false,
            full_name: name,
        };

        let referenced = self.referenced_classes(&entry, resolved)?;
        debug!(
            class = %entry.full_name,
            methods = entry.methods.len(),
            referenced = referenced.len(),
            "built class entry"
        );
        Ok((entry, referenced))
    }

    /// Public methods, one per parameter list.
    ///
    /// A declaration whose parameters match an earlier one is dropped unless
    /// the earlier one was a compiler bridge, in which case it replaces it.
    pub fn map_class_methods(&self, raw: &RawClass) -> Result<Vec<MethodEntry>> {
        let mut methods: Vec<MethodEntry> = Vec::new();
        let mut seen: HashMap<String, (usize, bool)> = HashMap::new();

        for method in raw
            .methods
            .iter()
            .filter(|m| m.is_public() && (m.is_bridge || !m.is_synthetic))
        {
            let entry = self.map_method(&raw.name, raw.is_interface, method)?;
            let key = entry.dedup_key().to_string();
            match seen.get(&key).copied() {
                Some((idx, true)) if !method.is_bridge => {
                    methods[idx] = entry;
                    seen.insert(key, (idx, false));
                }
                Some(_) => {
                    debug!(class = %raw.name, signature = %entry.signature, "skipping redeclaration");
                }
                None => {
                    seen.insert(key, (methods.len(), method.is_bridge));
                    methods.push(entry);
                }
            }
        }
        Ok(methods)
    }

    pub fn map_method(
        &self,
        declared: &ClassName,
        in_interface: bool,
        raw: &RawMethod,
    ) -> Result<MethodEntry> {
        let translator = self.translator();
        let params = parse_all(&raw.param_types)?;
        let returns = JavaType::parse(&raw.return_type)?;

        let signature = format!(
            "{}({}){}",
            raw.name,
            params.iter().map(JavaType::descriptor).collect::<String>(),
            returns.descriptor()
        );

        let is_default = in_interface && !raw.is_abstract() && !raw.is_static();
        let prefix = modifier_prefix(&raw.modifiers, is_default);
        let plain_params: Vec<String> = params.iter().map(JavaType::java_name).collect();
        let plain_proto = method_prototype(
            &prefix,
            &returns.java_name(),
            declared,
            &raw.name,
            &plain_params,
        );

        let generic_params = match &raw.generic_param_types {
            Some(generic) if generic.len() == params.len() => generic.clone(),
            _ => plain_params.clone(),
        };
        let generic_returns = raw
            .generic_return_type
            .clone()
            .unwrap_or_else(|| returns.java_name());
        let generic_proto = method_prototype(
            &prefix,
            &generic_returns,
            declared,
            &raw.name,
            &spread_last(generic_params, raw.is_var_args),
        );

        Ok(MethodEntry {
            name: raw.name.clone(),
            declared: declared.clone(),
            returns: returns.reflection_name(),
            param_types: params.iter().map(JavaType::reflection_name).collect(),
            param_names: param_names(raw.param_names.as_deref(), params.len()),
            is_var_args: raw.is_var_args,
            is_static: raw.is_static(),
            generic_proto,
            plain_proto,
            signature,
            ts_param_types: params
                .iter()
                .map(|p| translator.translate_type(p, ParamContext::Parameter))
                .collect(),
            ts_returns: translator.translate_type(&returns, ParamContext::Return),
        })
    }

    /// Constructors are methods named `<init>` returning `void`.
    pub fn map_constructor(&self, declared: &ClassName, raw: &RawConstructor) -> Result<MethodEntry> {
        let translator = self.translator();
        let params = parse_all(&raw.param_types)?;
        let prefix = modifier_prefix(&raw.modifiers, false);
        let plain_params: Vec<String> = params.iter().map(JavaType::java_name).collect();

        Ok(MethodEntry {
            name: "<init>".to_string(),
            declared: declared.clone(),
            returns: "void".to_string(),
            param_types: params.iter().map(JavaType::reflection_name).collect(),
            param_names: param_names(raw.param_names.as_deref(), params.len()),
            is_var_args: raw.is_var_args,
            is_static: false,
            generic_proto: constructor_prototype(
                &prefix,
                declared,
                &spread_last(plain_params.clone(), raw.is_var_args),
            ),
            plain_proto: constructor_prototype(&prefix, declared, &plain_params),
            signature: format!(
                "<init>({})V",
                params.iter().map(JavaType::descriptor).collect::<String>()
            ),
            ts_param_types: params
                .iter()
                .map(|p| translator.translate_type(p, ParamContext::Parameter))
                .collect(),
            ts_returns: TsType::Void,
        })
    }

    pub fn map_field(&self, declared: &ClassName, raw: &RawField) -> Result<FieldEntry> {
        let ty = JavaType::parse(&raw.field_type)?;
        Ok(FieldEntry {
            name: raw.name.clone(),
            declared: declared.clone(),
            field_type: ty.reflection_name(),
            is_static: raw.is_static(),
            ts_type: self.translator().translate_type(&ty, ParamContext::Return),
        })
    }

    /// Whitelisted, unresolved classes mentioned by `entry`, in first-seen order.
    fn referenced_classes(
        &self,
        entry: &ClassEntry,
        resolved: &HashSet<ClassName>,
    ) -> Result<IndexSet<ClassName>> {
        let mut referenced = IndexSet::new();
        let mut note = |name: &ClassName| {
            if name != &entry.full_name
                && !resolved.contains(name)
                && self.whitelist.in_white_list(name.as_str())
            {
                referenced.insert(name.clone());
            }
        };

        for name in entry.superclass.iter().chain(&entry.interfaces) {
            note(name);
        }

        let member_types = entry
            .fields
            .iter()
            .map(|f| f.field_type.as_str())
            .chain(
                entry
                    .constructors
                    .iter()
                    .chain(&entry.methods)
                    .flat_map(|m| m.param_types.iter().chain(std::iter::once(&m.returns)))
                    .map(String::as_str),
            );
        for raw in member_types {
            if let Some(class) = JavaType::parse(raw)?.referenced_class() {
                note(class);
            }
        }
        Ok(referenced)
    }
}

fn parse_all(raw: &[String]) -> Result<Vec<JavaType>> {
    raw.iter().map(|t| JavaType::parse(t)).collect()
}

fn param_names(given: Option<&[String]>, count: usize) -> Vec<String> {
    match given {
        Some(names) if names.len() == count => names.to_vec(),
        _ => (0..count).map(|i| format!("arg{i}")).collect(),
    }
}

/// Generic prototypes spell a varargs tail as `T...`.
fn spread_last(mut params: Vec<String>, is_var_args: bool) -> Vec<String> {
    if is_var_args {
        if let Some(last) = params.last_mut() {
            if let Some(element) = last.strip_suffix("[]") {
                *last = format!("{element}...");
            }
        }
    }
    params
}
