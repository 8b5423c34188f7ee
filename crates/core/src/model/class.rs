use super::{ClassName, MethodEntry, VariantGroup};
use crate::types::TsType;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEntry {
    pub name: String,
    pub declared: ClassName,
    pub field_type: String,
    pub is_static: bool,
    pub ts_type: TsType,
}

/// The resolved structural record for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub full_name: ClassName,
    pub short_name: String,
    pub package_name: String,
    pub quoted_pkg_name: String,
    /// Full path with reserved segments escaped.
    pub fixed_path: String,
    pub is_interface: bool,
    pub is_enum: bool,
    pub is_primitive: bool,
    pub superclass: Option<ClassName>,
    /// Directly declared interfaces, not their ancestors.
    pub interfaces: Vec<ClassName>,
    /// Mapped supertypes in target spelling.
    pub ts_interfaces: Vec<TsType>,
    pub fields: Vec<FieldEntry>,
    pub constructors: Vec<MethodEntry>,
    pub methods: Vec<MethodEntry>,
    /// Overload groups keyed by method name, in declaration order.
    pub variants: IndexMap<String, Vec<VariantGroup>>,
    pub ts_type: String,
    pub alias: String,
    pub use_alias: bool,
}

impl ClassEntry {
    pub fn method(&self, name: &str) -> impl Iterator<Item = &MethodEntry> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn variant_groups(&self, name: &str) -> &[VariantGroup] {
        self.variants.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn signatures(&self) -> Vec<&str> {
        let mut sigs: Vec<&str> = self.methods.iter().map(|m| m.signature.as_str()).collect();
        sigs.sort_unstable();
        sigs
    }

    /// Every target type this entry mentions, for respelling after aliasing.
    pub(crate) fn ts_types_mut(&mut self) -> impl Iterator<Item = &mut TsType> {
        let fields = self.fields.iter_mut().map(|f| &mut f.ts_type);
        let members = self
            .constructors
            .iter_mut()
            .chain(self.methods.iter_mut())
            .flat_map(MethodEntry::ts_types_mut);
        let variants = self
            .variants
            .values_mut()
            .flat_map(|groups| groups.iter_mut())
            .flat_map(|group| group.methods_mut().iter_mut())
            .flat_map(MethodEntry::ts_types_mut);
        self.ts_interfaces
            .iter_mut()
            .chain(fields)
            .chain(members)
            .chain(variants)
    }
}
