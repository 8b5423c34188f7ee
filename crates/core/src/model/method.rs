use super::ClassName;
use crate::types::TsType;
use serde::Serialize;

/// One declared method or constructor, translated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodEntry {
    pub name: String,
    pub declared: ClassName,
    /// Raw return type in reflection spelling.
    pub returns: String,
    pub param_types: Vec<String>,
    pub param_names: Vec<String>,
    pub is_var_args: bool,
    pub is_static: bool,
    pub generic_proto: String,
    pub plain_proto: String,
    /// Name plus JVM descriptor: `wait(JI)V`.
    pub signature: String,
    pub ts_param_types: Vec<TsType>,
    pub ts_returns: TsType,
}

impl MethodEntry {
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }

    /// Fewest arguments a call may pass; a varargs tail may be empty.
    pub fn min_arity(&self) -> usize {
        if self.is_var_args {
            self.arity().saturating_sub(1)
        } else {
            self.arity()
        }
    }

    /// Signature without the return descriptor, e.g. `wait(JI)`.
    ///
    /// Redeclarations with covariant return types share this key.
    pub fn dedup_key(&self) -> &str {
        match self.signature.rfind(')') {
            Some(idx) => &self.signature[..=idx],
            None => &self.signature,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }

    pub fn ts_types_mut(&mut self) -> impl Iterator<Item = &mut TsType> {
        self.ts_param_types
            .iter_mut()
            .chain(std::iter::once(&mut self.ts_returns))
    }
}

/// Canonical modifier order, as `java.lang.reflect.Modifier#toString` prints it.
const MODIFIER_ORDER: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "static",
    "final",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
];

pub(crate) fn modifier_prefix(modifiers: &[String], is_default: bool) -> String {
    let mut words: Vec<&str> = MODIFIER_ORDER
        .iter()
        .copied()
        .filter(|m| modifiers.iter().any(|have| have == m))
        .collect();
    if is_default {
        words.push("default");
    }
    words.join(" ")
}

/// `public native int java.lang.Object.hashCode()`
pub(crate) fn method_prototype(
    prefix: &str,
    returns: &str,
    declared: &ClassName,
    name: &str,
    params: &[String],
) -> String {
    let head = if prefix.is_empty() {
        returns.to_string()
    } else {
        format!("{prefix} {returns}")
    };
    format!("{head} {declared}.{name}({})", params.join(","))
}

/// `public java.util.ArrayList(int)`
pub(crate) fn constructor_prototype(prefix: &str, declared: &ClassName, params: &[String]) -> String {
    if prefix.is_empty() {
        format!("{declared}({})", params.join(","))
    } else {
        format!("{prefix} {declared}({})", params.join(","))
    }
}
