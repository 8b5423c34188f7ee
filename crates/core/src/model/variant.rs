use super::MethodEntry;
use serde::Serialize;

/// Same-named methods that share one call shape in the target type system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum VariantGroup {
    /// The only overload taking `arity` parameters.
    #[serde(rename_all = "camelCase")]
    ByArity { arity: usize, method: MethodEntry },
    /// Overloads of equal arity told apart by the parameter type at the
    /// first position where their translations differ.
    #[serde(rename_all = "camelCase")]
    ByType {
        arity: usize,
        divergent_at: usize,
        methods: Vec<MethodEntry>,
    },
    /// Overloads that cannot be told apart; emitted as one union call shape.
    #[serde(rename_all = "camelCase")]
    Union { arity: usize, methods: Vec<MethodEntry> },
}

impl VariantGroup {
    pub fn arity(&self) -> usize {
        match self {
            VariantGroup::ByArity { arity, .. }
            | VariantGroup::ByType { arity, .. }
            | VariantGroup::Union { arity, .. } => *arity,
        }
    }

    pub fn methods(&self) -> &[MethodEntry] {
        match self {
            VariantGroup::ByArity { method, .. } => std::slice::from_ref(method),
            VariantGroup::ByType { methods, .. } | VariantGroup::Union { methods, .. } => methods,
        }
    }

    pub fn methods_mut(&mut self) -> &mut [MethodEntry] {
        match self {
            VariantGroup::ByArity { method, .. } => std::slice::from_mut(method),
            VariantGroup::ByType { methods, .. } | VariantGroup::Union { methods, .. } => methods,
        }
    }

    pub fn min_arity(&self) -> usize {
        self.methods()
            .iter()
            .map(MethodEntry::min_arity)
            .min()
            .unwrap_or_else(|| self.arity())
    }

    /// Stable key for emitters: `2`, `2@1` or `2|union`.
    pub fn key(&self) -> String {
        match self {
            VariantGroup::ByArity { arity, .. } => arity.to_string(),
            VariantGroup::ByType {
                arity, divergent_at, ..
            } => format!("{arity}@{divergent_at}"),
            VariantGroup::Union { arity, .. } => format!("{arity}|union"),
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, VariantGroup::Union { .. })
    }
}
