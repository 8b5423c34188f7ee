//! Groups overloaded methods into call shapes the target can express.
//!
//! Overloads are bucketed by parameter count. A bucket holding one method is
//! a [`VariantGroup::ByArity`]. A bucket whose members can all be told apart
//! at their first differing parameter becomes [`VariantGroup::ByType`];
//! anything else is kept whole as a [`VariantGroup::Union`]. Groups are
//! ordered by minimum arity, then by first declaration.

use crate::model::{ClassName, MethodEntry, VariantGroup};
use crate::types::TsType;
use indexmap::IndexMap;

/// Runtime value family a parameter type accepts.
#[derive(Debug, PartialEq, Eq)]
enum Shape<'a> {
    /// Accepts anything, so it never separates two overloads.
    Any,
    Void,
    Boolean,
    Numeric,
    Text,
    Array,
    Class(&'a ClassName),
}

fn shape(ty: &TsType) -> Shape<'_> {
    match ty {
        TsType::ObjectT => Shape::Any,
        TsType::Void | TsType::Unsupported => Shape::Void,
        TsType::Boolean | TsType::BooleanT => Shape::Boolean,
        TsType::Number
        | TsType::LongValue
        | TsType::ByteT
        | TsType::DoubleT
        | TsType::FloatT
        | TsType::IntegerT
        | TsType::LongT
        | TsType::ShortT
        | TsType::NumberT => Shape::Numeric,
        TsType::String | TsType::StringT | TsType::CharT => Shape::Text,
        TsType::ArrayT(_) | TsType::Array(_) => Shape::Array,
        TsType::Class(class) => Shape::Class(&class.name),
    }
}

/// Position at which two equal-arity overloads separate, if they do.
fn divergence(a: &MethodEntry, b: &MethodEntry) -> Option<usize> {
    let idx = a
        .ts_param_types
        .iter()
        .zip(&b.ts_param_types)
        .position(|(x, y)| x != y)?;
    let (x, y) = (shape(&a.ts_param_types[idx]), shape(&b.ts_param_types[idx]));
    (x != Shape::Any && y != Shape::Any && x != y).then_some(idx)
}

/// Partitions overloads sharing one name.
pub fn group_variants(overloads: &[&MethodEntry]) -> Vec<VariantGroup> {
    let mut buckets: IndexMap<usize, Vec<&MethodEntry>> = IndexMap::new();
    for &method in overloads {
        buckets.entry(method.arity()).or_default().push(method);
    }

    let mut groups: Vec<VariantGroup> = buckets
        .into_iter()
        .map(|(arity, members)| group_bucket(arity, members))
        .collect();
    // Stable: ties keep bucket order, which is first-declaration order.
    groups.sort_by_key(VariantGroup::min_arity);
    groups
}

fn group_bucket(arity: usize, members: Vec<&MethodEntry>) -> VariantGroup {
    if let [only] = members.as_slice() {
        return VariantGroup::ByArity {
            arity,
            method: (*only).clone(),
        };
    }

    let mut divergent_at = usize::MAX;
    let mut separable = true;
    'pairs: for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            match divergence(a, b) {
                Some(idx) => divergent_at = divergent_at.min(idx),
                None => {
                    separable = false;
                    break 'pairs;
                }
            }
        }
    }

    let methods = members.into_iter().cloned().collect();
    if separable {
        VariantGroup::ByType {
            arity,
            divergent_at,
            methods,
        }
    } else {
        VariantGroup::Union { arity, methods }
    }
}

/// Groups every method of a class, keyed by name in declaration order.
pub fn group_overloads(methods: &[MethodEntry]) -> IndexMap<String, Vec<VariantGroup>> {
    let mut by_name: IndexMap<&str, Vec<&MethodEntry>> = IndexMap::new();
    for method in methods {
        by_name.entry(method.name.as_str()).or_default().push(method);
    }
    by_name
        .into_iter()
        .map(|(name, overloads)| (name.to_string(), group_variants(&overloads)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassRef;

    fn method(name: &str, params: Vec<TsType>, var_args: bool) -> MethodEntry {
        MethodEntry {
            name: name.to_string(),
            declared: ClassName::new("com.example.Foo"),
            returns: "void".to_string(),
            param_types: params.iter().map(|p| p.to_string()).collect(),
            param_names: (0..params.len()).map(|i| format!("arg{i}")).collect(),
            is_var_args: var_args,
            is_static: false,
            generic_proto: String::new(),
            plain_proto: String::new(),
            signature: format!("{name}({})V", params.len()),
            ts_param_types: params,
            ts_returns: TsType::Void,
        }
    }

    fn class(name: &str) -> TsType {
        let name = ClassName::new(name);
        TsType::Class(ClassRef {
            spelling: name.short_name().to_string(),
            name,
        })
    }

    #[test]
    fn distinct_arities_get_their_own_groups() {
        let a = method("wait", vec![], false);
        let b = method("wait", vec![TsType::LongT], false);
        let c = method("wait", vec![TsType::LongT, TsType::IntegerT], false);
        let groups = group_variants(&[&c, &a, &b]);
        assert_eq!(
            groups.iter().map(VariantGroup::key).collect::<Vec<_>>(),
            vec!["0", "1", "2"]
        );
        assert!(groups.iter().all(|g| matches!(g, VariantGroup::ByArity { .. })));
    }

    #[test]
    fn separable_types_share_a_group() {
        let a = method("put", vec![TsType::StringT, TsType::IntegerT], false);
        let b = method("put", vec![TsType::StringT, TsType::BooleanT], false);
        let c = method("put", vec![TsType::StringT, class("com.example.Bar")], false);
        let groups = group_variants(&[&a, &b, &c]);
        assert_eq!(groups.len(), 1);
        match &groups[0] {
            VariantGroup::ByType {
                arity,
                divergent_at,
                methods,
            } => {
                assert_eq!(*arity, 2);
                assert_eq!(*divergent_at, 1);
                assert_eq!(methods.len(), 3);
            }
            other => panic!("expected ByType, got {other:?}"),
        }
    }

    #[test]
    fn numeric_overloads_collapse_into_a_union() {
        let a = method("abs", vec![TsType::IntegerT], false);
        let b = method("abs", vec![TsType::LongT], false);
        let c = method("abs", vec![TsType::DoubleT], false);
        let groups = group_variants(&[&a, &b, &c]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_union());
        assert_eq!(groups[0].methods().len(), 3, "no overload may be dropped");
    }

    #[test]
    fn object_parameters_never_separate() {
        let a = method("add", vec![TsType::ObjectT], false);
        let b = method("add", vec![TsType::StringT], false);
        assert!(group_variants(&[&a, &b])[0].is_union());
    }

    #[test]
    fn identical_translations_are_a_union() {
        let a = method("valueOf", vec![TsType::IntegerT], false);
        let b = method("valueOf", vec![TsType::IntegerT], false);
        assert!(group_variants(&[&a, &b])[0].is_union());
    }

    #[test]
    fn varargs_lower_the_minimum_arity() {
        let one = method("of", vec![TsType::ObjectT], false);
        let spread = method(
            "of",
            vec![TsType::ObjectT, TsType::ArrayT(Box::new(TsType::ObjectT))],
            true,
        );
        let groups = group_variants(&[&spread, &one]);
        // Both start at one argument; the varargs bucket was seen first.
        assert_eq!(groups[0].arity(), 2);
        assert_eq!(groups[0].min_arity(), 1);
        assert_eq!(groups[1].arity(), 1);
    }

    #[test]
    fn overloads_are_keyed_by_name_in_declaration_order() {
        let methods = vec![
            method("size", vec![], false),
            method("get", vec![TsType::IntegerT], false),
            method("get", vec![TsType::StringT], false),
        ];
        let grouped = group_overloads(&methods);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["size", "get"]);
        assert!(matches!(grouped["get"][0], VariantGroup::ByType { .. }));
    }
}
