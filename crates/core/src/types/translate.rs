use super::descriptor::{JavaType, Primitive};
use crate::error::Result;
use crate::model::ClassName;
use serde::{Serialize, Serializer};
use std::fmt;

/// Position a type occupies in a call.
///
/// Parameters take permissive wrapper types that accept raw or boxed values,
/// results take the tightest spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamContext {
    #[default]
    Parameter,
    Return,
}

/// A class the run maps, spelled by its generated name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
    pub name: ClassName,
    pub spelling: String,
}

/// Target type spelling produced by [`TypeTranslator`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TsType {
    Void,
    /// Type that cannot be expressed, rendered as `void`.
    Unsupported,
    Boolean,
    Number,
    String,
    LongValue,
    BooleanT,
    ByteT,
    CharT,
    DoubleT,
    FloatT,
    IntegerT,
    LongT,
    ShortT,
    NumberT,
    StringT,
    ObjectT,
    Class(ClassRef),
    /// Parameter-side wrapper, `array_t<T>`.
    ArrayT(Box<TsType>),
    /// Native array, `T[]`.
    Array(Box<TsType>),
}

impl TsType {
    /// Spellings that stand for a JavaScript primitive value.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TsType::Boolean | TsType::Number | TsType::String | TsType::LongValue
        )
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TsType::Void | TsType::Unsupported)
    }

    /// Replaces every class reference `keep` rejects with `object_t`.
    pub fn retain_classes(&mut self, keep: &impl Fn(&ClassName) -> bool) {
        match self {
            TsType::Class(class) if !keep(&class.name) => *self = TsType::ObjectT,
            TsType::ArrayT(inner) | TsType::Array(inner) => inner.retain_classes(keep),
            _ => {}
        }
    }

    /// Calls `f` on every class reference, looking through arrays.
    pub fn for_each_class_mut(&mut self, f: &mut impl FnMut(&mut ClassRef)) {
        match self {
            TsType::Class(class) => f(class),
            TsType::ArrayT(inner) | TsType::Array(inner) => inner.for_each_class_mut(f),
            _ => {}
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TsType::Void | TsType::Unsupported => f.write_str("void"),
            TsType::Boolean => f.write_str("boolean"),
            TsType::Number => f.write_str("number"),
            TsType::String => f.write_str("string"),
            TsType::LongValue => f.write_str("longValue_t"),
            TsType::BooleanT => f.write_str("boolean_t"),
            TsType::ByteT => f.write_str("byte_t"),
            TsType::CharT => f.write_str("char_t"),
            TsType::DoubleT => f.write_str("double_t"),
            TsType::FloatT => f.write_str("float_t"),
            TsType::IntegerT => f.write_str("integer_t"),
            TsType::LongT => f.write_str("long_t"),
            TsType::ShortT => f.write_str("short_t"),
            TsType::NumberT => f.write_str("number_t"),
            TsType::StringT => f.write_str("string_t"),
            TsType::ObjectT => f.write_str("object_t"),
            TsType::Class(class) => f.write_str(&class.spelling),
            TsType::ArrayT(inner) => write!(f, "array_t<{inner}>"),
            TsType::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

impl Serialize for TsType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Source of generated names for classes the run is mapping.
pub trait TypeRegistry {
    fn lookup(&self, name: &ClassName) -> Option<String>;
}

/// No class is registered; every reference becomes `object_t`.
impl TypeRegistry for () {
    fn lookup(&self, _name: &ClassName) -> Option<String> {
        None
    }
}

pub struct TypeTranslator<'a, R: TypeRegistry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: TypeRegistry + ?Sized> TypeTranslator<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    pub fn translate(&self, descriptor: &str, context: ParamContext) -> Result<TsType> {
        let ty = JavaType::parse(descriptor)?;
        Ok(self.translate_type(&ty, context))
    }

    pub fn translate_type(&self, ty: &JavaType, context: ParamContext) -> TsType {
        match ty {
            JavaType::Primitive(p) => primitive(*p, context),
            JavaType::Object(name) => self.object(name, context),
            JavaType::Array { element, depth } => match context {
                ParamContext::Parameter if *depth == 1 => {
                    TsType::ArrayT(Box::new(self.translate_type(element, context)))
                }
                // Nested arrays are not accepted as arguments.
                ParamContext::Parameter => TsType::Unsupported,
                ParamContext::Return => {
                    let mut out = self.translate_type(element, context);
                    for _ in 0..*depth {
                        out = TsType::Array(Box::new(out));
                    }
                    out
                }
            },
        }
    }

    fn object(&self, name: &ClassName, context: ParamContext) -> TsType {
        if let Some(boxed) = boxed_primitive(name.as_str()) {
            return primitive(boxed, context);
        }
        match (name.as_str(), context) {
            ("java.lang.Number", ParamContext::Parameter) => return TsType::NumberT,
            ("java.lang.Number", ParamContext::Return) => return TsType::Number,
            ("java.lang.String", ParamContext::Parameter) => return TsType::StringT,
            ("java.lang.String", ParamContext::Return) => return TsType::String,
            ("java.lang.Object", _) => return TsType::ObjectT,
            _ => {}
        }
        match self.registry.lookup(name) {
            Some(spelling) => TsType::Class(ClassRef {
                name: name.clone(),
                spelling,
            }),
            None => TsType::ObjectT,
        }
    }
}

/// Primitive a boxed wrapper class stands for.
pub fn boxed_primitive(name: &str) -> Option<Primitive> {
    Some(match name {
        "java.lang.Boolean" => Primitive::Boolean,
        "java.lang.Byte" => Primitive::Byte,
        "java.lang.Character" => Primitive::Char,
        "java.lang.Double" => Primitive::Double,
        "java.lang.Float" => Primitive::Float,
        "java.lang.Integer" => Primitive::Int,
        "java.lang.Long" => Primitive::Long,
        "java.lang.Short" => Primitive::Short,
        "java.lang.Void" => Primitive::Void,
        _ => return None,
    })
}

fn primitive(p: Primitive, context: ParamContext) -> TsType {
    match context {
        ParamContext::Parameter => match p {
            Primitive::Boolean => TsType::BooleanT,
            Primitive::Byte => TsType::ByteT,
            Primitive::Char => TsType::CharT,
            Primitive::Double => TsType::DoubleT,
            Primitive::Float => TsType::FloatT,
            Primitive::Int => TsType::IntegerT,
            Primitive::Long => TsType::LongT,
            Primitive::Short => TsType::ShortT,
            Primitive::Void => TsType::Void,
        },
        ParamContext::Return => match p {
            Primitive::Boolean => TsType::Boolean,
            Primitive::Char => TsType::String,
            // 64-bit values do not fit a JavaScript number.
            Primitive::Long => TsType::LongValue,
            Primitive::Byte
            | Primitive::Double
            | Primitive::Float
            | Primitive::Int
            | Primitive::Short => TsType::Number,
            Primitive::Void => TsType::Void,
        },
    }
}
