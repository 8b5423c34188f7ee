//! Class-file descriptors and access flags in reflection terms.

use javamap_core::model::ClassName;
use javamap_core::types::{JavaType, Primitive};
use ristretto_classfile::{BaseType, ClassAccessFlags, FieldAccessFlags, FieldType, MethodAccessFlags};

pub struct JavaTypeConverter;

impl JavaTypeConverter {
    pub fn convert_type(ty: &FieldType) -> JavaType {
        match ty {
            FieldType::Base(base) => JavaType::Primitive(Self::convert_base(base)),
            FieldType::Object(name) => JavaType::Object(ClassName::new(name.as_str())),
            FieldType::Array(component) => {
                let mut depth = 1usize;
                let mut current = component.as_ref();
                while let FieldType::Array(inner) = current {
                    depth += 1;
                    current = inner.as_ref();
                }
                Self::convert_type(current).array_of(depth)
            }
        }
    }

    fn convert_base(base: &BaseType) -> Primitive {
        match base {
            BaseType::Boolean => Primitive::Boolean,
            BaseType::Byte => Primitive::Byte,
            BaseType::Char => Primitive::Char,
            BaseType::Double => Primitive::Double,
            BaseType::Float => Primitive::Float,
            BaseType::Int => Primitive::Int,
            BaseType::Long => Primitive::Long,
            BaseType::Short => Primitive::Short,
        }
    }

    /// Parameter and return types of a method descriptor, `void` when absent.
    pub fn convert_method(
        descriptor: &str,
    ) -> Result<(Vec<JavaType>, JavaType), ristretto_classfile::Error> {
        let (params, ret) = FieldType::parse_method_descriptor(descriptor)?;
        let return_type = match ret {
            None => JavaType::Primitive(Primitive::Void),
            Some(field_type) => Self::convert_type(&field_type),
        };
        Ok((params.iter().map(Self::convert_type).collect(), return_type))
    }
}

pub struct JavaModifierConverter;

impl JavaModifierConverter {
    pub fn parse_class(flags: ClassAccessFlags) -> Vec<String> {
        let mut mods = Vec::new();
        if flags.contains(ClassAccessFlags::PUBLIC) {
            mods.push("public".into());
        }
        if flags.contains(ClassAccessFlags::ABSTRACT) && !flags.contains(ClassAccessFlags::INTERFACE)
        {
            mods.push("abstract".into());
        }
        if flags.contains(ClassAccessFlags::FINAL) {
            mods.push("final".into());
        }
        if flags.contains(ClassAccessFlags::INTERFACE) {
            mods.push("interface".into());
        }
        mods
    }

    pub fn parse_field(flags: FieldAccessFlags) -> Vec<String> {
        let mut mods = Vec::new();
        if flags.contains(FieldAccessFlags::PUBLIC) {
            mods.push("public".into());
        }
        if flags.contains(FieldAccessFlags::PRIVATE) {
            mods.push("private".into());
        }
        if flags.contains(FieldAccessFlags::PROTECTED) {
            mods.push("protected".into());
        }
        if flags.contains(FieldAccessFlags::STATIC) {
            mods.push("static".into());
        }
        if flags.contains(FieldAccessFlags::FINAL) {
            mods.push("final".into());
        }
        if flags.contains(FieldAccessFlags::VOLATILE) {
            mods.push("volatile".into());
        }
        if flags.contains(FieldAccessFlags::TRANSIENT) {
            mods.push("transient".into());
        }
        mods
    }

    /// Source-level modifiers only; `bridge`, `varargs` and `synthetic` are
    /// reported as flags on the raw method instead.
    pub fn parse_method(flags: MethodAccessFlags) -> Vec<String> {
        let mut mods = Vec::new();
        if flags.contains(MethodAccessFlags::PUBLIC) {
            mods.push("public".into());
        }
        if flags.contains(MethodAccessFlags::PRIVATE) {
            mods.push("private".into());
        }
        if flags.contains(MethodAccessFlags::PROTECTED) {
            mods.push("protected".into());
        }
        if flags.contains(MethodAccessFlags::STATIC) {
            mods.push("static".into());
        }
        if flags.contains(MethodAccessFlags::FINAL) {
            mods.push("final".into());
        }
        if flags.contains(MethodAccessFlags::SYNCHRONIZED) {
            mods.push("synchronized".into());
        }
        if flags.contains(MethodAccessFlags::NATIVE) {
            mods.push("native".into());
        }
        if flags.contains(MethodAccessFlags::ABSTRACT) {
            mods.push("abstract".into());
        }
        if flags.contains(MethodAccessFlags::STRICT) {
            mods.push("strictfp".into());
        }
        mods
    }
}
