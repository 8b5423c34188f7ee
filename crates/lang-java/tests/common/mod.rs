//! Minimal class files built with `ristretto_classfile`; methods carry no `Code` attribute.
#![allow(dead_code)]

use ristretto_classfile::{
    ClassAccessFlags, ClassFile, ConstantPool, Field, FieldAccessFlags, FieldType, JAVA_8, Method,
    MethodAccessFlags,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One class file under construction; names use the slashed internal form.
pub struct ClassBuilder {
    class: ClassFile,
}

impl ClassBuilder {
    pub fn new(name: &str, access_flags: ClassAccessFlags) -> Self {
        let mut constant_pool = ConstantPool::default();
        let this_class = constant_pool.add_class(name).unwrap();
        let super_class = constant_pool.add_class("java/lang/Object").unwrap();
        Self {
            class: ClassFile {
                version: JAVA_8,
                constant_pool,
                access_flags,
                this_class,
                super_class,
                ..Default::default()
            },
        }
    }

    pub fn interface(name: &str) -> Self {
        Self::new(
            name,
            ClassAccessFlags::PUBLIC | ClassAccessFlags::INTERFACE | ClassAccessFlags::ABSTRACT,
        )
    }

    pub fn extends(mut self, name: &str) -> Self {
        self.class.super_class = self.class.constant_pool.add_class(name).unwrap();
        self
    }

    pub fn implements(mut self, name: &str) -> Self {
        let index = self.class.constant_pool.add_class(name).unwrap();
        self.class.interfaces.push(index);
        self
    }

    pub fn field(mut self, access_flags: FieldAccessFlags, name: &str, descriptor: &str) -> Self {
        let pool = &mut self.class.constant_pool;
        let field = Field {
            access_flags,
            name_index: pool.add_utf8(name).unwrap(),
            descriptor_index: pool.add_utf8(descriptor).unwrap(),
            field_type: FieldType::parse(descriptor).unwrap(),
            attributes: Vec::new(),
        };
        self.class.fields.push(field);
        self
    }

    pub fn method(mut self, access_flags: MethodAccessFlags, name: &str, descriptor: &str) -> Self {
        let pool = &mut self.class.constant_pool;
        let method = Method {
            access_flags,
            name_index: pool.add_utf8(name).unwrap(),
            descriptor_index: pool.add_utf8(descriptor).unwrap(),
            attributes: Vec::new(),
        };
        self.class.methods.push(method);
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.class.to_bytes(&mut bytes).unwrap();
        bytes
    }
}

/// `public interface com.example.Greeter { int VERSION; String greet(String); }`
pub fn greeter() -> ClassBuilder {
    ClassBuilder::interface("com/example/Greeter")
        .field(
            FieldAccessFlags::PUBLIC | FieldAccessFlags::STATIC | FieldAccessFlags::FINAL,
            "VERSION",
            "I",
        )
        .method(
            MethodAccessFlags::PUBLIC | MethodAccessFlags::ABSTRACT,
            "greet",
            "(Ljava/lang/String;)Ljava/lang/String;",
        )
}

/// A public class implementing `Greeter` and `Comparable`, with a nested class.
pub fn widget() -> ClassBuilder {
    let public = MethodAccessFlags::PUBLIC;
    ClassBuilder::new("com/example/Widget", ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER)
        .implements("com/example/Greeter")
        .implements("java/lang/Comparable")
        .field(FieldAccessFlags::PRIVATE, "parts", "[Lcom/example/Widget$Part;")
        .method(MethodAccessFlags::STATIC, "<clinit>", "()V")
        .method(public, "<init>", "()V")
        .method(public | MethodAccessFlags::VARARGS, "<init>", "([Ljava/lang/String;)V")
        .method(public, "greet", "(Ljava/lang/String;)Ljava/lang/String;")
        .method(public | MethodAccessFlags::VARARGS, "join", "([Ljava/lang/String;)V")
        .method(public, "compareTo", "(Lcom/example/Widget;)I")
        .method(
            public | MethodAccessFlags::BRIDGE | MethodAccessFlags::SYNTHETIC,
            "compareTo",
            "(Ljava/lang/Object;)I",
        )
        .method(public | MethodAccessFlags::NATIVE, "grid", "()[[D")
        .method(MethodAccessFlags::PRIVATE, "secret", "()V")
        .method(public, "part", "()Lcom/example/Widget$Part;")
}

/// Nesting is recorded in `InnerClasses`, which the reader ignores.
pub fn part() -> ClassBuilder {
    ClassBuilder::new("com/example/Widget$Part", ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER)
        .method(MethodAccessFlags::PUBLIC, "owner", "()Lcom/example/Widget;")
}

/// Package-private, so package listings skip it.
pub fn helper() -> ClassBuilder {
    ClassBuilder::new("com/example/Helper", ClassAccessFlags::SUPER)
}

pub fn write_jar(path: &Path, classes: &[(&str, &ClassBuilder)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for (name, class) in classes {
        zip.start_file(format!("{name}.class"), options).unwrap();
        zip.write_all(&class.bytes()).unwrap();
    }
    zip.finish().unwrap();
}

pub fn write_dir(root: &Path, classes: &[(&str, &ClassBuilder)]) {
    for (name, class) in classes {
        let file = root.join(format!("{name}.class"));
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, class.bytes()).unwrap();
    }
}

pub fn example_jar(path: &Path) {
    write_jar(
        path,
        &[
            ("com/example/Greeter", &greeter()),
            ("com/example/Widget", &widget()),
            ("com/example/Widget$Part", &part()),
            ("com/example/Helper", &helper()),
        ],
    );
}
