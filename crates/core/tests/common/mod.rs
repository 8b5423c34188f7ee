//! Metadata fixtures shaped like the JDK classes they are named after.
#![allow(dead_code)]


use javamap_core::bridge::{RawClass, RawConstructor, RawField, RawMethod};
use javamap_core::{MemoryBridge, Whitelist, WhitelistEntry};

pub fn object_class() -> RawClass {
    RawClass::class("java.lang.Object")
        .extends(None)
        .with_constructor(RawConstructor::new(&[]))
        .with_method(
            RawMethod::new("registerNatives", &[], "void").modifiers(&["private", "static", "native"]),
        )
        .with_method(
            RawMethod::new("getClass", &[], "java.lang.Class").modifiers(&["public", "final", "native"]),
        )
        .with_method(RawMethod::new("hashCode", &[], "int").modifiers(&["public", "native"]))
        .with_method(RawMethod::new("equals", &["java.lang.Object"], "boolean"))
        .with_method(
            RawMethod::new("clone", &[], "java.lang.Object").modifiers(&["protected", "native"]),
        )
        .with_method(RawMethod::new("toString", &[], "java.lang.String"))
        .with_method(RawMethod::new("notify", &[], "void").modifiers(&["public", "final", "native"]))
        .with_method(
            RawMethod::new("notifyAll", &[], "void").modifiers(&["public", "final", "native"]),
        )
        .with_method(
            RawMethod::new("wait", &["long"], "void").modifiers(&["public", "final", "native"]),
        )
        .with_method(RawMethod::new("wait", &["long", "int"], "void").modifiers(&["public", "final"]))
        .with_method(RawMethod::new("wait", &[], "void").modifiers(&["public", "final"]))
        .with_method(RawMethod::new("finalize", &[], "void").modifiers(&["protected"]))
}

pub fn iterator_interface() -> RawClass {
    RawClass::interface("java.util.Iterator")
        .with_method(RawMethod::new("hasNext", &[], "boolean").modifiers(&["public", "abstract"]))
        .with_method(
            RawMethod::new("next", &[], "java.lang.Object")
                .modifiers(&["public", "abstract"])
                .generic(&[], "E"),
        )
        .with_method(RawMethod::new("remove", &[], "void"))
        .with_method(
            RawMethod::new("forEachRemaining", &["java.util.function.Consumer"], "void")
                .param_names(&["action"])
                .generic(&["java.util.function.Consumer<? super E>"], "void"),
        )
}

pub fn consumer_interface() -> RawClass {
    RawClass::interface("java.util.function.Consumer")
        .with_method(
            RawMethod::new("accept", &["java.lang.Object"], "void").modifiers(&["public", "abstract"]),
        )
        .with_method(RawMethod::new(
            "andThen",
            &["java.util.function.Consumer"],
            "java.util.function.Consumer",
        ))
}

pub fn function_interface() -> RawClass {
    RawClass::interface("java.util.function.Function")
        .with_method(
            RawMethod::new("apply", &["java.lang.Object"], "java.lang.Object")
                .modifiers(&["public", "abstract"]),
        )
        .with_method(RawMethod::new(
            "compose",
            &["java.util.function.Function"],
            "java.util.function.Function",
        ))
        .with_method(RawMethod::new(
            "andThen",
            &["java.util.function.Function"],
            "java.util.function.Function",
        ))
        .with_method(
            RawMethod::new("identity", &[], "java.util.function.Function")
                .modifiers(&["public", "static"]),
        )
}

pub fn class_class() -> RawClass {
    RawClass::class("java.lang.Class")
        .with_method(RawMethod::new("getName", &[], "java.lang.String"))
        .with_method(RawMethod::new("isInterface", &[], "boolean").modifiers(&["public", "native"]))
}

/// A small graph library: `Graph` holds `Vertex` and `Edge`, both `Element`s.
pub fn graph_classes() -> Vec<RawClass> {
    vec![
        RawClass::interface("com.example.graph.Element")
            .with_method(RawMethod::new("id", &[], "java.lang.Object").modifiers(&["public", "abstract"]))
            .with_method(
                RawMethod::new("property", &["java.lang.String"], "java.lang.Object")
                    .modifiers(&["public", "abstract"]),
            ),
        RawClass::interface("com.example.graph.Vertex")
            .implements("com.example.graph.Element")
            .with_method(
                RawMethod::new("edges", &["[Ljava.lang.String;"], "java.util.Iterator")
                    .modifiers(&["public", "abstract"])
                    .var_args(),
            )
            .with_method(
                RawMethod::new("addEdge", &["java.lang.String", "com.example.graph.Vertex"], "com.example.graph.Edge")
                    .modifiers(&["public", "abstract"]),
            ),
        RawClass::interface("com.example.graph.Edge")
            .implements("com.example.graph.Element")
            .with_method(
                RawMethod::new("outVertex", &[], "com.example.graph.Vertex").modifiers(&["public", "abstract"]),
            ),
        RawClass::class("com.example.graph.Graph")
            .with_field(RawField::new("DEFAULT_NAME", "java.lang.String", &["public", "static", "final"]))
            .with_constructor(RawConstructor::new(&[]))
            .with_constructor(RawConstructor::new(&["java.lang.String"]))
            .with_method(RawMethod::new("addVertex", &[], "com.example.graph.Vertex"))
            .with_method(RawMethod::new("addVertex", &["java.lang.Object"], "com.example.graph.Vertex"))
            .with_method(RawMethod::new("vertices", &[], "[Lcom.example.graph.Vertex;"))
            .with_method(RawMethod::new("matrix", &[], "[[J"))
            .with_method(RawMethod::new("size", &[], "long")),
    ]
}

pub fn jdk_bridge() -> MemoryBridge {
    MemoryBridge::new()
        .with_class(object_class())
        .with_class(iterator_interface())
        .with_class(consumer_interface())
        .with_class(function_interface())
        .with_class(class_class())
}

pub fn graph_bridge() -> MemoryBridge {
    let mut bridge = jdk_bridge();
    for class in graph_classes() {
        bridge.insert(class);
    }
    bridge
}

/// `java.lang.Object` and `java.util.Iterator` by name, plus `java.util.function`.
pub fn jdk_whitelist() -> Whitelist {
    Whitelist::new(vec![
        WhitelistEntry::class("java.lang.Object").unwrap(),
        WhitelistEntry::class("java.util.Iterator").unwrap(),
        WhitelistEntry::package("java.util.function").unwrap(),
    ])
}

pub fn graph_whitelist() -> Whitelist {
    Whitelist::new(vec![
        WhitelistEntry::class("java.lang.Object").unwrap(),
        WhitelistEntry::class("java.util.Iterator").unwrap(),
        WhitelistEntry::package("java.util.function").unwrap(),
        WhitelistEntry::package("com.example.graph").unwrap(),
    ])
}
