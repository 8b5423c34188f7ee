//! Class-file backed metadata for the javamap resolver.
//!
//! [`ClassFileBridge`] answers [`javamap_core::ReflectionBridge`] requests by
//! reading compiled classes straight from a class path, so no JVM needs to
//! run.

pub mod bridge;
pub mod classpath;
pub mod convert;
pub mod jdk;

pub use bridge::ClassFileBridge;
pub use classpath::{ClassPath, ClassPathError};
pub use jdk::JdkDiscoverer;
