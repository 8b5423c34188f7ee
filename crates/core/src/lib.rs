//! Maps a Java class library's type surface onto TypeScript spellings.
//!
//! Starting from seed classes, [`resolver::ClosureResolver`] walks every
//! whitelisted class reachable through supertypes and member signatures,
//! fetching metadata from a [`bridge::ReflectionBridge`] and recording one
//! [`model::ClassEntry`] per class.

pub mod bridge;
pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod overload;
pub mod resolver;
pub mod types;
pub mod whitelist;

pub use bridge::{BridgeError, MemoryBridge, ReflectionBridge};
pub use config::Options;
pub use error::{ErrorKind, JavaMapError, Result};
pub use model::{ClassEntry, ClassMap, ClassName, MethodEntry, VariantGroup};
pub use resolver::{ClosureResolver, ResolverState, resolve_class_map};
pub use types::{ParamContext, TsType, TypeTranslator};
pub use whitelist::{Whitelist, WhitelistEntry};
