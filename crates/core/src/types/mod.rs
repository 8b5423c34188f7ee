//! Foreign type descriptors and their translation into target spellings.

pub mod descriptor;
pub mod translate;

pub use descriptor::{JavaType, Primitive};
pub use translate::{ClassRef, ParamContext, TsType, TypeRegistry, TypeTranslator, boxed_primitive};
