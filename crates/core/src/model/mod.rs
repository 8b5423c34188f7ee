pub mod class;
pub mod map;
pub mod method;
pub mod name;
pub mod variant;

pub use class::{ClassEntry, FieldEntry};
pub use map::ClassMap;
pub use method::MethodEntry;
pub use name::ClassName;
pub use variant::VariantGroup;
