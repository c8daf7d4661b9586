pub mod equal;
pub mod json;
pub mod object;
pub mod value;

pub use equal::deep_equal;
pub use object::{Object, Property};
pub use value::{ArrayRef, ContainerId, ObjectRef, Value};
