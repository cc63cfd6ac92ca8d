mod find_all;
pub use find_all::FindAll;

mod primitive;
pub use primitive::Primitive;

pub use tablet_core::stmt::{Row, Value};
