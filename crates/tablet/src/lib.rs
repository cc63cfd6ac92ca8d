pub mod db;
pub use db::Db;

mod model;
pub use model::Model;

mod policy;
pub use policy::DefaultPolicy;

mod record;
pub use record::Record;

pub mod stmt;
pub use stmt::FindAll;

pub use tablet_macros::Model;

pub use tablet_core::{
    bail, err,
    schema::{Field, Schema},
    Error, Result,
};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        stmt::{FindAll, Primitive},
        Db, Error, Model, Record, Result,
    };
    pub use std::{option::Option, sync::OnceLock};
    pub use tablet_core::{
        schema::{Field, Schema},
        stmt::Value,
    };
}
