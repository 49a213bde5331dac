mod cell;
mod command;
mod core;
mod environment;
mod field;

pub use self::core::*;
pub use cell::{Cell, IntoCell, InvalidValue};
pub use command::*;
pub use environment::*;
pub use field::*;

pub(crate) use cell::{ScalarCell, Slot};

#[cfg(test)]
pub(crate) use cell::test;
