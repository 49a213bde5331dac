//! Builder module for `fieldflag`.
//! See [documentation root](https://docs.rs/fieldflag/latest/fieldflag/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{exit_code, parse_env, ConfigError, ConsoleInterface, ParseError, Usage, UserInterface};

#[cfg(any(test, feature = "unit_test"))]
pub use parser::InMemoryInterface;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
