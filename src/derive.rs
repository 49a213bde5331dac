//! Derive Api for `fieldflag` records.
//!
//! ### Getting Started
//! Derive [`FlagRecord`] on a struct with named fields.
//! This implements the record trait, and generates a function `S::parse_flags() -> S` which parses the Cli into a default `S`.
//!
//! ```no_run
//! use fieldflag::derive::*;
//!
//! #[derive(Debug, Default, FlagRecord)]
//! #[flag(program = "summer")]
//! struct Flags {
//!     #[flag(short, usage = "Print each item.")]
//!     verbose: bool,
//!     #[flag(nonflag = "ITEM", usage = "The items to sum.")]
//!     items: Vec<String>,
//! }
//!
//! let flags = Flags::parse_flags();
//! ```
//!
//! ### Record Configuration
//! `#[flag(program = "..")]` names the program in the help message.
//! The default is the crate name.
//!
//! ### Field Configuration
//! Each field takes `#[flag(..)]` with any of:
//! * `name = "a, b"`: the flag name(s), `"#nonflag[:LABEL]"` for a positional, or `"-"` to skip the field.
//! * `usage = ".."`: the help message text.
//! * `env = "VAR"`: the environment variable providing the initial value.
//! * `default = <literal>`: the initial value when `env` is not set.
//! Any string, integer, float or boolean literal.
//! * `short`: name the flag by the first letter of the identifier.
//! * `nonflag` or `nonflag = "LABEL"`: make this a positional field.
//! * `skip`: do not bind this field.
//!
//! Fields with a leading underscore (ex: `_cache`) are skipped unless explicitly named.
//! Skipped fields may be of any type.
//!
//! ### Commands
//! Derived records work with the builder Api: pass the global record to [`FlagParser::run_env`](../struct.FlagParser.html#method.run_env), and [parse](../struct.Invocation.html#method.parse) each command's record from its invocation.
//!
//! ```no_run
//! use fieldflag::derive::*;
//! use fieldflag::{Command, FlagParser};
//!
//! #[derive(Default, FlagRecord)]
//! struct Globals {
//!     #[flag(short)]
//!     verbose: bool,
//! }
//!
//! #[derive(Default, FlagRecord)]
//! struct Push {
//!     #[flag(default = "origin")]
//!     remote: String,
//! }
//!
//! let mut globals = Globals::default();
//! FlagParser::new("git")
//!     .command(Command::new("push", "Push the commits.").run_with_globals(
//!         |globals: &Globals, invocation| {
//!             let mut push = Push::default();
//!             invocation.parse(&mut push)?;
//!             println!("{} {}", globals.verbose, push.remote);
//!             Ok(())
//!         },
//!     ))
//!     .run_env(Some(&mut globals));
//! ```
pub use fieldflag_derive::*;
