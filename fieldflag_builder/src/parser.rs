mod base;
pub(crate) mod flagset;
mod interface;
pub(crate) mod matcher;
mod middleware;
pub(crate) mod printer;
pub(crate) mod reflector;
pub(crate) mod resolver;

pub use self::base::{ConfigError, ParseError};
pub use self::interface::{ConsoleInterface, UserInterface};
pub use self::middleware::{exit_code, parse_env};
pub use self::printer::Usage;

pub(crate) use self::base::fatal;

#[cfg(any(test, feature = "unit_test"))]
pub use self::interface::util::InMemoryInterface;
