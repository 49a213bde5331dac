use std::collections::HashMap;

/// Behaviour to look up environment variables.
///
/// The parser reads initial field values through this, so tests may substitute a fixed environment.
pub trait Environment {
    /// The value of the variable `name`, if it is set.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The environment of the running process ([`std::env::var`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        // Non-unicode values are treated as unset.
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Environment for HashMap<&str, &str> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.to_string())
    }
}
