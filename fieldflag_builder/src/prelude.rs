//! Traits which, typically, may be imported without concern: `use fieldflag::prelude::*`.

use crate::api::Binder;

/// Behaviour for a custom field type to be set from, and rendered to, its textual form.
///
/// Implement this for any field type that is not one of the primitive kinds.
/// The rendered text should parse back into the same value via `set_text`.
/// Binding also requires `Default`: a declared default is checked on a fresh value at setup.
// Needs to be imported in order to implement a custom value.
pub trait FlagValue {
    /// Set this value from the Cli (or environment, or declared default) text.
    fn set_text(&mut self, text: &str) -> Result<(), String>;

    /// Render this value in the same textual form accepted by `set_text`.
    fn to_text(&self) -> String;

    /// The type label shown in the help message.
    fn type_label(&self) -> &'static str {
        "value"
    }

    /// Whether the flag may be specified by bare presence (`-name`), which sets it from `"true"`.
    fn is_bool_flag(&self) -> bool {
        false
    }
}

/// Behaviour for a record to register its fields against a [`Binder`].
///
/// Usually generated via `#[derive(FlagRecord)]`.
// Needs to be imported in order to implement the registration by hand.
pub trait FlagRecord {
    /// Register each field, in declaration order.
    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>);
}

impl FlagRecord for () {
    fn bind<'a>(&'a mut self, _binder: &mut Binder<'a>) {
        // Nothing to bind.
    }
}
