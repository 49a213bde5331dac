use thiserror::Error;

use crate::model::ValueKind;
use crate::prelude::FlagValue;

/// A token which does not convert into the field's type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_label}: {reason}")]
pub struct InvalidValue {
    pub(crate) token: String,
    pub(crate) type_label: &'static str,
    pub(crate) reason: String,
}

impl InvalidValue {
    pub(crate) fn new(token: &str, type_label: &'static str, reason: impl Into<String>) -> Self {
        Self {
            token: token.to_string(),
            type_label,
            reason: reason.into(),
        }
    }
}

/// The primitive field types handled by the typed cell adapter.
pub(crate) trait Primitive: Sized {
    /// The kind reported for this type.
    const KIND: ValueKind;
    /// The type label shown in the help message.
    const LABEL: &'static str;

    /// Convert the text into a value.
    fn parse_text(text: &str) -> Result<Self, String>;

    /// Render the value back into text accepted by `parse_text`.
    fn render_text(&self) -> String;

    /// Whether this is the zero/empty value of the type.
    fn is_zero(&self) -> bool;
}

impl Primitive for bool {
    const KIND: ValueKind = ValueKind::Bool;
    const LABEL: &'static str = "bool";

    fn parse_text(text: &str) -> Result<Self, String> {
        match text {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err("invalid boolean syntax".to_string()),
        }
    }

    fn render_text(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl Primitive for String {
    const KIND: ValueKind = ValueKind::String;
    const LABEL: &'static str = "string";

    fn parse_text(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }

    fn render_text(&self) -> String {
        self.clone()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

// Splits `[+-][0x|0o|0b]digits` into the sign, radix and digits.
fn split_radix(text: &str) -> Result<(&'static str, u32, &str), String> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };

    let prefix = rest.get(..2).map(|p| p.to_ascii_lowercase());
    let (radix, digits) = match prefix.as_deref() {
        Some("0x") => (16, &rest[2..]),
        Some("0o") => (8, &rest[2..]),
        Some("0b") => (2, &rest[2..]),
        _ => (10, rest),
    };

    if digits.starts_with('-') || digits.starts_with('+') {
        return Err("invalid digit found in string".to_string());
    }

    Ok((sign, radix, digits))
}

macro_rules! integer {
    ($kind:expr, $($t:ty => $label:literal),+ $(,)?) => {
        $(
            impl Primitive for $t {
                const KIND: ValueKind = $kind;
                const LABEL: &'static str = $label;

                fn parse_text(text: &str) -> Result<Self, String> {
                    let (sign, radix, digits) = split_radix(text)?;
                    <$t>::from_str_radix(&format!("{sign}{digits}"), radix)
                        .map_err(|e| e.to_string())
                }

                fn render_text(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )+
    };
}

integer!(ValueKind::Int, i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64", isize => "isize");
integer!(ValueKind::Uint, u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64", usize => "usize");

macro_rules! float {
    ($($t:ty => $label:literal),+ $(,)?) => {
        $(
            impl Primitive for $t {
                const KIND: ValueKind = ValueKind::Float;
                const LABEL: &'static str = $label;

                fn parse_text(text: &str) -> Result<Self, String> {
                    text.parse::<$t>().map_err(|e| e.to_string())
                }

                fn render_text(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == 0.0
                }
            }
        )+
    };
}

float!(f32 => "f32", f64 => "f64");

/// Behaviour to set/render a single value, without regard to its type.
///
/// We need a (dyn .. [ignoring T] ..) here so that fields of varying types share one flag table.
pub(crate) trait ScalarCell {
    fn kind(&self) -> ValueKind;

    fn type_label(&self) -> &'static str;

    fn set(&mut self, text: &str) -> Result<(), InvalidValue>;

    /// Check the text converts, without setting it.
    fn check(&self, text: &str) -> Result<(), InvalidValue>;

    fn render(&self) -> String;

    fn is_zero(&self) -> bool;

    fn is_bool_flag(&self) -> bool;
}

pub(crate) struct Typed<'a, T> {
    variable: &'a mut T,
}

impl<'a, T: Primitive> ScalarCell for Typed<'a, T> {
    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn type_label(&self) -> &'static str {
        T::LABEL
    }

    fn set(&mut self, text: &str) -> Result<(), InvalidValue> {
        *self.variable =
            T::parse_text(text).map_err(|reason| InvalidValue::new(text, T::LABEL, reason))?;
        Ok(())
    }

    fn check(&self, text: &str) -> Result<(), InvalidValue> {
        T::parse_text(text)
            .map(|_| ())
            .map_err(|reason| InvalidValue::new(text, T::LABEL, reason))
    }

    fn render(&self) -> String {
        self.variable.render_text()
    }

    fn is_zero(&self) -> bool {
        self.variable.is_zero()
    }

    fn is_bool_flag(&self) -> bool {
        T::KIND == ValueKind::Bool
    }
}

pub(crate) struct Custom<'a, V> {
    variable: &'a mut V,
}

impl<'a, V: FlagValue + Default> ScalarCell for Custom<'a, V> {
    fn kind(&self) -> ValueKind {
        ValueKind::Custom
    }

    fn type_label(&self) -> &'static str {
        self.variable.type_label()
    }

    fn set(&mut self, text: &str) -> Result<(), InvalidValue> {
        let type_label = self.variable.type_label();
        self.variable
            .set_text(text)
            .map_err(|reason| InvalidValue::new(text, type_label, reason))
    }

    fn check(&self, text: &str) -> Result<(), InvalidValue> {
        let type_label = self.variable.type_label();
        V::default()
            .set_text(text)
            .map_err(|reason| InvalidValue::new(text, type_label, reason))
    }

    fn render(&self) -> String {
        self.variable.to_text()
    }

    fn is_zero(&self) -> bool {
        self.variable.to_text().is_empty()
    }

    fn is_bool_flag(&self) -> bool {
        self.variable.is_bool_flag()
    }
}

pub(crate) enum Slot<'a> {
    Scalar(Box<dyn ScalarCell + 'a>),
    Sequence(&'a mut Vec<String>),
}

impl<'a> std::fmt::Debug for Slot<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Scalar(scalar) => f.debug_tuple("Scalar").field(&scalar.kind()).finish(),
            Slot::Sequence(variable) => f.debug_tuple("Sequence").field(variable).finish(),
        }
    }
}

/// A binding onto caller owned storage.
///
/// Writing through the cell writes directly into the bound field.
pub struct Cell<'a> {
    slot: Slot<'a>,
}

impl<'a> Cell<'a> {
    pub(crate) fn kind(&self) -> ValueKind {
        match &self.slot {
            Slot::Scalar(scalar) => scalar.kind(),
            Slot::Sequence(_) => ValueKind::Strings,
        }
    }

    pub(crate) fn consume(self) -> Slot<'a> {
        self.slot
    }
}

impl<'a> std::fmt::Debug for Cell<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell").field("kind", &self.kind()).finish()
    }
}

/// Behaviour to turn a mutable field reference into a [`Cell`].
///
/// Implemented for the primitive kinds, `Vec<String>`, and every [`FlagValue`] which is also `Default`.
pub trait IntoCell<'a> {
    /// Produce the cell bound onto this location.
    fn into_cell(self) -> Cell<'a>;
}

macro_rules! typed_cell {
    ($($t:ty),+ $(,)?) => {
        $(
            impl<'a> IntoCell<'a> for &'a mut $t {
                fn into_cell(self) -> Cell<'a> {
                    Cell {
                        slot: Slot::Scalar(Box::new(Typed { variable: self })),
                    }
                }
            }
        )+
    };
}

typed_cell!(bool, String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<'a> IntoCell<'a> for &'a mut Vec<String> {
    fn into_cell(self) -> Cell<'a> {
        Cell {
            slot: Slot::Sequence(self),
        }
    }
}

impl<'a, V: FlagValue + Default> IntoCell<'a> for &'a mut V {
    fn into_cell(self) -> Cell<'a> {
        Cell {
            slot: Slot::Scalar(Box::new(Custom { variable: self })),
        }
    }
}
