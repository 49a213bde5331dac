use std::collections::HashMap;

use crate::api::{Environment, InvalidValue};
use crate::parser::base::{ConfigError, ParseError};
use crate::parser::reflector::FlagField;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A single `-name value` pairing found by the token matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) value: String,
}

/// The registered flags of one record: every alias maps onto its field's cell.
pub(crate) struct FlagSet<'a> {
    fields: Vec<FlagField<'a>>,
    lookup: HashMap<String, usize>,
}

impl<'a> std::fmt::Debug for FlagSet<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagSet")
            .field("lookup", &self.lookup)
            .finish()
    }
}

impl<'a> FlagSet<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default()).unwrap()
    }

    pub(crate) fn new(fields: Vec<FlagField<'a>>) -> Result<Self, ConfigError> {
        let mut lookup: HashMap<String, usize> = HashMap::default();

        for (index, field) in fields.iter().enumerate() {
            for name in &field.names {
                if let Some(previous) = lookup.insert(name.clone(), index) {
                    return Err(ConfigError::DuplicateFlag {
                        name: name.clone(),
                        first: fields[previous].spec.ident.clone(),
                        second: field.spec.ident.clone(),
                    });
                }
            }
        }

        Ok(Self { fields, lookup })
    }

    pub(crate) fn find(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub(crate) fn is_bool_flag(&self, index: usize) -> bool {
        self.fields[index].cell.is_bool_flag()
    }

    /// Populate each cell before parsing: the environment variable if set, otherwise the declared default.
    ///
    /// An environment value that fails to convert falls back to the declared default.
    pub(crate) fn apply_initial(&mut self, environment: &dyn Environment) -> Result<(), ConfigError> {
        for field in self.fields.iter_mut() {
            let mut applied = false;

            if let Some(variable) = &field.spec.env {
                if let Some(value) = environment.lookup(variable) {
                    match field.cell.set(&value) {
                        Ok(()) => {
                            #[cfg(feature = "tracing_debug")]
                            {
                                debug!("Field '{}' initialized from ${variable}.", field.spec.ident);
                            }

                            applied = true;
                        }
                        Err(_error) => {
                            #[cfg(feature = "tracing_debug")]
                            {
                                debug!("Ignoring ${variable} for field '{}': {_error}", field.spec.ident);
                            }
                        }
                    }
                }
            }

            if !applied {
                if let Some(default) = &field.spec.default {
                    field
                        .cell
                        .set(default)
                        .map_err(|source| ConfigError::InvalidDefault {
                            field: field.spec.ident.clone(),
                            source,
                        })?;

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Field '{}' initialized from its default.", field.spec.ident);
                    }
                }
            }
        }

        Ok(())
    }

    /// Write the matched values, in Cli order.
    ///
    /// Values written before a failure remain written.
    pub(crate) fn capture(&mut self, assignments: Vec<Assignment>) -> Result<(), ParseError> {
        for Assignment { index, name, value } in assignments {
            self.set(index, &value)
                .map_err(|source| ParseError::InvalidValue { flag: name, source })?;
        }

        Ok(())
    }

    fn set(&mut self, index: usize, text: &str) -> Result<(), InvalidValue> {
        self.fields[index].cell.set(text)
    }
}
