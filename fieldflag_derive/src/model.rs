use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The raw `#[flag(..)]` contents: bare keys, and `key = value` pairs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

/// A record field, with its metadata in textual form.
#[derive(Debug, PartialEq, Eq)]
pub struct DeriveField {
    pub field_name: syn::Ident,
    pub ident: String,
    pub name: Option<String>,
    pub usage: Option<String>,
    pub env: Option<String>,
    pub default: Option<String>,
    pub short: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveRecord {
    pub struct_name: syn::Ident,
    pub generics: syn::Generics,
    pub program: DeriveValue,
    /// The bound fields, in declaration order (skipped fields excluded).
    pub fields: Vec<DeriveField>,
}
