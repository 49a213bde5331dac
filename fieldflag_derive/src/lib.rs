extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveRecord;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Derive `FlagRecord` for a struct with named fields, along with a `parse_flags()` constructor.
///
/// Configure the fields via `#[flag(..)]`: `name`, `usage`, `env`, `default`, `short`, `nonflag`, `skip`.
/// Configure the program name via `#[flag(program = "..")]` on the struct.
#[proc_macro_derive(FlagRecord, attributes(flag))]
pub fn flag_record(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveRecord::try_from(ast) {
        Ok(record) => TokenStream2::from(record).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
