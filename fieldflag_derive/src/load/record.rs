use crate::load::{check_forms, check_keys, single_value, string_value};
use crate::model::{DeriveField, DeriveRecord, DeriveValue, IntermediateAttributes};
use quote::quote;

impl TryFrom<syn::DeriveInput> for DeriveRecord {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident("flag") {
                attributes.merge(attribute)?;
            }
        }

        check_keys("record", &attributes, &["program"], &value.ident)?;
        check_forms(&attributes, &[], &["program"], &value.ident)?;

        let program = match single_value("record", &attributes, "program", &value.ident)? {
            Some(program) => {
                let program = string_value("program", program)?;
                quote! { #program }
            }
            None => quote! { env!("CARGO_CRATE_NAME") },
        };

        let fields = match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => fields
                .named
                .iter()
                .map(DeriveField::load)
                .filter_map(Result::transpose)
                .collect::<Result<Vec<_>, _>>()?,
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Unit,
                ..
            }) => Vec::default(),
            _ => {
                return Err(syn::Error::new(
                    value.ident.span(),
                    "Invalid - FlagRecord is only supported on structs with named fields.",
                ));
            }
        };

        Ok(DeriveRecord {
            struct_name: value.ident,
            generics: value.generics,
            program: DeriveValue { tokens: program },
            fields,
        })
    }
}
