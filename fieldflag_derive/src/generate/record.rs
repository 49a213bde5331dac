use crate::model::{DeriveRecord, DeriveValue};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveRecord> for TokenStream2 {
    fn from(value: DeriveRecord) -> Self {
        let DeriveRecord {
            struct_name,
            generics,
            program: DeriveValue { tokens: program },
            fields,
        } = value;
        let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

        let bind = if fields.is_empty() {
            quote! {
                fn bind<'__fieldflag>(&'__fieldflag mut self, _binder: &mut ::fieldflag::Binder<'__fieldflag>) {}
            }
        } else {
            let fields = fields.into_iter().map(TokenStream2::from);

            quote! {
                fn bind<'__fieldflag>(&'__fieldflag mut self, binder: &mut ::fieldflag::Binder<'__fieldflag>) {
                    #( #fields )*
                }
            }
        };

        quote! {
            impl #impl_generics ::fieldflag::prelude::FlagRecord for #struct_name #type_generics #where_clause {
                #bind
            }

            impl #impl_generics #struct_name #type_generics #where_clause {
                /// Parse the Cli arguments into a new default record.
                ///
                /// Exits the process after a help request, or any parse error.
                /// Requires the record to implement `Default`.
                #[allow(dead_code)]
                pub fn parse_flags() -> Self {
                    let mut target = <Self as ::core::default::Default>::default();
                    ::fieldflag::parse_env(#program, &mut target);
                    target
                }
            }
        }
    }
}
