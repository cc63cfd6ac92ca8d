use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impls(&self) -> TokenStream {
        let tablet = &self.tablet;
        let model_ident = &self.model.ident;
        let model_schema = self.expand_model_schema();
        let load_body = self.expand_load_body();
        let record_body = self.expand_record_body();

        quote! {
            impl #tablet::Model for #model_ident {
                fn schema() -> #tablet::Result<&'static #tablet::Schema> {
                    static SCHEMA: #tablet::OnceLock<#tablet::Result<#tablet::Schema>> =
                        #tablet::OnceLock::new();

                    SCHEMA
                        .get_or_init(|| #model_schema)
                        .as_ref()
                        .map_err(::core::clone::Clone::clone)
                }

                fn load(mut record: #tablet::Record) -> #tablet::Result<Self> {
                    #load_body
                }

                fn record(&self) -> #tablet::Record {
                    #record_body
                }
            }
        }
    }

    fn expand_load_body(&self) -> TokenStream {
        let tablet = &self.tablet;

        let fields = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            let name = &field.name;
            let ty = &field.ty;

            quote! {
                #ident: <#ty as #tablet::Primitive>::load(
                    record.take(#name).unwrap_or_default(),
                )?,
            }
        });

        quote! {
            Ok(Self {
                #( #fields )*
            })
        }
    }

    fn expand_record_body(&self) -> TokenStream {
        let tablet = &self.tablet;
        let len = self.model.fields.len();

        let fields = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            let name = &field.name;

            quote! {
                if let #tablet::Option::Some(value) = #tablet::Primitive::to_value(&self.#ident) {
                    record.insert(#name, value);
                }
            }
        });

        quote! {
            let mut record = #tablet::Record::with_capacity(#len);
            #( #fields )*
            record
        }
    }
}
