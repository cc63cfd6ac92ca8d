use super::Expand;
use crate::schema::{DefaultAttr, Field};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// The `Schema::builder(..)...build()` expression for the model.
    pub(super) fn expand_model_schema(&self) -> TokenStream {
        let tablet = &self.tablet;
        let name = &self.model.name;

        let table = self.model.table.as_ref().map(|table| quote!(.table(#table)));

        let fields = self.model.fields.iter().enumerate().map(|(index, field)| {
            let field_name = &field.name;
            let descriptor = self.expand_field_descriptor(field, index == self.model.primary_key);
            quote!(.field(#field_name, #descriptor))
        });

        quote! {
            #tablet::Schema::builder(#name)
                #table
                #( #fields )*
                .build()
        }
    }

    fn expand_field_descriptor(&self, field: &Field, primary_key: bool) -> TokenStream {
        let tablet = &self.tablet;
        let ty = &field.ty;

        let mut descriptor = if field.attrs.column.text {
            quote!(#tablet::Field::text())
        } else {
            quote!(<#ty as #tablet::Primitive>::field())
        };

        if let Some(column_type) = &field.attrs.column.ty {
            descriptor = quote!(#descriptor.column_type(#column_type));
        }

        if primary_key {
            descriptor = quote!(#descriptor.primary_key(true));
        }

        match &field.attrs.default {
            Some(DefaultAttr::Expr(expr)) => {
                descriptor = quote!(#descriptor.default(#expr));
            }
            Some(DefaultAttr::With(path)) => {
                descriptor = quote!(#descriptor.default_with(|| #tablet::Value::from(#path())));
            }
            None => {}
        }

        descriptor
    }
}
