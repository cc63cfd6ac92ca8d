mod crud;
mod model;
mod schema;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for tablet types
    tablet: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_impls = self.expand_model_impls();
        let crud_methods = self.expand_crud_methods();

        wrap_in_const(quote! {
            #model_impls
            #crud_methods
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        tablet: quote!(_tablet::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use tablet as _tablet;
            #code
        };
    }
}
