use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// Inherent methods forwarding to the generic `Db` operations.
    pub(super) fn expand_crud_methods(&self) -> TokenStream {
        let tablet = &self.tablet;
        let model_ident = &self.model.ident;

        quote! {
            impl #model_ident {
                /// Load the instance with the given primary key.
                pub async fn find(
                    db: &#tablet::Db,
                    pk: impl ::core::convert::Into<#tablet::Value>,
                ) -> #tablet::Result<#tablet::Option<Self>> {
                    db.find::<Self>(pk).await
                }

                /// Load every instance matching `query`.
                pub async fn find_all(
                    db: &#tablet::Db,
                    query: #tablet::FindAll,
                ) -> #tablet::Result<::std::vec::Vec<Self>> {
                    db.find_all::<Self>(query).await
                }

                /// Evaluate `select_field` over the table, e.g. `count(id)`.
                pub async fn find_number(
                    db: &#tablet::Db,
                    select_field: &str,
                    filter: #tablet::Option<&str>,
                    args: ::std::vec::Vec<#tablet::Value>,
                ) -> #tablet::Result<#tablet::Option<#tablet::Value>> {
                    db.find_number::<Self>(select_field, filter, args).await
                }

                /// Insert the instance.
                pub async fn save(&mut self, db: &#tablet::Db) -> #tablet::Result<()> {
                    db.save(self).await
                }

                /// Update the row with the instance's primary key.
                pub async fn update(&mut self, db: &#tablet::Db) -> #tablet::Result<()> {
                    db.update(self).await
                }

                /// Delete the row with the instance's primary key.
                pub async fn remove(&mut self, db: &#tablet::Db) -> #tablet::Result<()> {
                    db.remove(self).await
                }
            }
        }
    }
}
