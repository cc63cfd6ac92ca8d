use super::{Column, ErrorSet};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Declared name, used as the column name
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Field attributes
    pub(crate) attrs: FieldAttr,
}

#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    /// Set if the field is annotated with `#[key]`
    pub(crate) key: Option<syn::Attribute>,

    /// Column type overrides
    pub(crate) column: Column,

    pub(crate) default: Option<DefaultAttr>,
}

#[derive(Debug)]
pub(crate) enum DefaultAttr {
    /// `#[default(<expr>)]`
    Expr(syn::Expr),

    /// `#[default_with(<path>)]`, a function called for each new default
    With(syn::Path),
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr::default();
        let mut column = None;

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if attrs.key.is_some() {
                    errs.spanned(attr, "duplicate #[key] attribute");
                } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.spanned(attr, "expected `#[key]`");
                } else {
                    attrs.key = Some(attr.clone());
                }
            } else if attr.path().is_ident("column") {
                if column.is_some() {
                    errs.spanned(attr, "duplicate #[column] attribute");
                } else {
                    column = errs.ok(Column::from_ast(attr));
                }
            } else if attr.path().is_ident("default") {
                if attrs.default.is_some() {
                    errs.spanned(attr, "field has more than one default attribute");
                } else {
                    attrs.default = errs.ok(attr.parse_args()).map(DefaultAttr::Expr);
                }
            } else if attr.path().is_ident("default_with") {
                if attrs.default.is_some() {
                    errs.spanned(attr, "field has more than one default attribute");
                } else {
                    attrs.default = errs.ok(attr.parse_args()).map(DefaultAttr::With);
                }
            }
        }

        errs.finish()?;

        if let Some(column) = column {
            attrs.column = column;
        }

        Ok(Self {
            ident: ident.clone(),
            name: ident.unraw().to_string(),
            ty: field.ty.clone(),
            attrs,
        })
    }
}
