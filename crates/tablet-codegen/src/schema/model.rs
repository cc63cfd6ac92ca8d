use super::{ErrorSet, Field, ModelAttr};

#[derive(Debug)]
pub(crate) struct Model {
    /// Model name
    pub(crate) name: String,

    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Model fields
    pub(crate) fields: Vec<Field>,

    /// Index of the `#[key]` field in `fields`
    pub(crate) primary_key: usize,

    /// Optional table to map the model to
    pub(crate) table: Option<syn::LitStr>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut model_attr = ModelAttr::default();
        let mut fields = vec![];
        let mut primary_key = None;
        let mut errs = ErrorSet::new();

        errs.ok(model_attr.populate_from_ast(&ast.attrs));

        for node in node.named.iter() {
            let Some(field) = errs.ok(Field::from_ast(node)) else {
                continue;
            };

            if let Some(key) = &field.attrs.key {
                if field.attrs.column.text {
                    errs.spanned(key, "a text column cannot be the primary key");
                } else if primary_key.is_some() {
                    errs.spanned(key, "model has more than one #[key] field");
                } else {
                    primary_key = Some(fields.len());
                }
            }

            fields.push(field);
        }

        errs.finish()?;

        let Some(primary_key) = primary_key else {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "model must have a #[key] field",
            ));
        };

        Ok(Self {
            name: ast.ident.to_string(),
            ident: ast.ident.clone(),
            fields,
            primary_key,
            table: model_attr.table,
        })
    }
}
