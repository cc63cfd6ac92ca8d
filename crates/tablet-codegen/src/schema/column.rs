/// Contents of a `#[column(...)]` attribute.
#[derive(Debug, Default)]
pub(crate) struct Column {
    /// `type = "..."`: SQL column type used when creating the table
    pub(crate) ty: Option<syn::LitStr>,

    /// `text`: store the field as a text column
    pub(crate) text: bool,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        attr.parse_args()
    }
}

mod kw {
    syn::custom_keyword!(text);
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut result = Self::default();

        // Allowed syntax:
        //
        // #[column(type = "type")]
        // #[column(text)]
        // #[column(text, type = "type")]
        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(kw::text) {
                if result.text {
                    return Err(syn::Error::new(input.span(), "duplicate `text`"));
                }
                let _text: kw::text = input.parse()?;
                result.text = true;
            } else if lookahead.peek(syn::Token![type]) {
                if result.ty.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column type"));
                }
                let _type_token: syn::Token![type] = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;
                result.ty = Some(input.parse()?);
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        Ok(result)
    }
}
