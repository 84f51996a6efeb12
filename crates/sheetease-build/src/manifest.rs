use crate::RuntimePath;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use sheetease_schema::node::TableSchema;

// generate
// `TABLE_NAMES` and `load_all`, in discovery order
pub(crate) fn generate(tables: &[&TableSchema], rt: &RuntimePath) -> TokenStream {
    let names = tables.iter().map(|t| t.ident.as_str());
    let allow = tables
        .is_empty()
        .then(|| quote!(#[allow(unused_variables)]));
    let configs = tables.iter().map(|t| format_ident!("{}Config", t.ident));

    quote! {
        /// Every table exported in this run.
        pub const TABLE_NAMES: &[&str] = &[#(#names),*];

        /// Load every exported table into `ctx`.
        #allow
        pub fn load_all(
            ctx: &mut #rt::ConfigContext,
            source: &dyn #rt::DataSource,
        ) -> ::core::result::Result<(), #rt::LoadError> {
            #(ctx.load::<#configs>(source)?;)*
            Ok(())
        }
    }
}

///
/// TESTS
///
