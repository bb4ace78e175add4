use proc_macro2::{Span, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident};

/// Finds the path to `hexplan_lib` from the crate that invoked the derive.
fn library_path() -> TokenStream {
    match crate_name("hexplan_lib") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::hexplan_lib),
    }
}

pub(crate) fn iterable_enum_inner(ast: &DeriveInput) -> TokenStream {
    let enum_name = &ast.ident;
    let (impl_generics, type_generics, where_clause) = ast.generics.split_for_impl();

    let variants = match &ast.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return syn::Error::new_spanned(enum_name, "IterableEnum can only be derived for enums")
                .to_compile_error()
        }
    };

    let mut get_at_arms = Vec::with_capacity(variants.len());
    let mut index_arms = Vec::with_capacity(variants.len());

    for (index, variant) in variants.iter().enumerate() {
        let variant_name = &variant.ident;

        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant_name,
                "IterableEnum variants must not carry data",
            )
            .to_compile_error();
        }

        get_at_arms.push(quote!(#index => Some(#enum_name::#variant_name),));
        index_arms.push(quote!(#enum_name::#variant_name => #index,));
    }

    let n_variants = variants.len();
    let library = library_path();

    quote! {
        impl #impl_generics #library::enum_iter::IterableEnum for #enum_name #type_generics #where_clause {
            const N_VARIANTS: usize = #n_variants;

            fn get_at(index: usize) -> Option<Self> {
                match index {
                    #(#get_at_arms)*
                    _ => None,
                }
            }

            fn index(&self) -> usize {
                match self {
                    #(#index_arms)*
                }
            }
        }
    }
}
