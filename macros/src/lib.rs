use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Extracts `T` from a field type spelled `ComponentMap<T>` (optionally with a path prefix).
fn component_type(field_ty: &syn::Type) -> &syn::Type {
    let segment = match field_ty {
        syn::Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    };

    let args = match segment {
        Some(segment) if segment.ident == "ComponentMap" => &segment.arguments,
        _ => panic!("Component set fields must be of type `ComponentMap<T>`!"),
    };

    match args {
        syn::PathArguments::AngleBracketed(args) if args.args.len() == 1 => {
            match args.args.first() {
                Some(syn::GenericArgument::Type(ty)) => ty,
                _ => panic!("`ComponentMap` expects a component type!"),
            }
        }
        _ => panic!("`ComponentMap` expects a single component type!"),
    }
}

#[proc_macro_derive(ComponentSet)]
pub fn derive_component_set_fn(input: TokenStream) -> TokenStream {
    let main_crate = quote!(::bitset_ecs);

    let DeriveInput {
        ident,
        data,
        generics,
        ..
    } = parse_macro_input!(input as DeriveInput);

    if !generics.params.is_empty() {
        panic!("Component sets can't be generic!");
    }

    let fields = if let syn::Data::Struct(data) = data {
        data.fields
    } else {
        panic!("Not a structure!");
    };

    let accessors: Vec<_> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(field_ident) => quote!(#field_ident),
            None => {
                let i = syn::Index::from(i);
                quote!(#i)
            }
        })
        .collect();

    let comp_types: Vec<_> = fields.iter().map(|field| component_type(&field.ty)).collect();

    let names: Vec<_> = comp_types
        .iter()
        .map(|ty| quote!(#ty).to_string().replace(' ', ""))
        .collect();

    let n_components = comp_types.len();

    let member_impls = comp_types
        .iter()
        .zip(&accessors)
        .enumerate()
        .map(|(index, (comp_ty, accessor))| {
            quote! {
                impl #main_crate::Member<#ident> for #comp_ty {
                    const INDEX: usize = #index;

                    fn storage(set: &#ident) -> &#main_crate::ComponentMap<Self> {
                        &set.#accessor
                    }

                    fn storage_mut(set: &mut #ident) -> &mut #main_crate::ComponentMap<Self> {
                        &mut set.#accessor
                    }
                }

                impl #main_crate::ComponentQuery<#ident> for #comp_ty {
                    fn signature() -> #main_crate::Signature<#ident> {
                        #main_crate::Signature::of::<#comp_ty>()
                    }
                }
            }
        });

    let mut impls = proc_macro2::TokenStream::new();
    impls.extend(member_impls);

    quote! {
        impl #main_crate::ComponentSet for #ident {
            const COUNT: usize = #n_components;
            const NAMES: &'static [&'static str] = &[#(#names),*];

            #[allow(unused_variables)]
            fn purge(&mut self, entity: #main_crate::Entity) {
                #(self.#accessors.remove(&entity);)*
            }
        }

        const _: () = assert!(
            #n_components <= #main_crate::MAX_COMPONENTS,
            "Too many component types in a single component set!"
        );

        #impls
    }
    .into()
}
