// #[derive(Reflect)] implementation
//
// Generates a cached shape table plus positional field accessors.

use std::collections::HashSet;

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Result};

use crate::classify::{classify, type_name, Kind};

/// Expands #[derive(Reflect)].
///
/// Example expansion:
/// ```ignore
/// // Input:
/// #[derive(Reflect)]
/// struct Person {
///     name: String,
///     age: i32,
/// }
///
/// // Output (abridged):
/// impl Described for Person {
///     fn describe() -> &'static Shape {
///         static SHAPE: Lazy<Shape> = Lazy::new(|| {
///             Shape::builder("Person", concat!(module_path!(), "::", "Person"))
///                 .field("name", FieldKind::Text, "String")
///                 .field("age", FieldKind::Integer, "i32")
///                 .build()
///         });
///         &SHAPE
///     }
/// }
///
/// impl Reflect for Person {
///     fn field(&self, position: usize) -> Option<FieldValue> {
///         match position {
///             0 => Some(FieldValue::Text(String::from(&*self.name))),
///             1 => Some(FieldValue::Integer(self.age as i128)),
///             _ => None,
///         }
///     }
///     // shape(), set_field() ...
/// }
/// ```
pub fn expand_reflect(input: DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;
    let shape_name = match container_name(&input.attrs)? {
        Some(name) => name,
        None => LitStr::new(&ident.unraw().to_string(), ident.span()),
    };
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let layout = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => {
                let fields = named
                    .named
                    .iter()
                    .map(FieldSpec::from_field)
                    .collect::<Result<Vec<_>>>()?;
                check_unique_names(&fields)?;
                Layout::Named(fields)
            }
            Fields::Unnamed(_) => Layout::Opaque(quote!(Tuple)),
            Fields::Unit => Layout::Opaque(quote!(Unit)),
        },
        Data::Enum(_) => Layout::Opaque(quote!(Enum)),
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "#[derive(Reflect)] does not support unions",
            ));
        }
    };

    let type_path = quote! { ::core::concat!(::core::module_path!(), "::", #shape_name) };

    let (build_shape, get_arms, set_arms) = match &layout {
        Layout::Named(fields) => {
            let builder_calls = fields.iter().map(FieldSpec::builder_call);
            let get_arms = fields.iter().enumerate().map(|(i, f)| f.get_arm(i));
            let set_arms = fields.iter().enumerate().filter_map(|(i, f)| f.set_arm(i));
            (
                quote! {
                    ::refract_engine::Shape::builder(#shape_name, #type_path)
                        #(#builder_calls)*
                        .build()
                },
                quote! { #(#get_arms)* },
                quote! { #(#set_arms)* },
            )
        }
        Layout::Opaque(kind) => (
            quote! {
                ::refract_engine::Shape::opaque(
                    #shape_name,
                    #type_path,
                    ::refract_engine::ShapeKind::#kind,
                )
            },
            quote! {},
            quote! {},
        ),
    };

    let expanded = quote! {
        impl #impl_generics ::refract_engine::Described for #ident #ty_generics #where_clause {
            fn describe() -> &'static ::refract_engine::Shape {
                static SHAPE: ::refract_engine::__private::Lazy<::refract_engine::Shape> =
                    ::refract_engine::__private::Lazy::new(|| #build_shape);
                &SHAPE
            }
        }

        impl #impl_generics ::refract_engine::Reflect for #ident #ty_generics #where_clause {
            fn shape(&self) -> &::refract_engine::Shape {
                <Self as ::refract_engine::Described>::describe()
            }

            #[allow(unused_variables)]
            fn field(&self, position: usize) -> ::core::option::Option<::refract_engine::FieldValue> {
                match position {
                    #get_arms
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables, unreachable_patterns)]
            fn set_field(
                &mut self,
                position: usize,
                value: ::refract_engine::FieldValue,
            ) -> ::core::result::Result<(), ::refract_engine::AccessError> {
                let shape = <Self as ::refract_engine::Described>::describe();
                match (position, value) {
                    #set_arms
                    (position, value) => ::core::result::Result::Err(
                        ::refract_engine::AccessError::rejected(shape, position, value.kind()),
                    ),
                }
            }
        }
    };

    Ok(expanded)
}

enum Layout {
    Named(Vec<FieldSpec>),
    Opaque(TokenStream),
}

struct FieldSpec {
    member: syn::Ident,
    name: LitStr,
    kind: Kind,
    type_name: LitStr,
}

impl FieldSpec {
    fn from_field(field: &syn::Field) -> Result<Self> {
        let Some(member) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let name = match field_rename(&field.attrs)? {
            Some(name) => name,
            None => LitStr::new(&member.unraw().to_string(), member.span()),
        };
        Ok(Self {
            kind: classify(&field.ty),
            type_name: LitStr::new(&type_name(&field.ty), member.span()),
            member,
            name,
        })
    }

    fn kind_tokens(&self) -> TokenStream {
        match self.kind {
            Kind::Integer => quote!(::refract_engine::FieldKind::Integer),
            Kind::Text => quote!(::refract_engine::FieldKind::Text),
            Kind::Boolean => quote!(::refract_engine::FieldKind::Boolean),
            Kind::Unsupported => quote!(::refract_engine::FieldKind::Unsupported),
        }
    }

    fn builder_call(&self) -> TokenStream {
        let name = &self.name;
        let kind = self.kind_tokens();
        let type_name = &self.type_name;
        quote! { .field(#name, #kind, #type_name) }
    }

    fn get_arm(&self, position: usize) -> TokenStream {
        let position = Literal::usize_unsuffixed(position);
        let member = &self.member;
        let value = match self.kind {
            Kind::Integer => quote! {
                ::refract_engine::FieldValue::Integer(self.#member as i128)
            },
            Kind::Text => quote! {
                ::refract_engine::FieldValue::Text(::std::string::String::from(&*self.#member))
            },
            Kind::Boolean => quote! {
                ::refract_engine::FieldValue::Boolean(self.#member)
            },
            Kind::Unsupported => {
                let type_name = &self.type_name;
                quote! {
                    ::refract_engine::FieldValue::Unsupported {
                        type_name: ::std::string::String::from(#type_name),
                    }
                }
            }
        };
        quote! { #position => ::core::option::Option::Some(#value), }
    }

    fn set_arm(&self, position: usize) -> Option<TokenStream> {
        let index = Literal::usize_unsuffixed(position);
        let member = &self.member;
        let arm = match self.kind {
            Kind::Integer => quote! {
                (#index, ::refract_engine::FieldValue::Integer(v)) => {
                    self.#member = ::refract_engine::__private::integer(shape, #index, v)?;
                    ::core::result::Result::Ok(())
                }
            },
            Kind::Text => quote! {
                (#index, ::refract_engine::FieldValue::Text(v)) => {
                    self.#member = ::core::convert::From::from(v);
                    ::core::result::Result::Ok(())
                }
            },
            Kind::Boolean => quote! {
                (#index, ::refract_engine::FieldValue::Boolean(v)) => {
                    self.#member = v;
                    ::core::result::Result::Ok(())
                }
            },
            Kind::Unsupported => return None,
        };
        Some(arm)
    }
}

/// Field names after renaming must not collide
fn check_unique_names(fields: &[FieldSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for field in fields {
        let name = field.name.value();
        if !seen.insert(name.clone()) {
            return Err(syn::Error::new(
                field.name.span(),
                format!("duplicate field name `{}`", name),
            ));
        }
    }
    Ok(())
}

/// `#[refract(name = "...")]` on the type
fn container_name(attrs: &[Attribute]) -> Result<Option<LitStr>> {
    refract_attr(attrs, "name")
}

/// `#[refract(rename = "...")]` on a field
fn field_rename(attrs: &[Attribute]) -> Result<Option<LitStr>> {
    refract_attr(attrs, "rename")
}

fn refract_attr(attrs: &[Attribute], key: &str) -> Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("refract")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                found = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error(format!("unsupported refract attribute, expected `{}`", key)))
            }
        })?;
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_expands_named_struct() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                name: String,
                #[refract(rename = "years")]
                age: i32,
            }
        };
        let tokens = expand_reflect(input).unwrap().to_string();
        assert!(tokens.contains("\"years\""));
        assert!(tokens.contains("FieldKind :: Integer"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                #[refract(rename = "name")]
                full_name: String,
                name: String,
            }
        };
        let err = expand_reflect(input).unwrap_err();
        assert!(err.to_string().contains("duplicate field name `name`"));
    }

    #[test]
    fn test_rejects_unions() {
        let input: DeriveInput = parse_quote! {
            union Bits {
                a: u32,
                b: f32,
            }
        };
        assert!(expand_reflect(input).is_err());
    }

    #[test]
    fn test_rejects_unknown_attribute() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                #[refract(skip)]
                name: String,
            }
        };
        assert!(expand_reflect(input).is_err());
    }
}
