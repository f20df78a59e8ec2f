// Field type classification
//
// Kinds are decided from the type as written. Aliases of primitive types
// are not seen through and classify as Unsupported.

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type};

/// Primitive kind of a field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Integer,
    Text,
    Boolean,
    Unsupported,
}

/// Classifies a field type.
pub fn classify(ty: &Type) -> Kind {
    match ty {
        Type::Group(group) => classify(&group.elem),
        Type::Paren(paren) => classify(&paren.elem),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let Some(segment) = type_path.path.segments.last() else {
                return Kind::Unsupported;
            };
            let bare = matches!(segment.arguments, PathArguments::None);
            match segment.ident.to_string().as_str() {
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32"
                | "u64" | "usize"
                    if bare =>
                {
                    Kind::Integer
                }
                "bool" if bare => Kind::Boolean,
                "String" if bare => Kind::Text,
                "Box" | "Cow" if wraps_str(&segment.arguments) => Kind::Text,
                _ => Kind::Unsupported,
            }
        }
        _ => Kind::Unsupported,
    }
}

/// `<str>` or `<'a, str>`
fn wraps_str(arguments: &PathArguments) -> bool {
    let PathArguments::AngleBracketed(args) = arguments else {
        return false;
    };
    let types: Vec<&Type> = args
        .args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect();
    matches!(types.as_slice(), [Type::Path(p)] if p.qself.is_none() && p.path.is_ident("str"))
}

/// Type as written, without token spacing (`Box<str>`, `Vec<u8>`).
pub fn type_name(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_integer_types() {
        let ty: Type = parse_quote!(u64);
        assert_eq!(classify(&ty), Kind::Integer);
        let ty: Type = parse_quote!(std::primitive::i32);
        assert_eq!(classify(&ty), Kind::Integer);
        let ty: Type = parse_quote!(u128);
        assert_eq!(classify(&ty), Kind::Unsupported);
    }

    #[test]
    fn test_text_types() {
        let ty: Type = parse_quote!(String);
        assert_eq!(classify(&ty), Kind::Text);
        let ty: Type = parse_quote!(Box<str>);
        assert_eq!(classify(&ty), Kind::Text);
        let ty: Type = parse_quote!(std::borrow::Cow<'static, str>);
        assert_eq!(classify(&ty), Kind::Text);
        let ty: Type = parse_quote!(&'static str);
        assert_eq!(classify(&ty), Kind::Unsupported);
        let ty: Type = parse_quote!(Box<String>);
        assert_eq!(classify(&ty), Kind::Unsupported);
    }

    #[test]
    fn test_other_types() {
        let ty: Type = parse_quote!(bool);
        assert_eq!(classify(&ty), Kind::Boolean);
        let others: [Type; 6] = [
            parse_quote!(f64),
            parse_quote!(Vec<u8>),
            parse_quote!(Option<i32>),
            parse_quote!(*const u8),
            parse_quote!(Address),
            parse_quote!((i32, i32)),
        ];
        for ty in &others {
            assert_eq!(classify(ty), Kind::Unsupported, "{}", type_name(ty));
        }
    }

    #[test]
    fn test_type_name() {
        let ty: Type = parse_quote!(Box<str>);
        assert_eq!(type_name(&ty), "Box<str>");
        let ty: Type = parse_quote!(Cow<'a, str>);
        assert_eq!(type_name(&ty), "Cow<'a,str>");
    }
}
