// refract-derive: descriptor tables for Refract records
//
// Provides one derive macro:
// - #[derive(Reflect)] - Implements `Reflect` and `Described` for a type
//
// Example:
// ```
// use refract_engine::Reflect;
//
// #[derive(Reflect)]
// #[refract(name = "Employee")]
// struct EmployeeRow {
//     #[refract(rename = "ID")]
//     id: i64,
//     name: String,
// }
// ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod classify;
mod reflect;

/// Derives `refract_engine::Reflect` and `refract_engine::Described`.
///
/// The generated shape table is built once, on first use, and lists the
/// fields in declaration order with their kinds:
/// - integer primitives (except `u128`) → `Integer`
/// - `String`, `Box<str>`, `Cow<str>` → `Text`
/// - `bool` → `Boolean`
/// - anything else → `Unsupported` (readable as a tag, never writable)
///
/// Tuple structs, unit structs and enums still derive, but resolve to an
/// unsupported shape at run time.
///
/// # Attributes
///
/// - `#[refract(name = "...")]` on the type overrides the shape name
/// - `#[refract(rename = "...")]` on a field overrides the field name
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect)]
/// struct Person {
///     name: String,
///     age: i32,
/// }
///
/// assert_eq!(render(&person)?, r#"insert into Person values("Samantha", 29)"#);
/// ```
#[proc_macro_derive(Reflect, attributes(refract))]
pub fn derive_reflect(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    reflect::expand_reflect(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
