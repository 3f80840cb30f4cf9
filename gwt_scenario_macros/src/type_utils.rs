//! Shallow inspection of parameter types.

use syn::{GenericArgument, PathArguments, Type};

/// Returns `T` when `ty` is `Option<T>`.
///
/// Only the last path segment is compared, so `std::option::Option<T>` and
/// `core::option::Option<T>` match as well. The check is not recursive:
/// `Option<Option<T>>` yields `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &last.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
