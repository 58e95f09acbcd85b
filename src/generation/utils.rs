//! Naming rules for generated identifiers
//!
//! All functions are pure and deterministic so that regenerating the same document
//! yields byte-identical output.

use crate::generation::HttpMethod;

/// Derives a method name from the HTTP method and path template.
///
/// The method is lower-cased and joined with every path segment that is neither empty
/// nor a `{placeholder}`, separated by `_`.
///
/// # Examples
/// ```
/// use swaggen::generation::{HttpMethod, utils::derive_operation_name};
///
/// assert_eq!(derive_operation_name(HttpMethod::Get, "/pets/{id}/photos"), "get_pets_photos");
/// ```
pub fn derive_operation_name(method: HttpMethod, path: &str) -> String {
    std::iter::once(method.as_str().to_lowercase())
        .chain(
            path.split('/')
                .filter(|segment| !segment.is_empty() && !segment.starts_with('{'))
                .map(str::to_string),
        )
        .collect::<Vec<_>>()
        .join("_")
}

/// Argument name for a parameter: `-` and spaces stripped
pub fn binding_name(name: &str) -> String {
    name.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// Identifier-safe type name for a definition key.
///
/// Alphanumerics and `_` are kept, everything else becomes `_`, and a leading digit
/// gets a `_` prefix.
pub fn type_name_for_definition(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Namespace for an API identifier such as `googleapis.com:admin`
pub fn namespace_for_api(api: &str) -> String {
    type_name_for_definition(api)
}

/// Strip one leading and one trailing `/`
pub fn trim_slash(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}

/// Converts a string to snake_case format for Rust identifiers.
///
/// # Examples
/// ```
/// use swaggen::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            // Underscore before an uppercase letter that follows a lowercase one
            if i > 0 && prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase();
        } else if ch == '-' || ch == '_' || ch == ' ' || ch == '.' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to UpperCamelCase for Rust type names.
///
/// # Examples
/// ```
/// use swaggen::generation::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
/// assert_eq!(to_proper_case("http_response"), "HttpResponse");
/// ```
pub fn to_proper_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Whether `s` is a strict or reserved Rust keyword
pub fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break" | "const" | "continue" | "crate" | "else" | "enum" | "extern" | "false"
            | "fn" | "for" | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move"
            | "mut" | "pub" | "ref" | "return" | "self" | "Self" | "static" | "struct" | "super"
            | "trait" | "true" | "type" | "unsafe" | "use" | "where" | "while" | "async"
            | "await" | "dyn" | "abstract" | "become" | "box" | "do" | "final" | "gen"
            | "macro" | "override" | "priv" | "typeof" | "unsized" | "virtual" | "yield" | "try"
    )
}

/// Sanitizes a string to be a valid Rust field name.
///
/// Reserved keywords get a trailing underscore; names starting with a digit get a
/// leading one. A name with no usable characters becomes `value`.
pub fn sanitize_rust_field_name(s: &str) -> String {
    let snake_case = to_snake_case(s);

    match snake_case.as_str() {
        "" => "value".to_string(),
        s if is_rust_keyword(s) => format!("{s}_"),
        s if s.starts_with(|c: char| c.is_ascii_digit()) => format!("_{s}"),
        _ => snake_case,
    }
}

/// Sanitizes a definition-derived name for use as a Rust type name
pub fn sanitize_rust_type_name(s: &str) -> String {
    if is_rust_keyword(s) || s == "_" {
        format!("{s}_")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_operation_name() {
        assert_eq!(
            derive_operation_name(HttpMethod::Delete, "/users/{id}/sessions"),
            "delete_users_sessions"
        );
        assert_eq!(
            derive_operation_name(HttpMethod::Get, "/pets/{id}/photos"),
            "get_pets_photos"
        );
        assert_eq!(derive_operation_name(HttpMethod::Post, "/"), "post");
        assert_eq!(
            derive_operation_name(HttpMethod::Patch, "//a//{b}/c/"),
            "patch_a_c"
        );
    }

    #[test]
    fn test_binding_name() {
        assert_eq!(binding_name("X-Request-Id"), "XRequestId");
        assert_eq!(binding_name("page size"), "pagesize");
        assert_eq!(binding_name("limit"), "limit");
    }

    #[test]
    fn test_type_name_for_definition() {
        assert_eq!(type_name_for_definition("Pet"), "Pet");
        assert_eq!(type_name_for_definition("model.User"), "model_User");
        assert_eq!(type_name_for_definition("2fa"), "_2fa");
        assert_eq!(type_name_for_definition(""), "_");
    }

    #[test]
    fn test_namespace_for_api() {
        assert_eq!(
            namespace_for_api("googleapis.com:admin"),
            "googleapis_com_admin"
        );
    }

    #[test]
    fn test_trim_slash() {
        assert_eq!(trim_slash("/widgets"), "widgets");
        assert_eq!(trim_slash("/pets/{id}/"), "pets/{id}");
        assert_eq!(trim_slash("plain"), "plain");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("FindPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
        assert_eq!(to_snake_case("HTTPResponse"), "httpresponse");
        assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
    }

    #[test]
    fn test_to_proper_case() {
        assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
        assert_eq!(to_proper_case("findPetsByStatus"), "FindPetsByStatus");
        assert_eq!(to_proper_case("model.User"), "ModelUser");
    }

    #[test]
    fn test_sanitize_rust_field_name() {
        assert_eq!(sanitize_rust_field_name("type"), "type_");
        assert_eq!(sanitize_rust_field_name("self"), "self_");
        assert_eq!(sanitize_rust_field_name("firstName"), "first_name");
        assert_eq!(sanitize_rust_field_name("2fa"), "_2fa");
        assert_eq!(sanitize_rust_field_name("gen"), "gen_");
        assert_eq!(sanitize_rust_field_name("--"), "value");
    }

    #[test]
    fn test_sanitize_rust_type_name() {
        assert_eq!(sanitize_rust_type_name("Pet"), "Pet");
        assert_eq!(sanitize_rust_type_name("Self"), "Self_");
        assert_eq!(sanitize_rust_type_name("_"), "__");
    }
}
