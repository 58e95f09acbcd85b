//! Rust trait rendering of the abstract interface
//!
//! Named types become serde structs inside a module named after the interface; every
//! operation becomes a trait method returning a boxed future (single value) or a boxed
//! stream (zero or more values). Standard library paths are fully qualified so that
//! definitions such as `Result` or `String` cannot shadow them.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};

use super::artifact_path;
use crate::generation::sanitizers::{escape_string_literal, sanitize_doc};
use crate::generation::utils::{
    sanitize_rust_field_name, sanitize_rust_type_name, to_proper_case,
};
use crate::generation::{
    Artifact, BindingKind, CapabilityMethod, Documentation, GeneratedInterface, GenerationError,
    InterfacePrinter, MethodDescriptor, NamedType, QualifiedName, ResultWrapper, SchemeLocation,
    SecurityAnnotation, TargetType,
};

const STRING: &str = "::std::string::String";
const OPAQUE: &str = "::serde_json::Value";

/// Renders the interface as a Rust trait plus model structs
#[derive(Debug, Default, Clone, Copy)]
pub struct RustTraitPrinter;

impl RustTraitPrinter {
    pub fn new() -> Self {
        Self
    }
}

impl InterfacePrinter for RustTraitPrinter {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn print(&self, interface: &GeneratedInterface) -> Result<Artifact, GenerationError> {
        let mut content = String::new();
        Renderer::new(interface)
            .render(&mut content)
            .map_err(|e| GenerationError::PrintError(format!("Failed to render Rust source: {e}")))?;

        Ok(Artifact {
            path: artifact_path(interface, self.extension()),
            content,
        })
    }
}

/// Hands out identifiers, suffixing repeats with `_2`, `_3`, ...
#[derive(Default)]
struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    fn claim(&mut self, base: String) -> String {
        let mut name = base.clone();
        let mut suffix = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        name
    }
}

/// Where a type is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Trait signatures; named types are prefixed with the model module
    Trait,
    /// Struct fields inside the model module
    Model,
}

struct Renderer<'a> {
    interface: &'a GeneratedInterface,
    trait_name: String,
    module: String,
    /// Struct identifier of every named type
    type_names: HashMap<&'a QualifiedName, String>,
}

impl<'a> Renderer<'a> {
    fn new(interface: &'a GeneratedInterface) -> Self {
        let mut taken = UniqueNames::default();
        let type_names = interface
            .named_types
            .iter()
            .map(|named| {
                let ident = taken.claim(sanitize_rust_type_name(&named.name.name));
                (&named.name, ident)
            })
            .collect();

        Self {
            interface,
            trait_name: sanitize_rust_type_name(&to_proper_case(&interface.name.name)),
            module: sanitize_rust_field_name(&interface.name.name),
            type_names,
        }
    }

    fn type_name(&self, name: &QualifiedName) -> String {
        self.type_names
            .get(name)
            .cloned()
            .unwrap_or_else(|| sanitize_rust_type_name(&name.name))
    }

    fn render(&self, out: &mut String) -> fmt::Result {
        let iface = self.interface;
        writeln!(out, "//! {}", sanitize_doc(&iface.title))?;
        writeln!(out, "//!")?;
        writeln!(
            out,
            "//! Client interface generated by swaggen from a Swagger 2.0 document."
        )?;
        writeln!(out)?;
        writeln!(out, "/// Base path prepended to every operation path")?;
        writeln!(
            out,
            "pub const BASE_PATH: &str = \"{}\";",
            escape_string_literal(&iface.base_path)
        )?;
        writeln!(out)?;

        let mut trait_doc = vec![format!("Operations of {}", sanitize_doc(&iface.title))];
        media_type_lines(&mut trait_doc, &iface.consumes, &iface.produces);
        if let Some(security) = &iface.default_security {
            trait_doc.push(String::new());
            security_lines(&mut trait_doc, security);
        }
        write_doc(out, "", &trait_doc)?;
        writeln!(out, "pub trait {} {{", self.trait_name)?;
        writeln!(out, "    type Error;")?;

        let mut method_names = UniqueNames::default();
        for capability in &iface.capabilities {
            method_names.claim(capability.name.clone());
        }
        for method in &iface.methods {
            let name = method_names.claim(sanitize_rust_field_name(&method.name));
            writeln!(out)?;
            self.render_method(out, &name, method)?;
        }
        for capability in &iface.capabilities {
            writeln!(out)?;
            self.render_capability(out, capability)?;
        }
        writeln!(out, "}}")?;

        if !iface.named_types.is_empty() {
            writeln!(out)?;
            writeln!(out, "/// Types declared in the document definitions")?;
            writeln!(out, "pub mod {} {{", self.module)?;
            for (i, named) in iface.named_types.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                self.render_named_type(out, named)?;
            }
            writeln!(out, "}}")?;
        }

        Ok(())
    }

    fn render_method(&self, out: &mut String, name: &str, method: &MethodDescriptor) -> fmt::Result {
        let mut doc = Vec::new();
        let summary = sanitize_doc(&method.documentation);
        if !summary.is_empty() {
            doc.push(summary);
            doc.push(String::new());
        }
        doc.push(format!("`{} {}`", method.http_method, method.path));

        let mut arg_names = UniqueNames::default();
        arg_names.claim("self".to_string());
        let mut args = Vec::with_capacity(method.parameters.len());
        if !method.parameters.is_empty() {
            doc.push(String::new());
            doc.push("Parameters:".to_string());
        }
        for parameter in &method.parameters {
            let arg = arg_names.claim(sanitize_rust_field_name(&parameter.name));
            let mut ty = self.rust_type(&parameter.target_type, Scope::Trait);
            if parameter.optional {
                ty = format!("::std::option::Option<{ty}>");
            }
            doc.push(format!(
                "- `{arg}` ({}): {}",
                binding_label(&parameter.kind),
                documentation_line(&parameter.documentation)
            ));
            args.push(format!("{arg}: {ty}"));
        }

        media_type_lines(&mut doc, &method.consumes, &method.produces);
        if let Some(security) = &method.security {
            doc.push(String::new());
            security_lines(&mut doc, security);
        }

        write_doc(out, "    ", &doc)?;
        if method.deprecated {
            writeln!(out, "    #[deprecated]")?;
        }

        let item = self.rust_type(&method.result.item, Scope::Trait);
        let result = match method.result.wrapper {
            ResultWrapper::Stream => format!(
                "::futures::stream::BoxStream<'static, ::std::result::Result<{item}, Self::Error>>"
            ),
            ResultWrapper::Single => format!(
                "::futures::future::BoxFuture<'static, ::std::result::Result<{item}, Self::Error>>"
            ),
        };

        let mut signature = vec!["&self".to_string()];
        signature.extend(args);
        writeln!(out, "    fn {name}({}) -> {result};", signature.join(", "))
    }

    fn render_capability(&self, out: &mut String, capability: &CapabilityMethod) -> fmt::Result {
        write_doc(out, "    ", &[sanitize_doc(&capability.documentation)])?;
        let mut signature = vec!["&mut self".to_string()];
        signature.extend(capability.parameters.iter().map(|(name, ty)| {
            format!("{}: {}", sanitize_rust_field_name(name), self.rust_type(ty, Scope::Trait))
        }));
        writeln!(out, "    fn {}({});", capability.name, signature.join(", "))
    }

    fn render_named_type(&self, out: &mut String, named: &NamedType) -> fmt::Result {
        write_doc(out, "    ", &[documentation_line(&named.documentation)])?;
        writeln!(
            out,
            "    #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]"
        )?;
        writeln!(out, "    pub struct {} {{", self.type_name(&named.name))?;

        let mut field_names = UniqueNames::default();
        for field in &named.fields {
            let ident = field_names.claim(sanitize_rust_field_name(&field.name));
            let mut ty = self.rust_type(&field.target_type, Scope::Model);
            // Direct references are boxed; definitions may refer to each other
            if matches!(field.target_type, TargetType::Named(_)) {
                ty = format!("::std::boxed::Box<{ty}>");
            }

            write_doc(out, "        ", &[documentation_line(&field.documentation)])?;
            let rename = escape_string_literal(&field.name);
            if field.required {
                writeln!(out, "        #[serde(rename = \"{rename}\")]")?;
            } else {
                writeln!(
                    out,
                    "        #[serde(rename = \"{rename}\", default, skip_serializing_if = \"::std::option::Option::is_none\")]"
                )?;
                ty = format!("::std::option::Option<{ty}>");
            }
            writeln!(out, "        pub {ident}: {ty},")?;
        }
        writeln!(out, "    }}")
    }

    /// Primitives are path-qualified so a definition named `bool` cannot shadow them.
    /// Untyped model fields accept any JSON value.
    fn rust_type(&self, target: &TargetType, scope: Scope) -> String {
        match target {
            TargetType::Opaque => OPAQUE.to_string(),
            TargetType::Void if scope == Scope::Model => OPAQUE.to_string(),
            TargetType::Void => "()".to_string(),
            TargetType::String => STRING.to_string(),
            TargetType::Number => "::core::primitive::f64".to_string(),
            TargetType::Boolean => "::core::primitive::bool".to_string(),
            TargetType::NativeArray(inner) => {
                format!("::std::boxed::Box<[{}]>", self.rust_type(inner, scope))
            }
            TargetType::Sequence(inner) => {
                format!("::std::vec::Vec<{}>", self.rust_type(inner, scope))
            }
            TargetType::Named(name) => {
                let ty = self.type_name(name);
                match scope {
                    Scope::Trait => format!("{}::{ty}", self.module),
                    Scope::Model => ty,
                }
            }
        }
    }
}

fn write_doc(out: &mut String, indent: &str, lines: &[String]) -> fmt::Result {
    for line in lines {
        if line.is_empty() {
            writeln!(out, "{indent}///")?;
        } else {
            writeln!(out, "{indent}/// {line}")?;
        }
    }
    Ok(())
}

fn documentation_line(documentation: &Documentation) -> String {
    let mut line = sanitize_doc(&documentation.summary);
    if let Some(format) = &documentation.format {
        line.push_str(&format!(" (format: `{}`)", sanitize_doc(format)));
    }
    if !documentation.enum_values.is_empty() {
        let values: Vec<_> = documentation
            .enum_values
            .iter()
            .map(|v| format!("`{}`", sanitize_doc(v)))
            .collect();
        line.push_str(&format!(" (one of: {})", values.join(", ")));
    }
    line
}

fn binding_label(kind: &BindingKind) -> String {
    match kind {
        BindingKind::Query(name) => format!("query `{name}`"),
        BindingKind::Path(name) => format!("path `{name}`"),
        BindingKind::Header(name) => format!("header `{name}`"),
        BindingKind::Body => "request body".to_string(),
        BindingKind::Unbound => "unbound".to_string(),
    }
}

fn media_type_lines(doc: &mut Vec<String>, consumes: &[String], produces: &[String]) {
    if consumes.is_empty() && produces.is_empty() {
        return;
    }
    doc.push(String::new());
    if !consumes.is_empty() {
        doc.push(format!("Consumes: {}", consumes.join(", ")));
    }
    if !produces.is_empty() {
        doc.push(format!("Produces: {}", produces.join(", ")));
    }
}

fn security_lines(doc: &mut Vec<String>, security: &SecurityAnnotation) {
    match security {
        SecurityAnnotation::NoSecurity => doc.push("Security: none".to_string()),
        SecurityAnnotation::Schemes(schemes) if schemes.is_empty() => {
            doc.push("Security: no declared scheme".to_string())
        }
        SecurityAnnotation::Schemes(schemes) => {
            doc.push("Security:".to_string());
            for scheme in schemes {
                let mut line = format!("- `{}`: {}", scheme.scheme, scheme.scheme_type.as_str());
                match (scheme.location, &scheme.name) {
                    (Some(SchemeLocation::Header), Some(name)) => {
                        line.push_str(&format!(" in header `{name}`"))
                    }
                    (Some(SchemeLocation::Query), Some(name)) => {
                        line.push_str(&format!(" in query `{name}`"))
                    }
                    _ => {}
                }
                doc.push(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Diagnostic, Doc, InterfaceSynthesizer};
    use serde_json::json;

    fn synthesize(value: serde_json::Value) -> GeneratedInterface {
        let doc: Doc = serde_json::from_value(value).unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        InterfaceSynthesizer::new("petstore", "Api")
            .synthesize(&doc, &mut sink)
            .unwrap()
    }

    fn print(value: serde_json::Value) -> String {
        RustTraitPrinter::new()
            .print(&synthesize(value))
            .unwrap()
            .content
    }

    #[test]
    fn test_trait_methods_and_results() {
        let source = print(json!({
            "info": { "title": "Petstore" },
            "basePath": "/v2",
            "definitions": { "Pet": { "type": "object", "properties": { "name": { "type": "string" } } } },
            "paths": {
                "/pets": {
                    "get": {
                        "summary": "List pets",
                        "parameters": [{ "name": "limit", "in": "query", "type": "integer" }],
                        "responses": { "200": { "description": "ok", "schema": { "type": "array", "items": { "$ref": "#/definitions/Pet" } } } }
                    }
                },
                "/pets/{petId}": {
                    "get": {
                        "parameters": [{ "name": "petId", "in": "path", "type": "string", "required": true }],
                        "responses": { "200": { "description": "ok", "schema": { "$ref": "#/definitions/Pet" } } }
                    }
                }
            }
        }));

        assert!(source.contains("pub const BASE_PATH: &str = \"/v2\";"));
        assert!(source.contains("pub trait Api {"));
        assert!(source.contains(
            "fn get_pets(&self, limit: ::std::option::Option<::core::primitive::f64>) -> ::futures::stream::BoxStream<'static, ::std::result::Result<api::Pet, Self::Error>>;"
        ));
        assert!(source.contains(
            "fn get_pets_2(&self, pet_id: ::std::string::String) -> ::futures::future::BoxFuture<'static, ::std::result::Result<api::Pet, Self::Error>>;"
        ));
        assert!(source.contains("/// - `limit` (query `limit`): limit"));
        assert!(source.contains(
            "fn set_security_token(&mut self, token_name: ::std::string::String, token_value: ::std::string::String);"
        ));
        assert!(source.contains("pub mod api {"));
    }

    #[test]
    fn test_named_type_fields() {
        let source = print(json!({
            "info": { "title": "Petstore" },
            "definitions": {
                "Pet": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "type": "string", "enum": ["cat", "dog"] },
                        "owner": { "$ref": "#/definitions/Owner" },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    }
                },
                "Owner": { "type": "object", "properties": { "pets": { "type": "array", "items": { "$ref": "#/definitions/Pet" } } } }
            },
            "paths": { "/ping": { "get": { "responses": {} } } }
        }));

        assert!(source.contains("    pub struct Pet {"));
        assert!(source.contains("        #[serde(rename = \"name\")]\n        pub name: ::std::string::String,"));
        assert!(source.contains("pub type_: ::std::option::Option<::std::string::String>,"));
        assert!(source.contains("/// type (one of: `cat`, `dog`)"));
        assert!(source.contains(
            "pub owner: ::std::option::Option<::std::boxed::Box<Owner>>,"
        ));
        assert!(source.contains(
            "pub tags: ::std::option::Option<::std::boxed::Box<[::std::string::String]>>,"
        ));
        assert!(source.contains(
            "pub pets: ::std::option::Option<::std::boxed::Box<[Pet]>>,"
        ));
    }

    #[test]
    fn test_type_names_stay_distinct_and_primitives_unshadowed() {
        let source = print(json!({
            "info": { "title": "Tricky" },
            "definitions": {
                "Self": { "type": "object" },
                "Self_": { "type": "object" },
                "bool": { "type": "object" },
                "Wrap": {
                    "type": "object",
                    "properties": {
                        "flag": { "type": "boolean" },
                        "count": { "type": "integer" },
                        "inner": { "$ref": "#/definitions/bool" },
                        "other": { "$ref": "#/definitions/Self_" },
                        "extra": {}
                    }
                }
            },
            "paths": {
                "/wrap": {
                    "get": { "responses": { "200": { "description": "ok", "schema": { "$ref": "#/definitions/Self_" } } } }
                }
            }
        }));

        assert_eq!(source.matches("    pub struct Self_ {").count(), 1);
        assert!(source.contains("    pub struct Self__2 {"));
        assert!(source.contains("    pub struct bool {"));
        assert!(source.contains("pub flag: ::std::option::Option<::core::primitive::bool>,"));
        assert!(source.contains("pub count: ::std::option::Option<::core::primitive::f64>,"));
        assert!(source.contains("pub inner: ::std::option::Option<::std::boxed::Box<bool>>,"));
        assert!(source.contains("pub other: ::std::option::Option<::std::boxed::Box<Self__2>>,"));
        assert!(source.contains("::std::result::Result<api::Self__2, Self::Error>"));
        // Untyped properties accept any value
        assert!(source.contains("pub extra: ::std::option::Option<::serde_json::Value>,"));
    }

    #[test]
    fn test_security_and_deprecation_docs() {
        let source = print(json!({
            "info": { "title": "Secure" },
            "securityDefinitions": { "api_key": { "type": "apiKey", "in": "header", "name": "X-Api-Key" } },
            "security": [{ "api_key": [] }],
            "paths": {
                "/health": { "get": { "deprecated": true, "security": [], "responses": {} } }
            }
        }));

        assert!(source.contains("/// - `api_key`: apiKey in header `X-Api-Key`"));
        assert!(source.contains("    /// Security: none\n    #[deprecated]\n    fn get_health(&self)"));
        assert!(source.contains("::futures::stream::BoxStream<'static, ::std::result::Result<(), Self::Error>>"));
        assert!(!source.contains("pub mod api"));
    }
}
