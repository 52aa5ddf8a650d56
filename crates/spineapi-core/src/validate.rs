//! Structural validation against the OpenAPI 3.x object model.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::ir::HttpMethod;
use crate::load::{self, RawDocument};
use crate::parse;
use crate::parse::security::SecuritySchemeType;

const PARAMETER_LOCATIONS: [&str; 4] = ["query", "header", "path", "cookie"];
const MAX_REF_HOPS: usize = 16;

/// Keywords whose values are instance data, where `$ref` is just a key.
const LITERAL_KEYWORDS: [&str; 5] = ["example", "examples", "default", "enum", "const"];

/// Maps keyed by user-chosen names, where a literal keyword is a name.
const NAMED_MAPS: [&str; 9] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "responses",
    "schemas",
    "parameters",
    "requestBodies",
    "headers",
    "securitySchemes",
];

/// Checks that a document is structurally valid OpenAPI.
///
/// Returns a human-readable diagnostic on failure.
pub trait Validator {
    fn validate(&self, path: &Path) -> Result<(), String>;
}

impl<F> Validator for F
where
    F: Fn(&Path) -> Result<(), String>,
{
    fn validate(&self, path: &Path) -> Result<(), String> {
        self(path)
    }
}

/// The built-in validator: walks the raw tree and reports every violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl Validator for StructuralValidator {
    fn validate(&self, path: &Path) -> Result<(), String> {
        let doc = load::load(path).map_err(|e| e.to_string())?;
        let violations = check_document(&doc);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }
}

#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, at: impl AsRef<str>, message: impl fmt::Display) {
        self.0.push(format!("{}: {message}", at.as_ref()));
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Run every structural rule over `doc`. An empty result means valid.
pub fn check_document(doc: &RawDocument) -> Vec<String> {
    let mut v = Violations::default();

    let Some(root) = doc.root().as_object() else {
        v.push("document", "root must be a mapping");
        return v.0;
    };

    let version = check_version(root, &mut v);
    // 3.1 made `paths` and `responses` optional.
    let strict = version.is_some_and(|ver| ver.starts_with("3.0"));

    check_info(root.get("info"), &mut v);

    match root.get("paths") {
        None if strict => v.push("paths", "required"),
        None => {}
        Some(Value::Object(paths)) => check_paths(doc, paths, strict, &mut v),
        Some(_) => v.push("paths", "must be a mapping"),
    }

    check_security_schemes(root, &mut v);
    check_refs(doc, doc.root(), "", "", &mut v);

    // Shape mismatches the rules above don't cover (e.g. `tags` as a mapping).
    if v.is_empty() {
        if let Err(e) = parse::from_raw(doc) {
            v.push("document", e);
        }
    }

    v.0
}

fn check_version<'a>(root: &'a Map<String, Value>, v: &mut Violations) -> Option<&'a str> {
    if root.contains_key("swagger") {
        v.push("swagger", "Swagger 2.0 documents are not supported");
        return None;
    }
    match root.get("openapi") {
        Some(Value::String(ver)) if ver.starts_with("3.") => Some(ver.as_str()),
        Some(Value::String(ver)) => {
            v.push("openapi", format!("unsupported OpenAPI version `{ver}`"));
            None
        }
        Some(_) => {
            v.push("openapi", "must be a string");
            None
        }
        None => {
            v.push("openapi", "required");
            None
        }
    }
}

fn check_info(info: Option<&Value>, v: &mut Violations) {
    let Some(info) = info else {
        v.push("info", "required");
        return;
    };
    let Some(info) = info.as_object() else {
        v.push("info", "must be a mapping");
        return;
    };
    for key in ["title", "version"] {
        match info.get(key) {
            Some(Value::String(_)) => {}
            Some(_) => v.push(format!("info.{key}"), "must be a string"),
            None => v.push(format!("info.{key}"), "required"),
        }
    }
}

fn check_paths(doc: &RawDocument, paths: &Map<String, Value>, strict: bool, v: &mut Violations) {
    let mut operation_ids: HashMap<&str, String> = HashMap::new();

    for (path, item) in paths {
        let at = format!("paths.{path}");
        if !path.starts_with('/') {
            v.push(&at, "path must start with '/'");
        }
        let Some(item) = item.as_object() else {
            v.push(&at, "path item must be a mapping");
            continue;
        };

        let shared = check_parameters(doc, item.get("parameters"), &format!("{at}.parameters"), v);
        let placeholders = template_params(path);

        for method in HttpMethod::ALL {
            let Some(op) = item.get(method.key()) else {
                continue;
            };
            let op_at = format!("{at}.{}", method.key());
            let Some(op) = op.as_object() else {
                v.push(&op_at, "operation must be a mapping");
                continue;
            };

            let own = check_parameters(doc, op.get("parameters"), &format!("{op_at}.parameters"), v);
            // A parameter defined in another file may declare any placeholder.
            if !shared.external && !own.external {
                for name in &placeholders {
                    let declared = shared
                        .pairs
                        .iter()
                        .chain(&own.pairs)
                        .any(|(n, loc)| n == name && loc == "path");
                    if !declared {
                        v.push(&op_at, format!("path parameter `{name}` is not declared"));
                    }
                }
            }

            if let Some(id) = op.get("operationId") {
                match id.as_str() {
                    Some(id) => match operation_ids.entry(id) {
                        Entry::Occupied(first) => v.push(
                            &op_at,
                            format!("duplicate operationId `{id}` (first used at {})", first.get()),
                        ),
                        Entry::Vacant(slot) => {
                            slot.insert(op_at.clone());
                        }
                    },
                    None => v.push(format!("{op_at}.operationId"), "must be a string"),
                }
            }

            check_responses(op.get("responses"), strict, &op_at, v);
        }
    }
}

/// Parameters declared by one parameter list.
#[derive(Debug, Default)]
struct Declared {
    /// (name, location) pairs.
    pairs: Vec<(String, String)>,
    /// Some entry is defined outside this document.
    external: bool,
}

/// Validate a parameter list and collect what it declares.
fn check_parameters(
    doc: &RawDocument,
    params: Option<&Value>,
    at: &str,
    v: &mut Violations,
) -> Declared {
    let mut declared = Declared::default();
    let Some(params) = params else {
        return declared;
    };
    let Some(list) = params.as_array() else {
        v.push(at, "must be a sequence");
        return declared;
    };

    for (i, entry) in list.iter().enumerate() {
        let entry_at = format!("{at}[{i}]");
        let param = match deref(doc, entry) {
            Target::Local(param) => param,
            Target::External => {
                declared.external = true;
                continue;
            }
            // Reported by `check_refs`.
            Target::Dangling => continue,
        };
        let Some(param) = param.as_object() else {
            v.push(&entry_at, "parameter must be a mapping");
            continue;
        };

        let name = param.get("name").and_then(Value::as_str);
        let location = param.get("in").and_then(Value::as_str);
        let (Some(name), Some(location)) = (name, location) else {
            v.push(&entry_at, "parameter requires string `name` and `in`");
            continue;
        };
        if !PARAMETER_LOCATIONS.contains(&location) {
            v.push(&entry_at, format!("invalid parameter location `{location}`"));
            continue;
        }
        if location == "path" && param.get("required") != Some(&Value::Bool(true)) {
            v.push(&entry_at, format!("path parameter `{name}` must be required"));
        }

        let key = (name.to_string(), location.to_string());
        if declared.pairs.contains(&key) {
            v.push(&entry_at, format!("duplicate parameter `{name}` in {location}"));
        } else {
            declared.pairs.push(key);
        }
    }
    declared
}

fn check_responses(responses: Option<&Value>, required: bool, op_at: &str, v: &mut Violations) {
    let at = format!("{op_at}.responses");
    let responses = match responses {
        None => {
            if required {
                v.push(&at, "required");
            }
            return;
        }
        Some(Value::Object(map)) => map,
        Some(_) => {
            v.push(&at, "must be a mapping");
            return;
        }
    };

    if responses.is_empty() {
        v.push(&at, "must declare at least one response");
    }
    for (status, response) in responses {
        if !is_status_key(status) {
            v.push(&at, format!("invalid status code `{status}`"));
        }
        let Some(response) = response.as_object() else {
            v.push(format!("{at}.{status}"), "response must be a mapping");
            continue;
        };
        if response.contains_key("$ref") {
            continue;
        }
        if !response.get("description").is_some_and(Value::is_string) {
            v.push(format!("{at}.{status}.description"), "required");
        }
    }
}

fn check_security_schemes(root: &Map<String, Value>, v: &mut Violations) {
    let Some(schemes) = root
        .get("components")
        .and_then(|c| c.get("securitySchemes"))
    else {
        return;
    };
    let Some(schemes) = schemes.as_object() else {
        v.push("components.securitySchemes", "must be a mapping");
        return;
    };

    for (name, scheme) in schemes {
        let at = format!("components.securitySchemes.{name}");
        match scheme.get("type").and_then(Value::as_str) {
            Some(t) if SecuritySchemeType::NAMES.contains(&t) => {}
            Some(t) => v.push(&at, format!("unknown security scheme type `{t}`")),
            None => v.push(&at, "missing `type`"),
        }
    }
}

/// Report every local `$ref` that does not point into the document.
///
/// `parent` is the key `value` sits under. Example and default payloads are
/// not walked.
fn check_refs(doc: &RawDocument, value: &Value, parent: &str, at: &str, v: &mut Violations) {
    match value {
        Value::Object(map) => {
            let named = NAMED_MAPS.contains(&parent);
            if !named {
                if let Some(Value::String(target)) = map.get("$ref") {
                    if let Some(pointer) = target.strip_prefix('#') {
                        if doc.pointer(pointer).is_none() {
                            v.push(at, format!("unresolved reference `{target}`"));
                        }
                    }
                }
            }
            for (key, child) in map {
                if !named && LITERAL_KEYWORDS.contains(&key.as_str()) {
                    continue;
                }
                check_refs(doc, child, key, &join(at, key), v);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                check_refs(doc, item, "", &format!("{at}[{i}]"), v);
            }
        }
        _ => {}
    }
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{at}.{key}")
    }
}

enum Target<'a> {
    Local(&'a Value),
    External,
    /// Missing target, or a chain longer than `MAX_REF_HOPS`.
    Dangling,
}

/// Follow local references until a non-reference value is reached.
fn deref<'a>(doc: &'a RawDocument, value: &'a Value) -> Target<'a> {
    let mut current = value;
    for _ in 0..MAX_REF_HOPS {
        let Some(target) = current.get("$ref").and_then(Value::as_str) else {
            return Target::Local(current);
        };
        let Some(pointer) = target.strip_prefix('#') else {
            return Target::External;
        };
        match doc.pointer(pointer) {
            Some(next) => current = next,
            None => return Target::Dangling,
        }
    }
    Target::Dangling
}

/// Placeholder names in a path template, e.g. `["id"]` for `/items/{id}`.
fn template_params(path: &str) -> Vec<&str> {
    path.split('{')
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
        .collect()
}

fn is_status_key(key: &str) -> bool {
    if key == "default" {
        return true;
    }
    let bytes = key.as_bytes();
    bytes.len() == 3
        && (b'1'..=b'5').contains(&bytes[0])
        && (bytes[1..].iter().all(u8::is_ascii_digit) || key[1..].eq_ignore_ascii_case("xx"))
}
