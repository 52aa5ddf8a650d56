//! Identifier derivations used by the IR descriptors.
//!
//! These rules are deliberately naive string transforms, so emitted names stay
//! predictable from the document text alone.

/// Implementation identifier for an operation.
///
/// A declared `operationId` is lower-cased with hyphens turned into
/// underscores. Without one, the name is derived from the route.
pub fn handler_name(operation_id: &str, method: &str, path: &str) -> String {
    if operation_id.is_empty() {
        route_to_name(method, path)
    } else {
        operation_id.to_lowercase().replace('-', "_")
    }
}

/// Derive an identifier from HTTP method + path.
///
/// Parameter segments are skipped:
/// - `GET /items` → `get_items`
/// - `GET /items/{item_id}` → `get_items`
/// - `POST /users/{id}/messages` → `post_users_messages`
/// - `GET /` → `get_`
pub fn route_to_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && !s.starts_with('{'))
        .collect();

    format!("{}_{}", method.to_lowercase(), segments.join("_"))
}

/// Type name for a schema: split on `-`, space and `_`, capitalize each piece.
///
/// The rest of each piece is lower-cased, so `ItemCreate` becomes
/// `Itemcreate`.
pub fn type_name(name: &str) -> String {
    name.split(['-', ' ', '_'])
        .filter(|seg| !seg.is_empty())
        .map(capitalize)
        .collect()
}

/// Storage identifier for a schema: lower snake name with a naive plural `s`.
pub fn table_name(name: &str) -> String {
    let mut table = name.to_lowercase().replace(['-', ' '], "_");
    if !table.ends_with('s') {
        table.push('s');
    }
    table
}

/// Project identifier from an API title.
pub fn project_name(title: &str) -> String {
    title.to_lowercase().replace([' ', '-'], "_")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
