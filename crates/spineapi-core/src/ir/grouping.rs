use indexmap::IndexMap;

use super::operations::EndpointDescriptor;
use super::types::ParsedSpec;

/// Group name for endpoints that declare no tags.
pub const DEFAULT_GROUP: &str = "default";

/// Endpoints sharing a tag, used to split route modules.
#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup<'a> {
    pub name: &'a str,
    pub endpoints: Vec<&'a EndpointDescriptor>,
}

/// Group endpoints by tag in first-seen order.
///
/// An endpoint with several tags lands in each of its groups; untagged
/// endpoints go to [`DEFAULT_GROUP`].
pub fn group_by_tag(spec: &ParsedSpec) -> Vec<TagGroup<'_>> {
    let mut groups: IndexMap<&str, Vec<&EndpointDescriptor>> = IndexMap::new();

    for endpoint in &spec.endpoints {
        if endpoint.tags.is_empty() {
            groups.entry(DEFAULT_GROUP).or_default().push(endpoint);
        } else {
            for tag in &endpoint.tags {
                groups.entry(tag.as_str()).or_default().push(endpoint);
            }
        }
    }

    groups
        .into_iter()
        .map(|(name, endpoints)| TagGroup { name, endpoints })
        .collect()
}
