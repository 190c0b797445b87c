//! Identifier helpers for asset inventory names
//!
//! Inventory records name resources by their full provider path, e.g.
//! `//cloudresourcemanager.googleapis.com/folders/188906894377`. The graph
//! keys resources on the last two segments, which is also the form used in
//! `ancestors` lists.

/// Canonical resource id: the last two `/`-separated segments of `name`
///
/// # Examples
///
/// ```
/// use gcp_policy_graph::naming::unique_identifier_from_name;
///
/// assert_eq!(
///     unique_identifier_from_name("//cloudresourcemanager.googleapis.com/folders/188906894377"),
///     "folders/188906894377"
/// );
/// assert_eq!(unique_identifier_from_name("projects"), "projects");
/// ```
pub fn unique_identifier_from_name(name: &str) -> String {
    let mut segments = name.rsplitn(3, '/');
    let last = segments.next().unwrap_or_default();
    match segments.next() {
        Some(second_last) => format!("{second_last}/{last}"),
        None => last.to_string(),
    }
}

/// Short resource type: the last `/`-separated segment of an asset type
pub fn resource_object_type(asset_type: &str) -> &str {
    asset_type.rsplit('/').next().unwrap_or(asset_type)
}

/// Readable edge type name, e.g. `ResourceToRole`
///
/// Each part keeps only its first letter upper-cased.
pub fn edge_type_label(previous: &str, next: &str) -> String {
    format!("{}To{}", title_case(previous), title_case(next))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
