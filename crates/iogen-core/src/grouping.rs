use heck::ToPascalCase;
use indexmap::IndexMap;

use crate::parse::operation::PathItem;

/// Group name for path items whose operations carry no tag.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Group path items by tag, keeping first-appearance order of both groups and paths.
///
/// A path item is filed under the first tag of its first present operation,
/// converted to PascalCase. Items without any tagged operation go to [`UNKNOWN_GROUP`].
pub fn group_paths_by_tag(
    paths: &IndexMap<String, PathItem>,
) -> IndexMap<String, IndexMap<String, PathItem>> {
    let mut groups: IndexMap<String, IndexMap<String, PathItem>> = IndexMap::new();

    for (url, item) in paths {
        let tag = path_item_tag(item).unwrap_or_else(|| UNKNOWN_GROUP.to_string());
        groups
            .entry(tag)
            .or_default()
            .insert(url.clone(), item.clone());
    }

    groups
}

fn path_item_tag(item: &PathItem) -> Option<String> {
    item.operations()
        .first()
        .and_then(|(_, op)| op.tags.first())
        .map(|tag| tag.to_pascal_case())
        .filter(|tag| !tag.is_empty())
}
