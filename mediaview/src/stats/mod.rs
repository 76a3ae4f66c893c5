use std::collections::BTreeMap;

use serde::Serialize;

use crate::library::MediaLibrary;
use crate::media::{MediaType, TITLE_VIEW, TagKind};
use crate::vpath::VirtualPath;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagValueCount {
    pub label: String,
    pub view: String,
    pub value: String,
    pub titles: usize,
}

/// Summary of a loaded library and the namespace built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceStats {
    pub records: usize,
    pub skipped: usize,
    pub collisions: usize,
    pub leaves: usize,
    pub internal_nodes: usize,
    pub titles_by_type: BTreeMap<String, usize>,
    pub tag_values: Vec<TagValueCount>,
}

pub fn collect(library: &MediaLibrary) -> NamespaceStats {
    let namespace = library.namespace();
    let count_children = |path: &VirtualPath| {
        namespace
            .list_children(path)
            .map(|children| children.len())
            .unwrap_or(0)
    };

    let mut titles_by_type = BTreeMap::new();
    let mut tag_values = Vec::new();
    for media_type in MediaType::ALL {
        let label = VirtualPath::root().join(media_type.label());
        if !namespace.is_internal(&label) {
            continue;
        }
        titles_by_type.insert(
            media_type.label().to_string(),
            count_children(&label.join(TITLE_VIEW)),
        );

        for kind in TagKind::ALL {
            let view = label.join(&kind.view());
            let Some(values) = namespace.list_children(&view) else {
                continue;
            };
            for value in values {
                tag_values.push(TagValueCount {
                    label: media_type.label().to_string(),
                    view: kind.view(),
                    value: value.clone(),
                    titles: count_children(&view.join(value)),
                });
            }
        }
    }

    NamespaceStats {
        records: library.report().parsed,
        skipped: library.report().skipped,
        collisions: namespace.collisions(),
        leaves: namespace.paths().len(),
        internal_nodes: namespace.children().len(),
        titles_by_type,
        tag_values,
    }
}
