use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::{debug, warn};

use crate::media::{MediaRecord, TITLE_VIEW};
use crate::vpath::VirtualPath;

use super::{ChildIndex, Namespace, PathIndex};

/// Accumulates records into a [`Namespace`].
///
/// Every record lands under `/<type>/byTitle/<title>` and under
/// `/<type>/by<Tag>/<value>/<title>` for each of its tag values. A later
/// record with the same leaf path replaces the earlier one.
#[derive(Debug)]
pub struct NamespaceBuilder {
    paths: PathIndex,
    children: ChildIndex,
    records: usize,
    collisions: usize,
}

impl NamespaceBuilder {
    pub fn new() -> Self {
        let mut children = HashMap::new();
        children.insert(VirtualPath::root(), BTreeSet::new());
        Self {
            paths: HashMap::new(),
            children,
            records: 0,
            collisions: 0,
        }
    }

    pub fn add(&mut self, record: &MediaRecord) {
        let root = VirtualPath::root();
        let title = record.title();

        let type_dir = self.register(&root, record.media_type().label());

        let title_view = self.register(&type_dir, TITLE_VIEW);
        let leaf = self.register(&title_view, title);
        self.insert_leaf(leaf, record.base());

        for (kind, values) in record.tags() {
            for value in values {
                let tag_view = self.register(&type_dir, &kind.view());
                let value_dir = self.register(&tag_view, value);
                let leaf = self.register(&value_dir, title);
                self.insert_leaf(leaf, record.base());
            }
        }

        self.records += 1;
    }

    /// Adds `name` under `parent` and returns the child's path.
    fn register(&mut self, parent: &VirtualPath, name: &str) -> VirtualPath {
        self.children
            .entry(parent.clone())
            .or_default()
            .insert(name.to_string());
        parent.join(name)
    }

    fn insert_leaf(&mut self, leaf: VirtualPath, base: &Path) {
        debug!(leaf = %leaf, base = %base.display(), "mapping virtual leaf");
        if let Some(previous) = self.paths.insert(leaf.clone(), base.to_path_buf()) {
            if previous != base {
                warn!(
                    leaf = %leaf,
                    replaced = %previous.display(),
                    base = %base.display(),
                    "title collision, keeping the later record"
                );
                self.collisions += 1;
            }
        }
    }

    pub fn finish(self) -> Namespace {
        Namespace {
            paths: self.paths,
            children: self.children,
            records: self.records,
            collisions: self.collisions,
        }
    }
}

impl Default for NamespaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a namespace from a full sequence of records.
pub fn build<I>(records: I) -> Namespace
where
    I: IntoIterator<Item = MediaRecord>,
{
    let mut builder = NamespaceBuilder::new();
    for record in records {
        builder.add(&record);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::media::{MediaType, TagKind};

    fn movie(base: &str, title: &str, genres: &[&str]) -> MediaRecord {
        MediaRecord::new(base, MediaType::Movie, title)
            .unwrap()
            .with_tags(TagKind::Genre, genres.iter().copied())
            .unwrap()
    }

    fn names(namespace: &Namespace, path: &str) -> Vec<String> {
        namespace
            .list_children(&VirtualPath::new(path))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_build_has_only_root() {
        let namespace = build(Vec::new());
        assert_eq!(namespace.children().len(), 1);
        assert!(namespace.list_children(&VirtualPath::root()).unwrap().is_empty());
        assert!(namespace.paths().is_empty());
        assert_eq!(namespace.records(), 0);
    }

    #[test]
    fn test_record_without_genres_only_gets_title_view() {
        let namespace = build(vec![movie("/m/Heat", "Heat", &[])]);
        assert_eq!(names(&namespace, "/Movies"), vec!["byTitle"]);
        assert_eq!(namespace.paths().len(), 1);
    }

    #[test]
    fn test_one_leaf_per_view_entry() {
        let namespace = build(vec![
            movie("/m/Alien", "Alien", &["Horror", "Sci-Fi"]),
            movie("/m/Heat", "Heat", &["Crime"]),
        ]);

        let mut keys: Vec<_> = namespace.paths().keys().map(|k| k.to_string()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "/Movies/byGenre/Crime/Heat",
                "/Movies/byGenre/Horror/Alien",
                "/Movies/byGenre/Sci-Fi/Alien",
                "/Movies/byTitle/Alien",
                "/Movies/byTitle/Heat",
            ]
        );
        assert_eq!(names(&namespace, "/Movies/byGenre"), vec!["Crime", "Horror", "Sci-Fi"]);
        assert_eq!(names(&namespace, "/Movies/byTitle"), vec!["Alien", "Heat"]);
    }

    #[test]
    fn test_no_leaf_is_prefix_of_another_or_internal() {
        let namespace = build(vec![
            movie("/m/Alien", "Alien", &["Horror", "Sci-Fi"]),
            movie("/m/Sci-Fi", "Sci-Fi", &["Documentary"]),
            MediaRecord::new("/t/Alien", MediaType::TvShow, "Alien").unwrap(),
        ]);

        for leaf in namespace.paths().keys() {
            assert!(!namespace.is_internal(leaf), "{leaf} is both leaf and internal");
            for other in namespace.paths().keys() {
                if leaf != other {
                    let prefix = format!("{}/", leaf.as_str());
                    assert!(!other.as_str().starts_with(&prefix), "{leaf} prefixes {other}");
                }
            }
        }
    }

    #[test]
    fn test_children_match_path_index_segments() {
        let namespace = build(vec![
            movie("/m/Alien", "Alien", &["Horror", "Sci-Fi"]),
            MediaRecord::new("/t/Lost", MediaType::TvShow, "Lost")
                .unwrap()
                .with_tag(TagKind::Genre, "Drama")
                .unwrap(),
        ]);

        let mut expected: ChildIndex = HashMap::new();
        expected.insert(VirtualPath::root(), BTreeSet::new());
        for leaf in namespace.paths().keys() {
            let segments: Vec<&str> = leaf.segments().collect();
            for depth in 0..segments.len() {
                expected
                    .entry(VirtualPath::from_segments(&segments[..depth]))
                    .or_default()
                    .insert(segments[depth].to_string());
            }
        }
        assert_eq!(namespace.children(), &expected);
    }

    #[test]
    fn test_collision_last_write_wins() {
        let namespace = build(vec![
            movie("/a/Dune", "Dune", &["Sci-Fi"]),
            movie("/b/Dune", "Dune", &["Adventure"]),
        ]);

        let paths = namespace.paths();
        assert_eq!(
            paths.get(&VirtualPath::new("/Movies/byTitle/Dune")),
            Some(&PathBuf::from("/b/Dune"))
        );
        assert_eq!(
            paths.get(&VirtualPath::new("/Movies/byGenre/Sci-Fi/Dune")),
            Some(&PathBuf::from("/a/Dune"))
        );
        assert_eq!(
            paths.get(&VirtualPath::new("/Movies/byGenre/Adventure/Dune")),
            Some(&PathBuf::from("/b/Dune"))
        );
        assert_eq!(namespace.collisions(), 1);
    }

    #[test]
    fn test_same_base_twice_is_not_a_collision() {
        let namespace = build(vec![
            movie("/a/Dune", "Dune", &["Sci-Fi"]),
            movie("/a/Dune", "Dune", &["Sci-Fi"]),
        ]);
        assert_eq!(namespace.collisions(), 0);
        assert_eq!(namespace.records(), 2);
    }

    #[test]
    fn test_build_is_idempotent() {
        let records = vec![
            movie("/m/Alien", "Alien", &["Horror", "Sci-Fi"]),
            movie("/m/Heat", "Heat", &["Crime"]),
            MediaRecord::new("/t/Lost", MediaType::TvShow, "Lost").unwrap(),
        ];
        assert_eq!(build(records.clone()), build(records));
    }
}
