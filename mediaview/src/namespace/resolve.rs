use std::path::PathBuf;

use crate::vpath::VirtualPath;

use super::Namespace;

/// What a virtual path refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A synthetic grouping directory; its children come from the child index.
    Internal,
    /// A title's virtual directory, or something below it.
    Leaf(Leaf),
    NotFound,
}

/// Resolution of a path at or below a virtual leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Real base directory of the matched title.
    pub base: PathBuf,
    /// Segments below the leaf, `/`-joined. Empty for the leaf itself.
    pub suffix: String,
}

impl Leaf {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(base: P, suffix: S) -> Self {
        Self {
            base: base.into(),
            suffix: suffix.into(),
        }
    }

    /// The concrete filesystem path: base joined with suffix.
    pub fn real_path(&self) -> PathBuf {
        if self.suffix.is_empty() {
            self.base.clone()
        } else {
            self.base.join(&self.suffix)
        }
    }
}

impl Namespace {
    /// Classifies `path` as an internal node, a (possibly nested) leaf, or
    /// nothing.
    ///
    /// Leaves are found by longest prefix: trailing segments are stripped one
    /// at a time until a leaf path matches, and the stripped segments become
    /// the suffix.
    pub fn classify(&self, path: &VirtualPath) -> Classification {
        if self.is_internal(path) {
            return Classification::Internal;
        }

        let segments: Vec<&str> = path.segments().collect();
        for depth in (1..=segments.len()).rev() {
            let prefix = VirtualPath::from_segments(&segments[..depth]);
            if let Some(base) = self.paths.get(&prefix) {
                return Classification::Leaf(Leaf::new(base.clone(), segments[depth..].join("/")));
            }
        }

        Classification::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaRecord, MediaType, TagKind};
    use crate::namespace::build;

    fn inception() -> Namespace {
        build(vec![
            MediaRecord::new("/media/Inception (2010)", MediaType::Movie, "Inception")
                .unwrap()
                .with_tags(TagKind::Genre, ["Sci-Fi", "Thriller"])
                .unwrap(),
        ])
    }

    fn classify(namespace: &Namespace, path: &str) -> Classification {
        namespace.classify(&VirtualPath::new(path))
    }

    fn leaf(base: &str, suffix: &str) -> Classification {
        Classification::Leaf(Leaf::new(base, suffix))
    }

    #[test]
    fn test_end_to_end_scenario() {
        let namespace = inception();

        let root: Vec<_> = namespace.list_children(&VirtualPath::root()).unwrap().iter().collect();
        assert_eq!(root, vec!["Movies"]);

        let movies: Vec<_> = namespace
            .list_children(&VirtualPath::new("/Movies"))
            .unwrap()
            .iter()
            .collect();
        assert_eq!(movies, vec!["byGenre", "byTitle"]);

        assert_eq!(
            classify(&namespace, "/Movies/byGenre/Sci-Fi/Inception"),
            leaf("/media/Inception (2010)", "")
        );
        assert_eq!(
            classify(&namespace, "/Movies/byTitle/Inception/poster.jpg"),
            leaf("/media/Inception (2010)", "poster.jpg")
        );
        assert_eq!(
            classify(&namespace, "/Movies/byGenre/Horror/Inception"),
            Classification::NotFound
        );
    }

    #[test]
    fn test_internal_nodes() {
        let namespace = inception();
        for path in ["/", "/Movies", "/Movies/byTitle", "/Movies/byGenre", "/Movies/byGenre/Thriller"] {
            assert_eq!(classify(&namespace, path), Classification::Internal, "{path}");
        }
    }

    #[test]
    fn test_nested_suffix_keeps_order() {
        let namespace = inception();
        let resolved = classify(&namespace, "/Movies/byTitle/Inception/extra/featurettes/file.txt");
        assert_eq!(resolved, leaf("/media/Inception (2010)", "extra/featurettes/file.txt"));

        let Classification::Leaf(leaf) = resolved else {
            panic!("expected a leaf");
        };
        assert_eq!(
            leaf.real_path(),
            PathBuf::from("/media/Inception (2010)/extra/featurettes/file.txt")
        );
    }

    #[test]
    fn test_unknown_paths() {
        let namespace = inception();
        for path in ["/Music", "/Movies/byYear", "/Movies/byTitle/Memento", "/TV Shows/byTitle/Inception"] {
            assert_eq!(classify(&namespace, path), Classification::NotFound, "{path}");
        }
    }

    #[test]
    fn test_empty_namespace_root_is_internal() {
        let namespace = build(Vec::new());
        assert_eq!(classify(&namespace, "/"), Classification::Internal);
        assert_eq!(classify(&namespace, "/Movies"), Classification::NotFound);
    }

    #[test]
    fn test_every_record_resolves_in_every_view() {
        let records = vec![
            MediaRecord::new("/m/Alien", MediaType::Movie, "Alien")
                .unwrap()
                .with_tags(TagKind::Genre, ["Horror", "Sci-Fi"])
                .unwrap(),
            MediaRecord::new("/t/Firefly", MediaType::TvShow, "Firefly")
                .unwrap()
                .with_tag(TagKind::Genre, "Sci-Fi")
                .unwrap(),
        ];
        let namespace = build(records.clone());

        for record in &records {
            let label = record.media_type().label();
            let base = record.base().to_str().unwrap();
            assert_eq!(
                classify(&namespace, &format!("/{label}/byTitle/{}", record.title())),
                leaf(base, "")
            );
            for genre in record.tag_values(TagKind::Genre) {
                assert_eq!(
                    classify(&namespace, &format!("/{label}/byGenre/{genre}/{}", record.title())),
                    leaf(base, "")
                );
            }
        }

        let labels: Vec<_> = namespace.list_children(&VirtualPath::root()).unwrap().iter().collect();
        assert_eq!(labels, vec!["Movies", "TV Shows"]);
    }
}
