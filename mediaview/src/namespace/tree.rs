use std::fmt::Write;

use crate::vpath::VirtualPath;

use super::{Classification, Namespace};

impl Namespace {
    /// Renders the hierarchy below `from` as an indented tree, `max_depth`
    /// levels deep. Leaves show the real directory they point to.
    ///
    /// Returns `None` when `from` is not an internal node.
    pub fn render_tree(&self, from: &VirtualPath, max_depth: usize) -> Option<String> {
        if !self.is_internal(from) {
            return None;
        }
        let mut out = String::new();
        let name = from.file_name().unwrap_or("/");
        self.render_node(from, name, 0, max_depth, true, "", &mut out);
        Some(out)
    }

    #[allow(clippy::too_many_arguments)]
    fn render_node(
        &self,
        path: &VirtualPath,
        name: &str,
        depth: usize,
        max_depth: usize,
        is_last: bool,
        prefix: &str,
        out: &mut String,
    ) {
        if depth > max_depth {
            return;
        }

        let target = match self.classify(path) {
            Classification::Leaf(leaf) => format!(" -> {}", leaf.base.display()),
            Classification::Internal | Classification::NotFound => String::new(),
        };

        let new_prefix = if depth == 0 {
            let _ = writeln!(out, "{name}{target}");
            prefix.to_string()
        } else {
            let connector = if is_last { "└── " } else { "├── " };
            let _ = writeln!(out, "{prefix}{connector}{name}{target}");
            format!("{}{}", prefix, if is_last { "    " } else { "│   " })
        };

        let Some(children) = self.list_children(path) else {
            return;
        };
        let total = children.len();
        for (index, child) in children.iter().enumerate() {
            let is_last = index == total - 1;
            self.render_node(
                &path.join(child),
                child,
                depth + 1,
                max_depth,
                is_last,
                &new_prefix,
                out,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaRecord, MediaType, TagKind};
    use crate::namespace::build;

    #[test]
    fn test_render_tree() {
        let namespace = build(vec![
            MediaRecord::new("/m/Alien", MediaType::Movie, "Alien")
                .unwrap()
                .with_tags(TagKind::Genre, ["Horror"])
                .unwrap(),
        ]);

        let rendered = namespace.render_tree(&VirtualPath::new("/Movies"), 3).unwrap();
        let expected = "\
Movies
├── byGenre
│   └── Horror
│       └── Alien -> /m/Alien
└── byTitle
    └── Alien -> /m/Alien
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_tree_depth_limit() {
        let namespace = build(vec![
            MediaRecord::new("/m/Alien", MediaType::Movie, "Alien").unwrap(),
        ]);
        let rendered = namespace.render_tree(&VirtualPath::root(), 1).unwrap();
        assert_eq!(rendered, "/\n└── Movies\n");
    }

    #[test]
    fn test_render_tree_rejects_leaf() {
        let namespace = build(vec![
            MediaRecord::new("/m/Alien", MediaType::Movie, "Alien").unwrap(),
        ]);
        assert!(namespace.render_tree(&VirtualPath::new("/Movies/byTitle/Alien"), 2).is_none());
    }
}
