use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mediaview::fuse::MediaviewFs;
use mediaview::namespace::Leaf;
use mediaview::scan::SkipCollector;
use mediaview::{Classification, MediaLibrary, VirtualPath};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn movie(title: &str, genres: &[&str]) -> String {
    let genres: String = genres
        .iter()
        .map(|genre| format!("  <genre>{genre}</genre>\n"))
        .collect();
    format!("<?xml version=\"1.0\"?>\n<movie>\n  <title>{title}</title>\n{genres}</movie>\n")
}

fn tvshow(title: &str, genres: &[&str]) -> String {
    movie(title, genres).replace("movie>", "tvshow>")
}

/// A small library: two movies, one show with an episode document, and a
/// couple of documents that cannot be used.
fn library_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "Movies/Inception (2010)/movie.nfo", &movie("Inception", &["Sci-Fi", "Thriller"]));
    write(root, "Movies/Inception (2010)/Inception.mkv", "inception");
    write(root, "Movies/Heat (1995)/movie.nfo", &movie("Heat", &["Crime"]));
    write(root, "Movies/Heat (1995)/Heat.mkv", "heat");
    write(root, "Shows/Lost/tvshow.nfo", &tvshow("Lost", &["Sci-Fi"]));
    write(
        root,
        "Shows/Lost/Season 1/S01E01.nfo",
        "<episodedetails><title>Pilot</title></episodedetails>",
    );
    write(root, "Shows/Lost/Season 1/S01E01.mkv", "pilot");
    write(root, "Broken/movie.nfo", "<movie><title>Broken</movie>");
    write(root, "Untitled/movie.nfo", "<movie><genre>Drama</genre></movie>");
    dir
}

#[test]
fn test_load_builds_every_view() {
    let dir = library_tree();
    let library = MediaLibrary::load(dir.path()).unwrap();
    let root = library.root().to_path_buf();

    assert_eq!(library.report().parsed, 3);
    assert_eq!(library.report().skipped, 3);

    let children = |path: &str| -> Vec<String> {
        library
            .list_children(&VirtualPath::new(path))
            .unwrap()
            .iter()
            .cloned()
            .collect()
    };
    assert_eq!(children("/"), vec!["Movies", "TV Shows"]);
    assert_eq!(children("/Movies"), vec!["byGenre", "byTitle"]);
    assert_eq!(children("/Movies/byTitle"), vec!["Heat", "Inception"]);
    assert_eq!(children("/Movies/byGenre"), vec!["Crime", "Sci-Fi", "Thriller"]);
    assert_eq!(children("/TV Shows/byGenre/Sci-Fi"), vec!["Lost"]);

    assert_eq!(
        library.classify(&VirtualPath::new("/Movies/byGenre/Thriller/Inception/Inception.mkv")),
        Classification::Leaf(Leaf::new(root.join("Movies/Inception (2010)"), "Inception.mkv"))
    );
    assert_eq!(
        library.classify(&VirtualPath::new("/TV Shows/byTitle/Lost/Season 1")),
        Classification::Leaf(Leaf::new(root.join("Shows/Lost"), "Season 1"))
    );
    assert_eq!(
        library.classify(&VirtualPath::new("/Movies/byTitle/Broken")),
        Classification::NotFound
    );
}

#[test]
fn test_every_leaf_points_at_an_existing_directory() {
    let dir = library_tree();
    let library = MediaLibrary::load(dir.path()).unwrap();
    let namespace = library.namespace();

    assert!(!namespace.paths().is_empty());
    for (leaf, base) in namespace.paths() {
        assert!(base.is_dir(), "{leaf} -> {}", base.display());
        assert!(!namespace.is_internal(leaf));
        let label = leaf.segments().next().unwrap();
        assert!(label == "Movies" || label == "TV Shows");
    }
}

#[test]
fn test_skipped_documents_are_reported() {
    let dir = library_tree();
    let collector = Arc::new(SkipCollector::new());
    let library = MediaLibrary::load_with_observer(dir.path(), collector.clone()).unwrap();

    let skipped: Vec<PathBuf> = collector
        .skipped()
        .into_iter()
        .map(|(path, _)| PathBuf::from(path))
        .collect();
    assert_eq!(skipped.len(), library.report().skipped);
    assert!(skipped.iter().any(|path| path.ends_with("Broken/movie.nfo")));
    assert!(skipped.iter().any(|path| path.ends_with("Untitled/movie.nfo")));
    assert!(skipped.iter().any(|path| path.ends_with("Season 1/S01E01.nfo")));
}

#[test]
fn test_later_document_wins_title_collision() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/Alien (1979)/movie.nfo", &movie("Alien", &["Horror"]));
    write(dir.path(), "b/Alien (2003 cut)/movie.nfo", &movie("Alien", &["Horror"]));

    let library = MediaLibrary::load(dir.path()).unwrap();
    let root = library.root().to_path_buf();
    assert_eq!(library.namespace().collisions(), 2);
    assert_eq!(
        library.classify(&VirtualPath::new("/Movies/byTitle/Alien")),
        Classification::Leaf(Leaf::new(root.join("b/Alien (2003 cut)"), ""))
    );
}

#[test]
fn test_shallower_document_wins_over_nested_one() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Show/a.nfo", &movie("Dup", &["Drama"]));
    write(dir.path(), "Show/sub/movie.nfo", &movie("Dup", &["Drama"]));

    let library = MediaLibrary::load(dir.path()).unwrap();
    let root = library.root().to_path_buf();
    assert_eq!(
        library.classify(&VirtualPath::new("/Movies/byTitle/Dup")),
        Classification::Leaf(Leaf::new(root.join("Show"), ""))
    );
    assert_eq!(
        library.classify(&VirtualPath::new("/Movies/byGenre/Drama/Dup/sub")),
        Classification::Leaf(Leaf::new(root.join("Show"), "sub"))
    );
}

#[test]
fn test_filesystem_serves_real_files_read_only() {
    let dir = library_tree();
    let library = Arc::new(MediaLibrary::load(dir.path()).unwrap());
    let mut fs = MediaviewFs::new(library);

    let episode = VirtualPath::new("/TV Shows/byGenre/Sci-Fi/Lost/Season 1/S01E01.mkv");
    let node = fs.stat(&episode).unwrap();
    let attr = fs.file_attr(2, &node);
    assert_eq!(attr.size, 5);
    assert_eq!(attr.perm & 0o222, 0);

    let fh = fs.open_path(&episode, libc::O_RDONLY).unwrap();
    assert_eq!(fs.read_handle(fh, 0, 64).unwrap(), b"pilot");
    fs.release_handle(fh).unwrap();

    let names: Vec<String> = fs
        .entries_of(&VirtualPath::new("/TV Shows/byTitle/Lost"))
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec![".", "..", "Season 1", "tvshow.nfo"]);
}

#[test]
fn test_missing_root_fails_to_load() {
    let dir = TempDir::new().unwrap();
    assert!(MediaLibrary::load(dir.path().join("missing")).is_err());
}
