use super::*;
use crate::error::{Collection, Error};
use std::path::PathBuf;

fn f(path: &str) -> AudioFileRef {
    AudioFileRef::new(path)
}

fn paths(files: &[AudioFileRef]) -> Vec<PathBuf> {
    files.iter().map(|f| f.path().to_path_buf()).collect()
}

#[test]
fn display_name_is_final_path_segment() {
    assert_eq!(f("/music/sub/song2.wav").display_name(), "song2.wav");
    assert_eq!(f("/").display_name(), "/");
}

#[test]
fn file_refs_compare_by_path() {
    assert_eq!(f("/a.wav"), f("/a.wav"));
    assert_ne!(f("/a.wav"), f("/b.wav"));
}

#[test]
fn extension_set_normalizes_entries() {
    let exts = ExtensionSet::new(&[" .WAV ", "flac", "", "wav"]);
    assert!(exts.matches(std::path::Path::new("/x/a.wav")));
    assert!(exts.matches(std::path::Path::new("/x/a.Flac")));
    assert!(!exts.matches(std::path::Path::new("/x/a.mp3")));
    assert!(!exts.matches(std::path::Path::new("/x/wav")));
}

#[test]
fn initialize_dedups_each_collection_keeping_first() {
    let mut lib = Library::new();
    lib.initialize(
        vec![f("/a.wav"), f("/b.wav"), f("/a.wav"), f("/c.wav"), f("/b.wav")],
        vec![f("/c.wav"), f("/c.wav"), f("/outside.wav")],
    );
    assert_eq!(
        paths(lib.list_all()),
        paths(&[f("/a.wav"), f("/b.wav"), f("/c.wav")])
    );
    assert_eq!(
        paths(lib.list_favorites()),
        paths(&[f("/c.wav"), f("/outside.wav")])
    );
}

#[test]
fn favorites_may_point_outside_all_files() {
    let mut lib = Library::new();
    lib.initialize(vec![f("/a.wav")], vec![f("/elsewhere.wav"), f("/a.wav")]);
    assert!(lib.is_orphan(std::path::Path::new("/elsewhere.wav")));
    assert!(!lib.is_orphan(std::path::Path::new("/a.wav")));
    assert!(!lib.is_orphan(std::path::Path::new("/not-a-favorite.wav")));
}

#[test]
fn extend_all_only_adds_untracked_files() {
    let mut lib = Library::new();
    lib.initialize(vec![f("/a.wav")], vec![]);
    let added = lib.extend_all(vec![f("/b.wav"), f("/a.wav"), f("/b.wav"), f("/c.wav")]);
    assert_eq!(added, 2);
    assert_eq!(
        paths(lib.list_all()),
        paths(&[f("/a.wav"), f("/b.wav"), f("/c.wav")])
    );
}

#[test]
fn add_favorite_twice_reports_already_favorite_and_keeps_list() {
    let mut lib = Library::new();
    lib.initialize(vec![f("/a.wav"), f("/b.wav")], vec![]);

    lib.add_favorite(Some(&f("/b.wav"))).unwrap();
    lib.add_favorite(Some(&f("/a.wav"))).unwrap();
    let err = lib.add_favorite(Some(&f("/b.wav"))).unwrap_err();

    assert!(matches!(err, Error::AlreadyFavorite(ref name) if name == "b.wav"));
    assert_eq!(
        paths(lib.list_favorites()),
        paths(&[f("/b.wav"), f("/a.wav")])
    );
}

#[test]
fn add_favorite_without_selection_fails() {
    let mut lib = Library::new();
    assert!(matches!(lib.add_favorite(None), Err(Error::NothingSelected)));
    assert_eq!(lib.len_favorites(), 0);
}

#[test]
fn remove_favorite_by_index_or_path() {
    let mut lib = Library::new();
    lib.initialize(vec![], vec![f("/a.wav"), f("/b.wav"), f("/c.wav")]);

    let removed = lib.remove_favorite(1).unwrap();
    assert_eq!(removed, f("/b.wav"));

    let removed = lib.remove_favorite(&f("/c.wav")).unwrap();
    assert_eq!(removed, f("/c.wav"));
    assert_eq!(paths(lib.list_favorites()), paths(&[f("/a.wav")]));
}

#[test]
fn remove_favorite_reports_not_found() {
    let mut lib = Library::new();
    lib.initialize(vec![f("/a.wav")], vec![f("/a.wav")]);

    assert!(matches!(
        lib.remove_favorite(5),
        Err(Error::NotFound(Collection::Favorites))
    ));
    assert!(matches!(
        lib.remove_favorite(Target::Path("/b.wav".into())),
        Err(Error::NotFound(Collection::Favorites))
    ));
    assert_eq!(lib.len_favorites(), 1);
}

#[test]
fn remove_from_all_also_drops_the_favorite() {
    let mut lib = Library::new();
    lib.initialize(
        vec![f("/a.wav"), f("/b.wav"), f("/c.wav")],
        vec![f("/c.wav"), f("/b.wav")],
    );

    let removal = lib.remove_from_all(1).unwrap();
    assert_eq!(removal.file, f("/b.wav"));
    assert!(removal.was_favorite);
    assert!(!lib.is_favorite(std::path::Path::new("/b.wav")));
    assert!(!lib.contains(std::path::Path::new("/b.wav")));
    assert_eq!(paths(lib.list_favorites()), paths(&[f("/c.wav")]));
}

#[test]
fn remove_from_all_leaves_unrelated_favorites_alone() {
    let mut lib = Library::new();
    lib.initialize(
        vec![f("/a.wav"), f("/b.wav")],
        vec![f("/b.wav"), f("/orphan.wav")],
    );

    let removal = lib.remove_from_all(&f("/a.wav")).unwrap();
    assert!(!removal.was_favorite);
    assert_eq!(
        paths(lib.list_favorites()),
        paths(&[f("/b.wav"), f("/orphan.wav")])
    );
}

#[test]
fn remove_from_all_reports_not_found_for_orphans_and_bad_indices() {
    let mut lib = Library::new();
    lib.initialize(vec![f("/a.wav")], vec![f("/orphan.wav")]);

    assert!(matches!(
        lib.remove_from_all(&f("/orphan.wav")),
        Err(Error::NotFound(Collection::All))
    ));
    assert!(matches!(
        lib.remove_from_all(1),
        Err(Error::NotFound(Collection::All))
    ));
    assert_eq!(lib.len_all(), 1);
    assert_eq!(lib.len_favorites(), 1);
}

#[test]
fn removed_file_can_be_rediscovered() {
    let mut lib = Library::new();
    lib.initialize(vec![f("/a.wav")], vec![]);
    lib.remove_from_all(0).unwrap();
    assert_eq!(lib.extend_all(vec![f("/a.wav")]), 1);
}

#[test]
fn row_label_uses_name_path_and_marker() {
    let file = f("/music/song.wav");
    assert_eq!(row_label(&file, false, None), "song.wav");
    assert_eq!(row_label(&file, true, None), "/music/song.wav");
    assert_eq!(row_label(&file, false, Some("*")), "* song.wav");
    assert_eq!(row_label(&file, false, Some("  ")), "song.wav");
}

#[cfg(unix)]
#[test]
fn normalize_path_drops_dot_segments_lexically() {
    use super::model::normalize_path;
    use std::path::Path;

    assert_eq!(
        normalize_path(Path::new("/music/sub/../other/./a.wav")),
        PathBuf::from("/music/other/a.wav")
    );
    assert_eq!(normalize_path(Path::new("/../a.wav")), PathBuf::from("/a.wav"));
    assert!(normalize_path(Path::new("rel/a.wav")).is_absolute());
}

#[cfg(unix)]
#[test]
fn resolve_file_path_canonicalizes_the_parent_only() {
    use super::model::resolve_file_path;
    use std::fs;

    let dir = tempfile::tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("real.wav"), b"x").unwrap();
    std::os::unix::fs::symlink(root.join("real.wav"), root.join("link.wav")).unwrap();

    assert_eq!(
        resolve_file_path(&root.join("sub").join("..").join("real.wav")),
        root.join("real.wav")
    );
    assert_eq!(resolve_file_path(&root.join("link.wav")), root.join("link.wav"));
}
