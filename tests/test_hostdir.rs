use depot::hostdir::{HostDir, file_name};
use std::fs;
use std::path::PathBuf;

fn temp_root(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("depot-hostdir-{}-{tag}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_file_name_takes_final_segment() {
    assert_eq!(file_name("/foo.txt"), Some("foo.txt"));
    assert_eq!(file_name("/a/b/c"), Some("c"));
    assert_eq!(file_name("/"), None);
    assert_eq!(file_name("/."), None);
    assert_eq!(file_name("/.."), None);
}

#[test]
fn test_exists_is_a_listing_membership_check() {
    let root = temp_root("exists");
    fs::write(root.join("present.txt"), b"x").unwrap();
    let store = HostDir::new(root);

    assert!(store.exists("/present.txt"));
    // Only the basename matters, nesting in the target is irrelevant.
    assert!(store.exists("/deeply/nested/present.txt"));
    assert!(!store.exists("/absent.txt"));
    assert!(!store.exists("/"));
}

#[test]
fn test_missing_root_yields_false_not_error() {
    let store = HostDir::new(temp_root("missing").join("nope"));

    assert!(!store.dir_exists());
    assert!(!store.exists("/anything"));
    assert!(!store.write("/anything", b"data"));
}

#[test]
fn test_write_read_roundtrip_is_binary_safe() {
    let store = HostDir::new(temp_root("binary"));
    let payload = vec![0u8, 159, 146, 150, 255, b'\n', 0];

    assert!(store.write("/blob.bin", &payload));
    assert_eq!(store.read("/blob.bin").unwrap(), payload);
}

#[test]
fn test_write_truncates_existing_file() {
    let store = HostDir::new(temp_root("truncate"));

    assert!(store.write("/f.txt", b"a much longer body to be replaced"));
    assert!(store.write("/f.txt", b"short"));
    assert_eq!(store.read("/f.txt").unwrap(), b"short");
}

#[test]
fn test_traversal_targets_stay_inside_the_root() {
    let root = temp_root("traversal");
    let store = HostDir::new(root.clone());

    assert!(store.write("/../escape.txt", b"contained"));
    assert!(root.join("escape.txt").is_file());
    assert!(!root.parent().unwrap().join("escape.txt").exists());

    // A target with no usable basename is refused outright.
    assert!(!store.write("/..", b"nope"));
    assert!(store.read("/..").is_err());
}

#[test]
fn test_dir_exists_tracks_the_directory() {
    let root = temp_root("direxists");
    let store = HostDir::new(root.clone());

    assert!(store.dir_exists());
    fs::remove_dir_all(&root).unwrap();
    assert!(!store.dir_exists());
}
