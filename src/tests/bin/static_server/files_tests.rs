use super::*;

fn www() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("foo")).expect("mkdir foo");
    std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").expect("write index");
    std::fs::write(dir.path().join("foo/bar.html"), "bar").expect("write bar");
    dir
}

#[tokio::test]
async fn resolves_regular_files_only() {
    let root = www();
    assert_eq!(
        resolve_file(root.path(), "/index.html").await,
        Some(root.path().join("index.html"))
    );
    assert_eq!(
        resolve_file(root.path(), "/foo/bar.html").await,
        Some(root.path().join("foo/bar.html"))
    );
    assert_eq!(resolve_file(root.path(), "/foo").await, None);
    assert_eq!(resolve_file(root.path(), "/").await, None);
    assert_eq!(resolve_file(root.path(), "/stuff.html").await, None);
}

#[tokio::test]
async fn rejects_paths_escaping_root() {
    let root = www();
    let inner = root.path().join("foo");
    assert_eq!(resolve_file(&inner, "/../index.html").await, None);
    assert_eq!(resolve_file(&inner, "/./bar.html").await, None);
}

#[test]
fn content_type_by_extension() {
    assert_eq!(content_type(Path::new("a/index.html")), "text/html; charset=utf-8");
    assert_eq!(content_type(Path::new("logo.png")), "image/png");
    assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
}
