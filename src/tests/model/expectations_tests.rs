use super::*;

#[test]
fn default_table_matches_the_documented_paths() {
    let table = ExpectationTable::default();
    assert_eq!(
        table.resources(),
        ["/index.html", "/foo/bar.html", "/images/uchicago/logo.png"]
    );
    assert_eq!(
        table.redirects(),
        [
            ExpectedRedirect::new("/cats", "http://en.wikipedia.org/wiki/Cat"),
            ExpectedRedirect::new("/uchicago/cs", "http://www.cs.uchicago.edu/"),
        ]
    );
    assert_eq!(
        table.nonexistent(),
        ["/stuff.html", "/foo", "/images/uchicago/log.png"]
    );
    table.validate().expect("default table is valid");
}

#[test]
fn new_rejects_path_in_two_sets() {
    let err = ExpectationTable::new(
        vec!["/index.html".to_string()],
        Vec::new(),
        vec!["/index.html".to_string()],
    )
    .unwrap_err();
    assert!(err.to_string().contains("appears more than once"));
}

#[test]
fn new_rejects_relative_paths_and_empty_locations() {
    let err = ExpectationTable::new(vec!["index.html".to_string()], Vec::new(), Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("must start with '/'"));

    let err = ExpectationTable::new(
        Vec::new(),
        vec![ExpectedRedirect::new("/cats", "  ")],
        Vec::new(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("empty location"));
}

#[test]
fn json_preserves_order_and_validates() {
    let table: ExpectationTable = serde_json::from_value(serde_json::json!({
        "resources": ["/b.html", "/a.html"],
        "redirects": [
            {"path": "/z", "location": "http://example.com/z"},
            {"path": "/y", "location": "http://example.com/y"}
        ]
    }))
    .expect("parse table");
    assert_eq!(table.resources(), ["/b.html", "/a.html"]);
    assert_eq!(table.redirects()[0].path, "/z");
    assert!(table.nonexistent().is_empty());

    let bad = serde_json::from_value::<ExpectationTable>(serde_json::json!({
        "resources": ["/a.html"],
        "nonexistent": ["/a.html"]
    }));
    assert!(bad.is_err());
}

#[test]
fn from_json_file_reports_the_path_on_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("expectations.json");
    std::fs::write(&path, "{ not json").expect("write file");

    let err = ExpectationTable::from_json_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("expectations.json"));
}

#[test]
fn new_rejects_paths_with_doubled_leading_slash() {
    let err = ExpectationTable::new(vec!["//index.html".to_string()], Vec::new(), Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("single '/'"));

    // `/a` and `//a` would reach the same resource.
    let err = ExpectationTable::new(
        vec!["/a".to_string()],
        Vec::new(),
        vec!["//a".to_string()],
    )
    .unwrap_err();
    assert!(err.to_string().contains("single '/'"));
}

#[test]
fn empty_table_is_rejected() {
    let err = ExpectationTable::new(Vec::new(), Vec::new(), Vec::new()).unwrap_err();
    assert!(err.to_string().contains("no paths"));

    let from_json = serde_json::from_value::<ExpectationTable>(serde_json::json!({}));
    assert!(from_json.is_err());
}
