use reef_core::content::{ContentStore, CONTENT_PATH};

#[test]
fn parses_a_full_payload() {
    let body = r#"{
        "introduction": {
            "title": "Hello",
            "description": "Welcome to the reef",
            "list": ["one", "two"]
        },
        "projects": {
            "title": "Projects",
            "description": "",
            "list": []
        }
    }"#;
    let store = ContentStore::from_json(body);
    assert_eq!(store.len(), 2);
    let intro = store.get("introduction").expect("introduction present");
    assert_eq!(intro.title, "Hello");
    assert_eq!(intro.list, vec!["one", "two"]);
    assert!(store.get("contact").is_none());
}

#[test]
fn missing_fields_default_to_empty() {
    let store = ContentStore::from_json(r#"{"stacks": {"title": "Stacks"}}"#);
    let stacks = store.get("stacks").expect("stacks present");
    assert_eq!(stacks.title, "Stacks");
    assert!(stacks.description.is_empty());
    assert!(stacks.list.is_empty());
}

#[test]
fn parse_surfaces_a_typed_error() {
    for body in ["", "not json", "[1, 2, 3]", r#"{"a": 5}"#] {
        let err = ContentStore::parse(body).expect_err("malformed payload accepted");
        assert!(
            err.to_string().starts_with("content payload unreadable"),
            "unexpected error text: {err}"
        );
    }
    assert!(ContentStore::parse(r#"{"contact": {"title": "Hi"}}"#).is_ok());
}

#[test]
fn malformed_payload_degrades_to_empty() {
    for body in ["", "not json", "[1, 2, 3]", r#"{"a": 5}"#] {
        let store = ContentStore::from_json(body);
        assert!(store.is_empty(), "expected empty store for {body:?}");
        assert!(store.get("introduction").is_none());
    }
}

#[test]
fn fetch_path_is_pinned() {
    assert_eq!(CONTENT_PATH, "/data/portfolioContent.json");
}
