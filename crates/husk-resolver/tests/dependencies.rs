use husk_resolver::dependencies::Dependencies;
use husk_resolver::dependency::Dependency;

const PATH: &str = "husk.dev/acme/hello";

fn dep(text: &str) -> Dependency {
    Dependency::parse(PATH, text).unwrap()
}

fn stored(deps: &Dependencies) -> String {
    deps.get(PATH).unwrap().constraint.to_string()
}

#[test]
fn test_range_sequence_and_conflict() {
    let mut deps = Dependencies::new();
    deps.add(dep("1.>=1.*")).unwrap();
    deps.add(dep("1.>=2.*")).unwrap();
    deps.add(dep("1.*.*")).unwrap();
    assert_eq!(stored(&deps), "1.>=2.*");

    let err = deps.add(dep("2.*.*")).unwrap_err();
    assert_eq!(err.existing.to_string(), "1.>=2.*");
    assert_eq!(err.incoming.to_string(), "2.*.*");
    assert_eq!(stored(&deps), "1.>=2.*");

    // failures do not accumulate
    assert!(deps.add(dep("2.*.*")).is_err());
    assert_eq!(stored(&deps), "1.>=2.*");
}

#[test]
fn test_conflict_message() {
    let mut deps = Dependencies::new();
    deps.add(dep("1.>=2.*")).unwrap();
    let err = deps.add(dep("2.*.*")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Can't add husk.dev/acme/hello (2.*.*) to existing dependency husk.dev/acme/hello (1.>=2.*)"
    );
}

#[test]
fn test_pinned_sequence() {
    let mut deps = Dependencies::new();
    deps.add(dep("git:ffa8e5f")).unwrap();
    deps.add(dep("git:ffa8e5f")).unwrap();
    assert_eq!(stored(&deps), "git:ffa8e5f");

    assert!(deps.add(dep("git:3602966")).is_err());
    assert!(deps.add(dep("hg:ffa8e5f")).is_err());
    assert!(deps.add(dep("*.*.*")).is_err());
    assert_eq!(stored(&deps), "git:ffa8e5f");
}

#[test]
fn test_range_then_pin_conflicts() {
    let mut deps = Dependencies::new();
    deps.add(dep("*.*.*")).unwrap();
    assert!(deps.add(dep("git:ffa8e5f")).is_err());
    assert_eq!(stored(&deps), "*.*.*");
}

#[test]
fn test_intersection_is_commutative_and_associative() {
    let inputs = ["1.>=1.*", ">=1.>=2.*", "*.*.>=3", "1.*.*"];
    let mut expected = None;
    for order in [[0, 1, 2, 3], [3, 2, 1, 0], [2, 0, 3, 1], [1, 3, 0, 2]] {
        let mut deps = Dependencies::new();
        for i in order {
            deps.add(dep(inputs[i])).unwrap();
        }
        let result = stored(&deps);
        match &expected {
            None => expected = Some(result),
            Some(e) => assert_eq!(&result, e),
        }
    }
    assert_eq!(expected.as_deref(), Some("1.>=2.>=3"));
}

#[test]
fn test_document_sorted_flat_with_trailing_newline() {
    let mut deps = Dependencies::new();
    deps.add(Dependency::parse("husk.dev/zeta/z", "*.*.*").unwrap()).unwrap();
    deps.add(Dependency::parse("husk.dev/acme/a", "git:ffa8e5f").unwrap()).unwrap();
    deps.add(Dependency::parse("husk.dev/acme/b", "1.>=2.*").unwrap()).unwrap();

    let text = deps.to_document();
    assert_eq!(
        text,
        "{\n  \"husk.dev/acme/a\": \"git:ffa8e5f\",\n  \"husk.dev/acme/b\": \"1.>=2.*\",\n  \"husk.dev/zeta/z\": \"*.*.*\"\n}\n"
    );
    assert_eq!(Dependencies::from_document(&text).unwrap(), deps);
    assert_eq!(
        deps.import_paths(),
        vec!["husk.dev/acme/a", "husk.dev/acme/b", "husk.dev/zeta/z"]
    );
    assert_eq!(
        deps.to_string(),
        "husk.dev/acme/a (git:ffa8e5f), husk.dev/acme/b (1.>=2.*), husk.dev/zeta/z (*.*.*)"
    );
}

#[test]
fn test_empty_document() {
    let deps = Dependencies::new();
    assert!(deps.is_empty());
    assert_eq!(deps.to_document(), "{}\n");
    assert!(Dependencies::from_document("{}").unwrap().is_empty());
}

#[test]
fn test_document_with_bad_constraint_fails() {
    assert!(Dependencies::from_document(r#"{"husk.dev/acme/a": "1.2"}"#).is_err());
    assert!(Dependencies::from_document(r#"["not", "a", "map"]"#).is_err());
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("husk-lock.json");
    let mut deps = Dependencies::new();
    deps.add(dep("git:ffa8e5f")).unwrap();
    deps.write_file(&path).unwrap();
    assert_eq!(Dependencies::read_file(&path).unwrap(), deps);
}
