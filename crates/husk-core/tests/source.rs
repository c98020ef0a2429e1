use husk_core::source::{
    check_entry_name, check_package, DirSource, MetadataProvider, PackageSource, SourceScanner,
};

fn write(dir: &std::path::Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).unwrap();
}

#[test]
fn test_dir_source_lists_regular_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.go", "package b\n");
    write(dir.path(), "a.go", "package b\n");
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let source = DirSource::new(dir.path());
    let names: Vec<_> = source
        .list_entries()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["a.go", "b.go"]);
    assert_eq!(source.open_entry("a.go").unwrap(), b"package b\n");
    assert!(source.open_entry("../a.go").is_err());
    assert!(source.open_entry("sub/x").is_err());
}

#[test]
fn test_scanner_reads_package_metadata() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "hello.go",
        "// Package hello says hello.\npackage hello\n\nimport (\n\t\"fmt\"\n\t\"husk.dev/acme/util\"\n)\n",
    );
    write(dir.path(), "extra.go", "package hello\n\nimport \"fmt\"\n");
    write(
        dir.path(),
        "hello_test.go",
        "package hello_test\n\nimport \"testing\"\n",
    );
    write(dir.path(), "_ignored.go", "package other\n");
    write(dir.path(), ".hidden.go", "package other\n");
    write(dir.path(), "README", "not source\n");

    let info = SourceScanner.inspect(&DirSource::new(dir.path())).unwrap();
    assert_eq!(info.name, "hello");
    assert_eq!(info.doc, "Package hello says hello.");
    assert_eq!(info.imports, vec!["fmt", "husk.dev/acme/util"]);
    assert_eq!(info.test_imports, vec!["testing"]);
    assert_eq!(info.source_files, vec!["extra.go", "hello.go"]);
    assert_eq!(info.test_files, vec!["hello_test.go"]);
    assert!(info.naming_errors.is_empty(), "{:?}", info.naming_errors);
    assert_eq!(
        info.all_imports(),
        vec!["fmt", "husk.dev/acme/util", "testing"]
    );
}

#[test]
fn test_scanner_rejects_mixed_packages() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.go", "package a\n");
    write(dir.path(), "b.go", "package b\n");
    let err = SourceScanner
        .inspect(&DirSource::new(dir.path()))
        .unwrap_err();
    assert!(err.to_string().contains("Found packages a and b"));
}

#[test]
fn test_scanner_requires_sources() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "only_test.go", "package x\n");
    assert!(SourceScanner.inspect(&DirSource::new(dir.path())).is_err());
}

#[test]
fn test_check_package_naming() {
    assert!(check_package("hello", "Package hello says hello.").is_empty());

    let issues = check_package("Hello_", "");
    assert_eq!(issues.len(), 3, "{issues:?}");
    assert!(issues[0].contains("lower case"));
    assert!(issues[1].contains(r#"end with "_""#));
    assert!(issues[2].contains("Package summary"));

    let issues = check_package("_x_test", "Package _x_test does it.");
    assert_eq!(issues.len(), 2, "{issues:?}");
    assert!(issues[0].contains(r#"start with "_""#));
    assert!(issues[1].contains(r#"end with "_test""#));
}

#[test]
fn test_summary_requires_sentence_after_name() {
    assert_eq!(check_package("hello", "Package hello.").len(), 1);
    assert_eq!(check_package("hello", "Package hellos are good.").len(), 1);
}

#[test]
fn test_entry_names_must_stay_inside_the_package() {
    for name in ["notes..txt", "a..b.go", "..hidden", ".profile"] {
        assert!(check_entry_name(name).is_ok(), "{name}");
    }
    for name in ["", ".", "..", "../a.go", "dir/a.go", "a\\b"] {
        assert!(check_entry_name(name).is_err(), "{name}");
    }
}
