use std::path::Path;

use husk_archive::archive::Archive;
use husk_core::spec::SPEC_FILE_NAME;
use husk_ops::ops_check::check;
use husk_ops::ops_pack::pack;
use husk_ops::ops_unpack::unpack;

const SPEC: &str = r#"{"Version": "1.0.0", "Vendor": "acme", "Authors": [{"FullName": "Jane Doe"}], "ExtraFiles": ["LICENSE"]}"#;

fn write_package(dir: &Path, name: &str, spec: &str) {
    std::fs::write(
        dir.join(format!("{name}.go")),
        format!("// Package {name} says hello.\npackage {name}\n\nimport \"fmt\"\n"),
    )
    .unwrap();
    std::fs::write(
        dir.join(format!("{name}_test.go")),
        format!("package {name}\n\nimport \"testing\"\n"),
    )
    .unwrap();
    std::fs::write(dir.join("LICENSE"), "MIT\n").unwrap();
    std::fs::write(dir.join(SPEC_FILE_NAME), spec).unwrap();
}

#[test]
fn test_pack_writes_canonical_archive() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "hello", SPEC);
    std::fs::write(dir.path().join("notes.txt"), "not packed").unwrap();

    let path = pack(dir.path(), None, true).unwrap();
    assert_eq!(path, dir.path().join("hello-1.0.0.husk"));

    let archive = Archive::read_file(&path).unwrap();
    assert_eq!(
        archive.entry_names(),
        vec!["hello.go", "hello_test.go", "LICENSE", "husk.json"]
    );
}

#[test]
fn test_pack_to_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "hello", SPEC);

    let path = pack(dir.path(), Some(Path::new("out.husk")), true).unwrap();
    assert_eq!(path, dir.path().join("out.husk"));
    assert!(path.is_file());
}

#[test]
fn test_pack_refuses_invalid_package() {
    let dir = tempfile::tempdir().unwrap();
    write_package(
        dir.path(),
        "hello",
        r#"{"Version": "1.0.0", "Vendor": "Acme", "Authors": [{"FullName": "Jane Doe"}], "ExtraFiles": ["LICENSE"]}"#,
    );

    let err = pack(dir.path(), None, true).unwrap_err();
    assert!(err.to_string().contains("Vendor should contain only lower word characters"));
    assert!(!dir.path().join("hello-1.0.0.husk").exists());

    assert!(pack(dir.path(), None, false).is_ok());
}

#[test]
fn test_pack_refuses_executables() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "main", SPEC);
    assert!(pack(dir.path(), None, false).is_err());
}

#[test]
fn test_unpack_respects_force() {
    let src = tempfile::tempdir().unwrap();
    write_package(src.path(), "hello", SPEC);
    let archive = pack(src.path(), None, true).unwrap();

    let dest = tempfile::tempdir().unwrap();
    unpack(dest.path(), &archive, false, true).unwrap();
    assert_eq!(
        std::fs::read_to_string(dest.path().join("LICENSE")).unwrap(),
        "MIT\n"
    );

    assert!(unpack(dest.path(), &archive, false, true).is_err());
    unpack(dest.path(), &archive, true, true).unwrap();
}

#[test]
fn test_check_spec_and_archive() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "hello", SPEC);
    pack(dir.path(), None, true).unwrap();

    check(
        dir.path(),
        &["husk.json".to_string(), "hello-1.0.0.husk".to_string()],
    )
    .unwrap();
}

#[test]
fn test_check_reports_issues() {
    let dir = tempfile::tempdir().unwrap();
    write_package(
        dir.path(),
        "hello",
        r#"{"Version": "0.0.0", "Vendor": "acme", "ExtraFiles": ["LICENSE"]}"#,
    );

    let err = check(dir.path(), &["husk.json".to_string()]).unwrap_err();
    let text = err.to_string();
    assert!(text.contains(r#"Version "0.0.0" is invalid."#), "{text}");
    assert!(text.contains("No authors given."), "{text}");
}

#[test]
fn test_check_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let err = check(dir.path(), &["hello.tar".to_string()]).unwrap_err();
    assert!(err.to_string().contains("doesn't end with .json or .husk"));
}
