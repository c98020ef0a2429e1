use std::cell::RefCell;

use husk_archive::archive::{Archive, Entry};
use husk_ops::ops_publish::publish;
use husk_registry::publish::Publisher;
use husk_util::errors::HuskError;
use url::Url;

#[derive(Default)]
struct RecordingPublisher {
    urls: RefCell<Vec<String>>,
}

impl Publisher for RecordingPublisher {
    fn put(&self, url: &Url, bytes: Vec<u8>) -> Result<String, HuskError> {
        assert!(Archive::read(&bytes).is_ok());
        self.urls.borrow_mut().push(url.to_string());
        Ok("Package published.".to_string())
    }
}

fn archive_file(dir: &std::path::Path) -> std::path::PathBuf {
    let bytes = Archive::from_entries(vec![
        Entry::new(
            "hello.go",
            "// Package hello says hello.\npackage hello\n",
            0o644,
        ),
        Entry::new(
            "husk.json",
            r#"{"Version": "0.3.1", "Vendor": "acme", "Authors": [{"FullName": "Jane Doe"}]}"#,
            0o644,
        ),
    ])
    .unwrap()
    .to_bytes()
    .unwrap();
    let path = dir.join("hello-0.3.1.husk");
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_publish_puts_each_archive() {
    let dir = tempfile::tempdir().unwrap();
    let file = archive_file(dir.path());
    let publisher = RecordingPublisher::default();

    let messages = publish(&[file.as_path()], "localhost:8080", "s3cret", &publisher).unwrap();
    assert_eq!(messages, vec!["Package published."]);
    assert_eq!(
        publisher.urls.borrow().as_slice(),
        ["http://localhost:8080/hello/0.3.1?token=s3cret"]
    );
}

#[test]
fn test_publish_requires_token() {
    let dir = tempfile::tempdir().unwrap();
    let file = archive_file(dir.path());
    let publisher = RecordingPublisher::default();

    let err = publish(&[file.as_path()], "localhost:8080", "", &publisher).unwrap_err();
    assert!(err.to_string().contains("No token given"));
    assert!(publisher.urls.borrow().is_empty());
}
