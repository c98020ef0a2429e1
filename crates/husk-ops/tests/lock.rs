use std::path::Path;

use husk_ops::ops_lock::{lock, write_document};
use husk_ops::vcs::VcsProbe;
use husk_ops::workspace::Workspace;
use husk_resolver::dependencies::{Dependencies, LOCK_FILE_NAME};
use husk_resolver::dependency::Vcs;
use husk_util::errors::HuskError;

/// Reports the repository directory name as its revision.
struct FakeProbe;

impl VcsProbe for FakeProbe {
    fn current_revision(&self, _vcs: Vcs, root: &Path) -> Result<String, HuskError> {
        Ok(format!(
            "rev-{}",
            root.file_name().unwrap().to_string_lossy()
        ))
    }
}

fn add_package(dir: &Path, name: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join(format!("{name}.go")),
        format!("package {name}\n"),
    )
    .unwrap();
}

#[test]
fn test_lock_pins_each_repository_once() {
    let ws_dir = tempfile::tempdir().unwrap();
    let src = ws_dir.path().join("src");

    let tools = src.join("example.org/tools");
    std::fs::create_dir_all(tools.join(".git")).unwrap();
    add_package(&tools.join("fmt"), "fmt");
    add_package(&tools.join("lint"), "lint");

    let web = src.join("example.org/web");
    std::fs::create_dir_all(web.join(".hg")).unwrap();
    add_package(&web, "web");

    add_package(&src.join("husk.dev/acme/plain"), "plain");

    let deps = lock(&Workspace::new(ws_dir.path()), &FakeProbe).unwrap();
    assert_eq!(
        deps.to_document(),
        "{\n  \"example.org/tools\": \"git:rev-tools\",\n  \"example.org/web\": \"hg:rev-web\"\n}\n"
    );
}

#[test]
fn test_lock_document_round_trip() {
    let ws_dir = tempfile::tempdir().unwrap();
    let repo = ws_dir.path().join("src/example.org/tools");
    std::fs::create_dir_all(repo.join(".bzr")).unwrap();
    add_package(&repo, "tools");

    let deps = lock(&Workspace::new(ws_dir.path()), &FakeProbe).unwrap();
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join(LOCK_FILE_NAME);
    write_document(&deps, &path).unwrap();

    let read = Dependencies::read_file(&path).unwrap();
    let dep = read.get("example.org/tools").unwrap();
    assert!(dep.constraint.is_pinned());
    assert_eq!(dep.constraint.to_string(), "bzr:rev-tools");
}

#[test]
fn test_lock_empty_workspace() {
    let ws_dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(ws_dir.path().join("src")).unwrap();
    let deps = lock(&Workspace::new(ws_dir.path()), &FakeProbe).unwrap();
    assert!(deps.is_empty());
}
