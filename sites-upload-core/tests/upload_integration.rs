use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use sites_upload_core::contract::MockTransport;
use sites_upload_core::{Authenticator, Error, FileManager, Site};
use tempfile::tempdir;

type Calls = Arc<Mutex<Vec<(String, String, Vec<u8>)>>>;

/// Lays out a small built-docs tree: two pages, a stylesheet and an empty directory.
fn write_html_tree(root: &Path) {
    fs::create_dir_all(root.join("_static")).unwrap();
    fs::create_dir_all(root.join("search")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("index.html"), "<h1>Atlas</h1>").unwrap();
    fs::write(root.join("_static/style.css"), "body {}").unwrap();
    fs::write(root.join("search/index.html"), "<p>search</p>").unwrap();
}

fn recording_transport(calls: Calls) -> MockTransport {
    let mut transport = MockTransport::new();
    transport
        .expect_put_file()
        .returning(move |site: &Site, remote_path: &str, contents: Vec<u8>| {
            calls
                .lock()
                .unwrap()
                .push((site.path(), remote_path.to_owned(), contents));
            Ok(())
        });
    transport
}

#[tokio::test]
async fn test_upload_puts_every_file_under_atlas_docs() {
    let html = tempdir().unwrap();
    write_html_tree(html.path());

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let manager = FileManager::new(
        Site::atlas_docs(Authenticator::from_token("abc123")),
        recording_transport(calls.clone()),
    );

    let report = manager
        .upload(html.path())
        .await
        .expect("Upload should succeed");

    let calls = calls.lock().unwrap();
    let paths: Vec<&str> = calls.iter().map(|(_, p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        vec!["_static/style.css", "index.html", "search/index.html"],
        "Each regular file should be uploaded once, in sorted walk order"
    );
    assert!(calls.iter().all(|(site, _, _)| site == "docs/atlas"));
    assert_eq!(calls[1].2, b"<h1>Atlas</h1>".to_vec());

    assert_eq!(report.site, "docs/atlas");
    assert_eq!(report.file_count(), 3);
    assert_eq!(report.bytes, (7 + 14 + 13) as u64);
}

#[tokio::test]
async fn test_upload_of_empty_directory_sends_nothing() {
    let html = tempdir().unwrap();

    let mut transport = MockTransport::new();
    transport.expect_put_file().never();

    let manager = FileManager::new(
        Site::atlas_docs(Authenticator::from_credentials("alice", "secret")),
        transport,
    );
    let report = manager.upload(html.path()).await.expect("Empty upload succeeds");

    assert_eq!(report.file_count(), 0);
    assert_eq!(report.bytes, 0);
}

#[tokio::test]
async fn test_upload_rejects_missing_directory_before_any_transfer() {
    let parent = tempdir().unwrap();
    let missing = parent.path().join("build/html");

    let mut transport = MockTransport::new();
    transport.expect_put_file().never();

    let manager = FileManager::new(
        Site::atlas_docs(Authenticator::from_token("abc123")),
        transport,
    );
    let err = manager.upload(&missing).await.unwrap_err();

    assert!(
        matches!(err, Error::NotADirectory(ref p) if p == &missing),
        "Expected NotADirectory, got: {err:?}"
    );
}

#[tokio::test]
async fn test_upload_stops_at_first_transport_failure() {
    let html = tempdir().unwrap();
    write_html_tree(html.path());

    let mut transport = MockTransport::new();
    transport
        .expect_put_file()
        .times(1)
        .returning(|_, _, _| Err("503 Service Unavailable".into()));

    let manager = FileManager::new(
        Site::atlas_docs(Authenticator::from_token("abc123")),
        transport,
    );
    let err = manager.upload(html.path()).await.unwrap_err();

    match err {
        Error::Transport {
            site,
            remote_path,
            source,
        } => {
            assert_eq!(site, "docs/atlas");
            assert_eq!(remote_path, "_static/style.css");
            assert_eq!(source.to_string(), "503 Service Unavailable");
        }
        other => panic!("Expected a transport error, got: {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_upload_follows_symlinked_files_and_directories() {
    use std::os::unix::fs::symlink;

    let shared = tempdir().unwrap();
    fs::write(shared.path().join("shared.css"), "p {}").unwrap();
    fs::create_dir_all(shared.path().join("fonts")).unwrap();
    fs::write(shared.path().join("fonts/atlas.woff"), "font").unwrap();

    let html = tempdir().unwrap();
    fs::write(html.path().join("index.html"), "<h1>Atlas</h1>").unwrap();
    symlink(shared.path().join("shared.css"), html.path().join("shared.css")).unwrap();
    symlink(shared.path().join("fonts"), html.path().join("fonts")).unwrap();

    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let manager = FileManager::new(
        Site::atlas_docs(Authenticator::from_token("abc123")),
        recording_transport(calls.clone()),
    );

    let report = manager
        .upload(html.path())
        .await
        .expect("Upload should succeed");

    assert_eq!(
        report.remote_paths,
        vec!["fonts/atlas.woff", "index.html", "shared.css"],
        "Symlinked entries should be uploaded as their targets"
    );
    let calls = calls.lock().unwrap();
    let shared_css = calls
        .iter()
        .find(|(_, path, _)| path == "shared.css")
        .expect("shared.css should be uploaded");
    assert_eq!(shared_css.2, b"p {}".to_vec());
}

#[cfg(unix)]
#[tokio::test]
async fn test_upload_fails_on_dangling_symlink() {
    use std::os::unix::fs::symlink;

    let html = tempdir().unwrap();
    symlink(html.path().join("gone.html"), html.path().join("broken.html")).unwrap();

    let mut transport = MockTransport::new();
    transport.expect_put_file().never();

    let manager = FileManager::new(
        Site::atlas_docs(Authenticator::from_token("abc123")),
        transport,
    );
    let err = manager.upload(html.path()).await.unwrap_err();

    assert!(
        matches!(err, Error::Walk { .. }),
        "Expected a walk error, got: {err:?}"
    );
}
