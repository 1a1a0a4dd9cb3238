//! Tests for the viewing session lifecycle
//!
//! These tests verify the replace-wholesale loading contract:
//! - A successful load installs the new tree and selects its root
//! - A failed load or reload leaves document and selection untouched
//! - Ids from a replaced tree are rejected instead of resolving wrongly

use std::path::PathBuf;

use tempfile::TempDir;

use sxv::outline::OutlineError;
use sxv::session::{SessionError, ViewerSession};
use sxv::util::testing;

/// Helper to write a document into the temp dir
fn create_sexpr_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test document");
    path
}

// ============================================================
// Loading Tests
// ============================================================

#[test]
fn given_valid_document_when_loading_then_selection_starts_at_root() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let file = create_sexpr_file(&temp, "net.sexpr", "(a (b 1) (c (d 2)))");
    let mut session = ViewerSession::default();

    // Act
    session.load(&file).unwrap();

    // Assert
    let doc = session.document().unwrap();
    assert_eq!(doc.path(), file.as_path());
    assert_eq!(doc.tree().node_count(), 4);
    assert_eq!(session.selected(), doc.tree().root());
    assert_eq!(session.selected_path().unwrap(), "a");
    assert_eq!(session.selected_payload().unwrap(), "(a (b 1) (c (d 2)))");
}

#[test]
fn given_loaded_session_when_selecting_by_child_path_then_path_and_payload_follow() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let file = create_sexpr_file(&temp, "net.sexpr", "(a (b 1) (c (d 2)))");
    let mut session = ViewerSession::default();
    session.load(&file).unwrap();

    // Act - second child of the root, then its first child
    session.select_at(&[1, 0]).unwrap();

    // Assert
    assert_eq!(session.selected_path().unwrap(), "a >> c >> d");
    assert_eq!(session.selected_payload().unwrap(), "(d 2)");
}

#[test]
fn given_loaded_session_when_selecting_missing_path_then_reports_the_path() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let file = create_sexpr_file(&temp, "net.sexpr", "(a (b 1))");
    let mut session = ViewerSession::default();
    session.load(&file).unwrap();

    // Act
    let result = session.select_at(&[0, 3]);

    // Assert - the offending path is echoed and the selection stays put
    match result {
        Err(SessionError::NoSuchNode { path }) => assert_eq!(path, vec![0, 3]),
        other => panic!("expected NoSuchNode, got {other:?}"),
    }
    assert_eq!(session.selected_path().unwrap(), "a");
}

#[test]
fn given_missing_file_when_loading_then_reports_read_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.sexpr");
    let mut session = ViewerSession::default();

    // Act
    let err = session.load(&missing).unwrap_err();

    // Assert
    assert!(matches!(err, SessionError::Parse(_)));
    assert!(
        err.to_string().contains("missing.sexpr"),
        "error should name the file: {err}"
    );
    assert!(session.document().is_none());
}

// ============================================================
// Reload Tests
// ============================================================

#[test]
fn given_changed_file_when_reloading_then_shows_new_content() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let file = create_sexpr_file(&temp, "net.sexpr", "(a (b 1))");
    let mut session = ViewerSession::default();
    session.load(&file).unwrap();
    assert_eq!(session.tree().unwrap().node_count(), 2);

    // Act - the file grows a sibling between load and reload
    std::fs::write(&file, "(a (b 1) (c 2))").unwrap();
    session.reload().unwrap();

    // Assert - new tree installed, selection back on the root
    assert_eq!(session.tree().unwrap().node_count(), 3);
    assert_eq!(session.selected(), session.tree().unwrap().root());
    assert_eq!(session.selected_payload().unwrap(), "(a (b 1) (c 2))");
}

#[test]
fn given_no_document_when_reloading_then_errors() {
    // Act
    let mut session = ViewerSession::default();
    let result = session.reload();

    // Assert
    assert!(matches!(result, Err(SessionError::NoDocument)));
}

#[test]
fn given_reload_of_shrunken_document_when_selecting_stale_id_then_rejects_it() {
    // Arrange - keep an id across a reload that shrinks the arena
    let temp = TempDir::new().unwrap();
    let file = create_sexpr_file(&temp, "net.sexpr", "(a (b) (c))");
    let mut session = ViewerSession::default();
    session.load(&file).unwrap();
    let stale = session.tree().unwrap().node_at(&[1]).unwrap();

    std::fs::write(&file, "(a)").unwrap();
    session.reload().unwrap();

    // Act
    let result = session.select(stale);

    // Assert - the old id is rejected and the root selection survives
    assert!(matches!(result, Err(SessionError::UnknownNode)));
    assert_eq!(session.selected(), session.tree().unwrap().root());
    assert_eq!(session.selected_path().unwrap(), "a");
}

#[test]
fn given_reload_of_same_shape_document_when_selecting_stale_id_then_rejects_it() {
    // Arrange - the replacement has the same shape, so the old id's arena
    // slot exists again in the new tree
    let temp = TempDir::new().unwrap();
    let file = create_sexpr_file(&temp, "net.sexpr", "(a (b) (c))");
    let mut session = ViewerSession::default();
    session.load(&file).unwrap();
    let stale = session.tree().unwrap().node_at(&[0]).unwrap();

    std::fs::write(&file, "(x (y) (z))").unwrap();
    session.reload().unwrap();

    // Act
    let result = session.select(stale);

    // Assert - the old id never lands on the new tree's matching slot
    assert!(matches!(result, Err(SessionError::UnknownNode)));
    assert_eq!(session.selected(), session.tree().unwrap().root());
    assert_eq!(session.selected_path().unwrap(), "x");
}

// ============================================================
// Failed Replacement Tests
// ============================================================

#[test]
fn given_unparseable_replacement_when_loading_then_keeps_current_document() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let good = create_sexpr_file(&temp, "good.sexpr", "(a (b 1) (c (d 2)))");
    let bad = create_sexpr_file(&temp, "bad.sexpr", "(a (b 1)");
    let mut session = ViewerSession::default();
    session.load(&good).unwrap();
    session.select_at(&[1, 0]).unwrap();

    // Act
    let err = session.load(&bad).unwrap_err();

    // Assert - document, tree and selection are exactly as before
    assert!(matches!(err, SessionError::Parse(_)));
    let doc = session.document().unwrap();
    assert_eq!(doc.path(), good.as_path());
    assert_eq!(doc.tree().node_count(), 4);
    assert_eq!(session.selected_path().unwrap(), "a >> c >> d");
    assert_eq!(session.selected_payload().unwrap(), "(d 2)");
}

#[test]
fn given_atom_root_replacement_when_reloading_then_keeps_current_tree() {
    // Arrange - the file turns into a bare atom between load and reload
    let temp = TempDir::new().unwrap();
    let file = create_sexpr_file(&temp, "net.sexpr", "(a (b 1))");
    let mut session = ViewerSession::default();
    session.load(&file).unwrap();

    std::fs::write(&file, "lonely-atom").unwrap();

    // Act
    let err = session.reload().unwrap_err();

    // Assert - the projection error surfaces but the old tree stays live
    match err {
        SessionError::Outline(OutlineError::InvalidRoot { found }) => {
            assert_eq!(found, "symbol")
        }
        other => panic!("expected InvalidRoot, got {other:?}"),
    }
    assert_eq!(session.tree().unwrap().node_count(), 2);
    assert_eq!(session.selected_path().unwrap(), "a");
}

#[test]
fn given_over_deep_replacement_when_loading_then_keeps_selection() {
    // Arrange - session capped at two levels
    let temp = TempDir::new().unwrap();
    let shallow = create_sexpr_file(&temp, "shallow.sexpr", "(a (b))");
    let deep = create_sexpr_file(&temp, "deep.sexpr", "(a (b (c)))");
    let mut session = ViewerSession::new(2);
    session.load(&shallow).unwrap();
    session.select_at(&[0]).unwrap();

    // Act
    let err = session.load(&deep).unwrap_err();

    // Assert
    match err {
        SessionError::Outline(OutlineError::DepthExceeded { limit }) => {
            assert_eq!(limit, 2)
        }
        other => panic!("expected DepthExceeded, got {other:?}"),
    }
    assert_eq!(session.document().unwrap().path(), shallow.as_path());
    assert_eq!(session.selected_path().unwrap(), "a >> b");
}
