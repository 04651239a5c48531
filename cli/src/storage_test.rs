use super::*;

fn temp_storage() -> (tempfile::TempDir, FileStorage) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path().join("nested").join("token"));
    (dir, storage)
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn missing_file_reads_as_absent() {
    let (_dir, storage) = temp_storage();
    assert_eq!(storage.read(), None);
}

#[test]
fn write_creates_parent_and_round_trips() {
    let (_dir, storage) = temp_storage();
    storage.write("tok-123").expect("write");
    assert_eq!(storage.read().as_deref(), Some("tok-123"));
}

#[test]
fn read_trims_trailing_newline() {
    let (_dir, storage) = temp_storage();
    storage.write("tok-123\n").expect("write");
    assert_eq!(storage.read().as_deref(), Some("tok-123"));
}

#[test]
fn blank_file_reads_as_absent() {
    let (_dir, storage) = temp_storage();
    storage.write("  \n").expect("write");
    assert_eq!(storage.read(), None);
}

#[test]
fn remove_is_idempotent() {
    let (_dir, storage) = temp_storage();
    storage.write("tok-123").expect("write");
    storage.remove().expect("first remove");
    assert_eq!(storage.read(), None);
    storage.remove().expect("second remove");
}

#[cfg(unix)]
#[test]
fn token_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, storage) = temp_storage();
    storage.write("tok-123").expect("write");
    let mode = fs::metadata(storage.path()).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// =============================================================
// CliStorage
// =============================================================

#[test]
fn env_token_wins_and_never_touches_file() {
    let (_dir, file) = temp_storage();
    let storage = CliStorage::resolve(Some(" env-tok ".into()), file.path().to_path_buf());
    assert_eq!(storage.read().as_deref(), Some("env-tok"));

    storage.remove().expect("remove");
    assert_eq!(storage.read(), None);
    assert!(!file.path().exists());
}

#[test]
fn blank_env_token_falls_back_to_file() {
    let (_dir, file) = temp_storage();
    file.write("file-tok").expect("write");
    let storage = CliStorage::resolve(Some(String::new()), file.path().to_path_buf());
    assert!(matches!(storage, CliStorage::File(_)));
    assert_eq!(storage.read().as_deref(), Some("file-tok"));
}
