use crate::conf::types::DotfilesPolicy;
use crate::static_files::resolve::{ResolveError, ResolvedStatic, resolve_static_path};
use std::fs;
use tempfile::tempdir;

#[test]
fn resolves_file_under_root() {
    // Arrange
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("css")).unwrap();
    fs::write(dir.path().join("css/site.css"), "body{}").unwrap();

    // Act
    let resolved = resolve_static_path(dir.path(), "/css/site.css", DotfilesPolicy::Ignore);

    // Assert
    let expected = dir.path().join("css/site.css").canonicalize().unwrap();
    assert_eq!(resolved, Ok(ResolvedStatic::File(expected)));
}

#[test]
fn decodes_percent_encoded_names() {
    // Arrange
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("my file.txt"), "x").unwrap();

    // Act
    let resolved = resolve_static_path(dir.path(), "/my%20file.txt", DotfilesPolicy::Ignore);

    // Assert
    assert!(matches!(resolved, Ok(ResolvedStatic::File(_))));
}

#[test]
fn resolves_directories() {
    // Arrange
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();

    // Act
    let resolved = resolve_static_path(dir.path(), "/docs", DotfilesPolicy::Ignore);

    // Assert
    assert!(matches!(resolved, Ok(ResolvedStatic::Directory(_))));
}

#[test]
fn rejects_traversal() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let plain = resolve_static_path(dir.path(), "/../etc/passwd", DotfilesPolicy::Ignore);
    let encoded = resolve_static_path(dir.path(), "/%2e%2e/etc/passwd", DotfilesPolicy::Allow);

    // Assert
    assert_eq!(plain, Err(ResolveError::Forbidden));
    assert_eq!(encoded, Err(ResolveError::Forbidden));
}

#[test]
fn rejects_malformed_paths() {
    // Arrange
    let dir = tempdir().unwrap();

    // Assert
    assert_eq!(
        resolve_static_path(dir.path(), "/%c0", DotfilesPolicy::Ignore),
        Err(ResolveError::BadPath)
    );
    assert_eq!(
        resolve_static_path(dir.path(), "/a%00b", DotfilesPolicy::Ignore),
        Err(ResolveError::BadPath)
    );
    assert_eq!(
        resolve_static_path(dir.path(), "relative", DotfilesPolicy::Ignore),
        Err(ResolveError::BadPath)
    );
}

#[test]
fn applies_dotfile_policy() {
    // Arrange
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env"), "SECRET=1").unwrap();

    // Act
    let allow = resolve_static_path(dir.path(), "/.env", DotfilesPolicy::Allow);
    let deny = resolve_static_path(dir.path(), "/.env", DotfilesPolicy::Deny);
    let ignore = resolve_static_path(dir.path(), "/.env", DotfilesPolicy::Ignore);

    // Assert
    assert!(matches!(allow, Ok(ResolvedStatic::File(_))));
    assert_eq!(deny, Err(ResolveError::Forbidden));
    assert_eq!(ignore, Err(ResolveError::NotFound));
}

#[test]
fn missing_file_is_not_found() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let resolved = resolve_static_path(dir.path(), "/nope.txt", DotfilesPolicy::Ignore);

    // Assert
    assert_eq!(resolved, Err(ResolveError::NotFound));
}

#[cfg(unix)]
#[test]
fn rejects_symlinks_escaping_root() {
    // Arrange
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("secret.txt"), "x").unwrap();
    let dir = tempdir().unwrap();
    std::os::unix::fs::symlink(outside.path().join("secret.txt"), dir.path().join("link.txt"))
        .unwrap();

    // Act
    let resolved = resolve_static_path(dir.path(), "/link.txt", DotfilesPolicy::Ignore);

    // Assert
    assert_eq!(resolved, Err(ResolveError::Forbidden));
}
