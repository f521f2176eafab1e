use crate::error::ThumbnailError;
use std::fs;
use std::path::Path;

/// 確認輸入檔案可讀
pub fn validate_input_readable(path: &Path) -> Result<(), ThumbnailError> {
    match fs::File::open(path) {
        Ok(_) => Ok(()),
        Err(source) => Err(ThumbnailError::InputNotReadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// 建立資料夾（已存在則不動作）
pub fn ensure_directory_exists(path: &Path) -> Result<(), ThumbnailError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| ThumbnailError::DirectoryCreateFailed {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// 以實際建立測試檔確認資料夾可寫
pub fn validate_directory_writable(path: &Path) -> Result<(), ThumbnailError> {
    let probe = path.join(".thumbnails-write-test");
    match fs::File::create(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(source) => Err(ThumbnailError::OutputNotWritable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_input_readable_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp4");
        let err = validate_input_readable(&missing).unwrap_err();
        assert!(matches!(err, ThumbnailError::InputNotReadable { .. }));
        assert!(err.to_string().contains("missing.mp4"));
    }

    #[test]
    fn test_ensure_directory_exists_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/thumbnails");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // 再呼叫一次也不會失敗
        ensure_directory_exists(&nested).unwrap();
    }

    #[test]
    fn test_validate_directory_writable() {
        let dir = tempfile::tempdir().unwrap();
        validate_directory_writable(dir.path()).unwrap();
        // 測試檔不留殘骸
        assert!(!dir.path().join(".thumbnails-write-test").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_directory_not_writable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let readonly = dir.path().join("readonly");
        fs::create_dir(&readonly).unwrap();
        fs::set_permissions(&readonly, fs::Permissions::from_mode(0o555)).unwrap();

        let result = validate_directory_writable(&readonly);
        // root 不受唯讀權限限制，此情境下略過斷言
        if is_root() {
            return;
        }
        assert!(matches!(
            result.unwrap_err(),
            ThumbnailError::OutputNotWritable { .. }
        ));
    }

    #[cfg(unix)]
    fn is_root() -> bool {
        std::process::Command::new("id")
            .arg("-u")
            .output()
            .map(|o| String::from_utf8_lossy(&o.stdout).trim() == "0")
            .unwrap_or(false)
    }
}
