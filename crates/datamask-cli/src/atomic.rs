use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::CliError;

const STAGING_SUFFIX: &str = "partial";

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let data = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &data)
}

/// Stage `data` beside `path` and rename it into place. A failed write
/// removes the staged file and leaves any previous `path` as it was.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), CliError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let staging = staging_path(path)?;
    if let Err(err) = publish(&staging, path, data) {
        if staging.exists() {
            fs::remove_file(&staging).ok();
        }
        tracing::warn!(event = "atomic_write_failed", path = %path.display(), error = %err);
        return Err(err.into());
    }

    sync_dir(dir)?;
    Ok(())
}

fn publish(staging: &Path, target: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(staging)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    fs::rename(staging, target)
}

fn staging_path(path: &Path) -> Result<PathBuf, CliError> {
    let Some(file_name) = path.file_name() else {
        return Err(CliError::InvalidConfig(format!(
            "output path has no file name: {}",
            path.display()
        )));
    };
    Ok(path.with_file_name(format!(
        ".{}.{}.{STAGING_SUFFIX}",
        file_name.to_string_lossy(),
        uuid::Uuid::new_v4().simple()
    )))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("datamask_atomic_{}", uuid::Uuid::new_v4()))
    }

    fn entries(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .expect("list dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn replaces_existing_file() {
        let dir = scratch_dir();
        let path = dir.join("nested").join("out.csv");

        write_bytes_atomic(&path, b"first").expect("first write");
        write_bytes_atomic(&path, b"second").expect("second write");

        assert_eq!(fs::read(&path).expect("read back"), b"second");
        assert_eq!(entries(&dir.join("nested")), vec!["out.csv".to_string()]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn failed_rename_removes_staged_file() {
        let dir = scratch_dir();
        let target = dir.join("out.csv");
        fs::create_dir_all(target.join("occupied")).expect("create blocking dir");

        assert!(write_bytes_atomic(&target, b"data").is_err());

        assert_eq!(entries(&dir), vec!["out.csv".to_string()]);
        assert!(target.join("occupied").is_dir());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rejects_paths_without_file_name() {
        assert!(matches!(
            write_bytes_atomic(Path::new("/"), b"data"),
            Err(CliError::InvalidConfig(_))
        ));
    }
}
