use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::utils::{RemoverError, RemoverResult, has_supported_extension};

/// Lists candidate images directly inside `input_dir`.
///
/// Non-recursive. Keeps regular files with a `.jpg`, `.jpeg` or `.png` extension
/// (any case) in filesystem enumeration order. An empty directory yields an
/// empty list, not an error.
pub fn select_candidates(input_dir: impl AsRef<Path>) -> RemoverResult<Vec<PathBuf>> {
    let input_dir = input_dir.as_ref();

    if !input_dir.is_dir() {
        return Err(RemoverError::DirectoryNotFound(input_dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", input_dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        // Symlinks count when they resolve to a regular file
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false) || path.is_file();
        if is_file && has_supported_extension(&path) {
            candidates.push(path);
        }
    }

    debug!("Selected {} candidate(s) in {}", candidates.len(), input_dir.display());
    Ok(candidates)
}

/// Output location for `source`: `output_dir` joined with the source file name.
///
/// The extension is kept as-is, so the encoder is chosen by the source name.
pub fn output_path_for(source: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> RemoverResult<PathBuf> {
    let source = source.as_ref();
    let file_name = source.file_name().ok_or_else(|| {
        RemoverError::io(format!("Path has no file name: {}", source.display()))
    })?;

    Ok(output_dir.as_ref().join(file_name))
}

/// Creates `dir` and any missing parents. An existing directory is fine.
pub fn create_dir_all(dir: impl AsRef<Path>) -> RemoverResult<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        RemoverError::io(format!("Cannot create output directory {}: {}", dir.display(), e))
    })
}

/// Mode of written outputs. Temporary files start out owner-only.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Writes `bytes` to `dest` through a temporary file in the same directory.
///
/// The temporary file is renamed onto `dest` only after every byte is written,
/// so a failed write never leaves a partial output behind. On Unix the result
/// is world-readable (`0644`).
pub fn write_atomic(dest: impl AsRef<Path>, bytes: &[u8]) -> RemoverResult<()> {
    let dest = dest.as_ref();
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(".metadata-remover-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| RemoverError::io(format!("Cannot create temporary file in {}: {}", parent.display(), e)))?;

    temp.write_all(bytes)
        .and_then(|_| temp.flush())
        .map_err(|e| RemoverError::io(format!("Failed to write {}: {}", dest.display(), e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))
            .map_err(|e| RemoverError::io(format!("Cannot set permissions on {}: {}", dest.display(), e)))?;
    }

    temp.persist(dest)
        .map_err(|e| RemoverError::io(format!("Failed to move output into place at {}: {}", dest.display(), e.error)))?;

    Ok(())
}

/// File name portion of `path` for log messages, falling back to the full path.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn selects_only_allowed_extensions() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for name in ["a.jpg", "b.JPEG", "c.png", "d.gif", "e.txt", "noext"] {
            fs::write(dir.path().join(name), b"x")?;
        }
        fs::create_dir(dir.path().join("nested.png"))?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub").join("deep.jpg"), b"x")?;

        let mut names: Vec<String> = select_candidates(dir.path())?
            .iter()
            .map(|p| extract_filename(p))
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.jpg", "b.JPEG", "c.png"]);
        Ok(())
    }

    #[test]
    fn empty_directory_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("notes.txt"), b"x")?;
        assert!(select_candidates(dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_directory_is_reported() {
        let err = select_candidates("/definitely/not/here").unwrap_err();
        assert!(matches!(err, RemoverError::DirectoryNotFound(_)));
    }

    #[test]
    fn output_path_keeps_source_name() -> Result<(), Box<dyn std::error::Error>> {
        let out = output_path_for("/in/Holiday.JPEG", "/out/clean")?;
        assert_eq!(out, PathBuf::from("/out/clean/Holiday.JPEG"));
        Ok(())
    }

    #[test]
    fn atomic_write_leaves_only_the_destination() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dest = dir.path().join("out.png");

        write_atomic(&dest, b"first")?;
        write_atomic(&dest, b"second")?;

        assert_eq!(fs::read(&dest)?, b"second");
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn atomic_write_into_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing").join("out.png");

        let err = write_atomic(&dest, b"data").unwrap_err();
        assert!(matches!(err, RemoverError::IO(_)));
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_output_is_world_readable() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let dest = dir.path().join("shared.jpg");
        write_atomic(&dest, b"pixels")?;

        assert_eq!(fs::metadata(&dest)?.permissions().mode() & 0o777, 0o644);
        Ok(())
    }
}
