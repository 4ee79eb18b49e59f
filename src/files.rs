use std::{
	io,
	path::{Component, Path, PathBuf},
};

/// What the validator needs to know about a referenced file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
	/// The size of the file in bytes.
	pub len: u64,
	/// Whether the path points to a regular file (and not, say, a directory).
	pub is_file: bool,
}

/// Resolves file references to their metadata.
///
/// Validation goes through this instead of the filesystem directly,
/// so that it can be exercised without touching the disk.
pub trait FileLookup: Send + Sync {
	fn stat(&self, path: &Path) -> io::Result<FileInfo>;
}

/// Looks files up on the local disk, relative to an upload directory.
#[derive(Debug, Clone)]
pub struct LocalFiles {
	root: PathBuf,
}

impl LocalFiles {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Resolves `path` against the upload directory.
	///
	/// Absolute paths and paths that climb out of the directory are refused.
	fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
		let escapes = path
			.components()
			.any(|component| !matches!(component, Component::Normal(..) | Component::CurDir));

		if escapes {
			return Err(io::Error::new(
				io::ErrorKind::PermissionDenied,
				format!("{} is outside of the upload directory", path.display()),
			));
		}

		Ok(self.root.join(path))
	}
}

impl FileLookup for LocalFiles {
	fn stat(&self, path: &Path) -> io::Result<FileInfo> {
		let metadata = std::fs::metadata(self.resolve(path)?)?;

		Ok(FileInfo {
			len: metadata.len(),
			is_file: metadata.is_file(),
		})
	}
}

#[cfg(test)]
mod test {
	use std::io::{self, Write};

	use super::*;

	#[test]
	fn test_stat_existing_file() {
		let dir = tempfile::tempdir().unwrap();
		let mut file = std::fs::File::create(dir.path().join("idea.pdf")).unwrap();

		file.write_all(b"%PDF-1.7").unwrap();

		let files = LocalFiles::new(dir.path());
		let info = files.stat(Path::new("idea.pdf")).unwrap();

		assert_eq!(
			info,
			FileInfo {
				len: 8,
				is_file: true
			}
		);
	}

	#[test]
	fn test_stat_nested_file() {
		let dir = tempfile::tempdir().unwrap();

		std::fs::create_dir(dir.path().join("ideas")).unwrap();
		std::fs::write(dir.path().join("ideas").join("x.pdf"), b"").unwrap();

		let files = LocalFiles::new(dir.path());

		assert!(files.stat(Path::new("ideas/x.pdf")).unwrap().is_file);
		assert!(!files.stat(Path::new("ideas")).unwrap().is_file);
	}

	#[test]
	fn test_stat_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let files = LocalFiles::new(dir.path());

		let error = files.stat(Path::new("missing.pdf")).unwrap_err();

		assert_eq!(error.kind(), io::ErrorKind::NotFound);
	}

	#[test]
	fn test_stat_refuses_paths_outside_root() {
		let dir = tempfile::tempdir().unwrap();
		let files = LocalFiles::new(dir.path().join("uploads"));

		std::fs::write(dir.path().join("secret.pdf"), b"").unwrap();

		for path in ["../secret.pdf", "/etc/passwd", "a/../../secret.pdf"] {
			let error = files.stat(Path::new(path)).unwrap_err();

			assert_eq!(error.kind(), io::ErrorKind::PermissionDenied, "{path}");
		}
	}
}
