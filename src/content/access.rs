use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::content::resolver::ResolvedTarget;
use crate::http::error::{Forbidden, HttpError};

const USER_READ: u32 = 0o400;
const USER_EXEC: u32 = 0o100;

/// Result of one status query on a resolved path. Never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileMetadata {
    pub exists: bool,
    pub is_regular_file: bool,
    pub is_readable: bool,
    pub is_executable: bool,
    pub size_bytes: u64,
}

impl FileMetadata {
    /// Stats `path`, following symlinks. Any failure reads as "does not exist".
    pub async fn query(path: &Path) -> Self {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Self::from_std(&meta),
            Err(_) => Self::default(),
        }
    }

    pub fn from_std(meta: &std::fs::Metadata) -> Self {
        let mode = meta.permissions().mode();
        Self {
            exists: true,
            is_regular_file: meta.is_file(),
            is_readable: mode & USER_READ != 0,
            is_executable: mode & USER_EXEC != 0,
            size_bytes: meta.len(),
        }
    }
}

/// A target that passed the access rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approved {
    File { path: PathBuf, size: u64 },
    Program { path: PathBuf, query_args: String },
}

/// Applies the access rules to already-fetched metadata.
///
/// Static targets must be regular and user-readable, dynamic ones regular and
/// user-executable.
pub fn check_access(target: ResolvedTarget, meta: &FileMetadata) -> Result<Approved, HttpError> {
    if !meta.exists {
        return Err(HttpError::NotFound {
            path: target.path().to_path_buf(),
        });
    }

    match target {
        ResolvedTarget::Static { path } => {
            if !meta.is_regular_file || !meta.is_readable {
                return Err(HttpError::Forbidden {
                    path,
                    reason: Forbidden::Read,
                });
            }
            Ok(Approved::File {
                path,
                size: meta.size_bytes,
            })
        }
        ResolvedTarget::Dynamic { path, query_args } => {
            if !meta.is_regular_file || !meta.is_executable {
                return Err(HttpError::Forbidden {
                    path,
                    reason: Forbidden::Run,
                });
            }
            Ok(Approved::Program { path, query_args })
        }
    }
}

/// Stats the target's path and applies [`check_access`].
pub async fn authorize(target: ResolvedTarget) -> Result<Approved, HttpError> {
    let meta = FileMetadata::query(target.path()).await;
    check_access(target, &meta)
}
