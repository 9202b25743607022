//! Store facade bundling the repositories over one data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::auth::AuthService;
use crate::error::Result;
use crate::repo::{ContactRepository, GalleryRepository, PostRepository, UserRepository};
use crate::table::CompactReport;

/// Entity file names inside the data directory, stable across runs.
pub const USERS_FILE: &str = "users.jsonl";
pub const POSTS_FILE: &str = "posts.jsonl";
pub const GALLERY_FILE: &str = "gallery.jsonl";
pub const CONTACT_MESSAGES_FILE: &str = "contact_messages.jsonl";

/// Per-file outcome of [`Store::optimize`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptimizeReport {
    pub posts: CompactReport,
    pub gallery: CompactReport,
    pub contact_messages: CompactReport,
}

impl OptimizeReport {
    pub fn total_dropped(&self) -> usize {
        self.posts.dropped + self.gallery.dropped + self.contact_messages.dropped
    }
}

/// Entity counts and disk usage for the admin report.
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub users: usize,
    pub posts: usize,
    pub gallery_items: usize,
    pub contact_messages: usize,
    pub data_bytes: u64,
}

/// The store over one data directory.
///
/// Construction does no I/O: a missing directory reads as an empty store
/// and is created on the first write.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.data_dir.join(USERS_FILE))
    }

    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.data_dir.join(POSTS_FILE))
    }

    pub fn gallery(&self) -> GalleryRepository {
        GalleryRepository::new(self.data_dir.join(GALLERY_FILE))
    }

    pub fn contact(&self) -> ContactRepository {
        ContactRepository::new(self.data_dir.join(CONTACT_MESSAGES_FILE))
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.users())
    }

    /// Rewrite the content data files keeping only lines that still parse.
    ///
    /// The user file is never compacted: losing a half-written post is an
    /// annoyance, losing an account record is not.
    pub fn optimize(&self) -> Result<OptimizeReport> {
        Ok(OptimizeReport {
            posts: self.posts().compact()?,
            gallery: self.gallery().compact()?,
            contact_messages: self.contact().compact()?,
        })
    }

    /// Entity counts plus total bytes used under the data directory.
    pub fn report(&self) -> Result<SystemReport> {
        Ok(SystemReport {
            users: self.users().count()?,
            posts: self.posts().count()?,
            gallery_items: self.gallery().count()?,
            contact_messages: self.contact().count()?,
            data_bytes: dir_size(&self.data_dir)?,
        })
    }
}

/// Total size of regular files directly under `dir`; a missing directory
/// counts as zero.
fn dir_size(dir: &Path) -> Result<u64> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err.into()),
    };
    let mut total = 0u64;
    for entry in entries {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_file() {
            total += metadata.len();
        }
    }
    Ok(total)
}
