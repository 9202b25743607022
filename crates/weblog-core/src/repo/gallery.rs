//! Gallery repository.

use std::path::PathBuf;

use crate::error::Result;
use crate::model::{GalleryItem, NewGalleryItem};
use crate::query::{now_stamp, paginate, sort_newest_first, Page};
use crate::table::{CompactReport, Table};

pub struct GalleryRepository {
    table: Table<GalleryItem>,
}

impl GalleryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    /// Record an already-stored image. The upload collaborator owns the
    /// bytes; only the validated relative filename lands here.
    pub fn add(&self, new_item: NewGalleryItem) -> Result<GalleryItem> {
        let item = GalleryItem {
            filename: new_item.filename,
            uploaded_by: new_item
                .uploaded_by
                .unwrap_or_else(|| "anonymous".to_string()),
            upload_date: now_stamp(),
        };
        self.table.append(&item)?;
        Ok(item)
    }

    /// One page of gallery items, newest first.
    pub fn list(&self, page: Page) -> Result<Vec<GalleryItem>> {
        let mut items = self.table.scan_all()?;
        sort_newest_first(&mut items, |item| &item.upload_date);
        Ok(paginate(items, page))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.table.scan_all()?.len())
    }

    pub(crate) fn compact(&self) -> Result<CompactReport> {
        self.table.compact()
    }
}
