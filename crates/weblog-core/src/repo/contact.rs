//! Contact message repository.

use std::path::PathBuf;

use crate::error::Result;
use crate::model::{ContactMessage, NewContactMessage};
use crate::query::{now_stamp, paginate, sort_newest_first, Page};
use crate::table::{CompactReport, Table};

pub struct ContactRepository {
    table: Table<ContactMessage>,
}

impl ContactRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    /// Record a submitted message. Field validation (lengths, email shape)
    /// is the form layer's job and happens before this point.
    pub fn add(&self, new_message: NewContactMessage) -> Result<ContactMessage> {
        let message = ContactMessage {
            name: new_message.name,
            email: new_message.email,
            message: new_message.message,
            date: now_stamp(),
        };
        self.table.append(&message)?;
        Ok(message)
    }

    /// One page of messages, newest first.
    pub fn list(&self, page: Page) -> Result<Vec<ContactMessage>> {
        let mut messages = self.table.scan_all()?;
        sort_newest_first(&mut messages, |message| &message.date);
        Ok(paginate(messages, page))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.table.scan_all()?.len())
    }

    pub(crate) fn compact(&self) -> Result<CompactReport> {
        self.table.compact()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_and_list() {
        let dir = tempdir().unwrap();
        let contact = ContactRepository::new(dir.path().join("contact_messages.jsonl"));

        contact
            .add(NewContactMessage::new(
                "Visitor",
                "visitor@example.com",
                "Hello there",
            ))
            .unwrap();

        let page = contact.list(Page::first(10)).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Visitor");
        assert_eq!(contact.count().unwrap(), 1);
    }
}
