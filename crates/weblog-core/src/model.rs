//! Entity records persisted by the store.
//!
//! Each entity is one flat JSON object per line. Decoding is defensive:
//! fields that older lines may lack carry serde defaults, so a reader never
//! fails on a record written by an earlier shape of the site. `User.alias`
//! additionally accepts the legacy `username` key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate an opaque record id.
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque unique identifier, generator-assigned
    pub id: String,

    /// Login name, unique case-insensitively
    #[serde(alias = "username")]
    pub alias: String,

    #[serde(default)]
    pub firstname: String,

    #[serde(default)]
    pub lastname: String,

    /// Unique case-insensitively; empty on legacy records
    #[serde(default)]
    pub email: String,

    /// Argon2id hash, never the plaintext
    pub password: String,

    /// Creation timestamp, `%Y-%m-%d %H:%M:%S`
    pub created_at: String,

    #[serde(default)]
    pub is_admin: bool,

    /// Present only while a remember-me token is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_token: Option<RememberToken>,
}

/// A long-lived credential substitute for session re-establishment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberToken {
    /// Opaque random value handed to the caller for cookie storage
    pub token: String,

    /// Expiry as Unix epoch seconds
    pub expires_at: i64,
}

impl RememberToken {
    pub fn is_expired(&self, now_epoch: i64) -> bool {
        self.expires_at <= now_epoch
    }
}

/// Builder for creating users. The password field carries the finished
/// hash; plaintext never reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub alias: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        alias: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            alias: alias.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,

    pub title: String,

    pub content: String,

    /// Author's user id
    pub author_id: String,

    /// Name snapshot captured at creation; not re-synced on user rename
    #[serde(default)]
    pub author_firstname: String,

    #[serde(default)]
    pub author_lastname: String,

    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl Post {
    /// Display name as captured at creation time.
    pub fn author_name(&self) -> String {
        format!("{} {}", self.author_firstname, self.author_lastname)
            .trim()
            .to_string()
    }
}

/// Builder for creating posts. Author identity is supplied separately by
/// the repository from the user record.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_path: None,
        }
    }

    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }
}

/// An image recorded in the gallery. The upload bytes live elsewhere; the
/// store only keeps the already-validated relative filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub filename: String,

    /// Uploader display name
    #[serde(default = "anonymous_uploader")]
    pub uploaded_by: String,

    pub upload_date: String,
}

fn anonymous_uploader() -> String {
    "anonymous".to_string()
}

/// Builder for gallery items.
#[derive(Debug, Clone)]
pub struct NewGalleryItem {
    pub filename: String,
    pub uploaded_by: Option<String>,
}

impl NewGalleryItem {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            uploaded_by: None,
        }
    }

    pub fn with_uploader(mut self, name: impl Into<String>) -> Self {
        self.uploaded_by = Some(name.into());
        self
    }
}

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: String,
}

/// Builder for contact messages.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn test_record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }

    #[test]
    fn test_user_round_trip_with_token() {
        let user = User {
            id: new_record_id(),
            alias: "hmuster".to_string(),
            firstname: "Hans".to_string(),
            lastname: "Muster".to_string(),
            email: "hans@example.com".to_string(),
            password: "$argon2id$stub".to_string(),
            created_at: "2026-01-05 08:30:00".to_string(),
            is_admin: true,
            remember_token: Some(RememberToken {
                token: "aa11".to_string(),
                expires_at: 1_900_000_000,
            }),
        };
        let line = codec::encode(&user).unwrap();
        let decoded: User = codec::decode(&line).expect("decode");
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_user_accepts_legacy_username_key() {
        let line = "{\"id\":\"x1\",\"username\":\"old_style\",\"password\":\"h\",\"created_at\":\"2024-02-01 12:00:00\"}";
        let user: User = codec::decode(line).expect("decode legacy");
        assert_eq!(user.alias, "old_style");
        assert_eq!(user.email, "");
        assert!(!user.is_admin);
        assert!(user.remember_token.is_none());
    }

    #[test]
    fn test_user_without_token_omits_field() {
        let user = User {
            id: "u1".to_string(),
            alias: "a".to_string(),
            firstname: String::new(),
            lastname: String::new(),
            email: String::new(),
            password: "h".to_string(),
            created_at: "2026-01-01 00:00:00".to_string(),
            is_admin: false,
            remember_token: None,
        };
        let line = codec::encode(&user).unwrap();
        assert!(!line.contains("remember_token"));
    }

    #[test]
    fn test_post_round_trip_and_legacy_shape() {
        let post = Post {
            id: "p1".to_string(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            author_id: "u1".to_string(),
            author_firstname: "Erika".to_string(),
            author_lastname: "Muster".to_string(),
            created_at: "2026-03-01 10:00:00".to_string(),
            image_path: Some("uploads/p1.jpg".to_string()),
        };
        let line = codec::encode(&post).unwrap();
        assert_eq!(codec::decode::<Post>(&line), Some(post));

        // Posts written before author names were denormalized
        let legacy = "{\"id\":\"p0\",\"title\":\"t\",\"content\":\"c\",\"author_id\":\"u0\",\"created_at\":\"2023-01-01 00:00:00\"}";
        let decoded: Post = codec::decode(legacy).expect("decode legacy post");
        assert_eq!(decoded.author_name(), "");
        assert_eq!(decoded.image_path, None);
    }

    #[test]
    fn test_gallery_item_defaults_uploader() {
        let line = "{\"filename\":\"img.png\",\"upload_date\":\"2026-01-01 00:00:00\"}";
        let item: GalleryItem = codec::decode(line).expect("decode");
        assert_eq!(item.uploaded_by, "anonymous");
    }
}
