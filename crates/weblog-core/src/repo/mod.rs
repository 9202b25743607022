//! Typed repositories, one per entity table.
//!
//! A repository wraps one [`crate::table::Table`] and adds the domain
//! operations for its entity: uniqueness-checked creation, key lookups,
//! sorted/paginated listing, and (for users only) in-place update.
//! Repositories never touch the file directly, and every value they return
//! is an independent copy.

pub mod contact;
pub mod gallery;
pub mod posts;
pub mod users;

pub use contact::ContactRepository;
pub use gallery::GalleryRepository;
pub use posts::PostRepository;
pub use users::UserRepository;
