use std::fs;

use tempfile::tempdir;

use weblog_core::auth::{Registration, Session};
use weblog_core::model::{NewGalleryItem, NewPost, Post};
use weblog_core::query::Page;
use weblog_core::store::{Store, POSTS_FILE, USERS_FILE};
use weblog_core::StoreError;

fn register(store: &Store, alias: &str) -> weblog_core::model::User {
    store
        .auth()
        .register(Registration::new(
            "First",
            "Last",
            alias,
            format!("{}@example.com", alias),
            format!("{}-password", alias),
        ))
        .expect("register should succeed")
}

#[test]
fn test_first_user_admin_and_duplicate_alias_conflict() {
    let dir = tempdir().unwrap();
    let store = Store::new(dir.path().join("data"));

    let first = register(&store, "abcd");
    assert!(first.is_admin);

    let second = register(&store, "other");
    assert!(!second.is_admin);

    let duplicate = store.auth().register(Registration::new(
        "Another",
        "Person",
        "abcd",
        "different@example.com",
        "whatever-password",
    ));
    assert!(matches!(duplicate, Err(StoreError::Conflict(_))));

    let aliases: Vec<String> = store
        .users()
        .all()
        .unwrap()
        .into_iter()
        .filter(|user| user.alias == "abcd")
        .map(|user| user.alias)
        .collect();
    assert_eq!(aliases.len(), 1);
}

#[test]
fn test_login_generic_failure_and_session_lifecycle() {
    let dir = tempdir().unwrap();
    let store = Store::new(dir.path().join("data"));
    register(&store, "real_alias");
    let auth = store.auth();

    let mut session = Session::default();
    let ghost = auth
        .login(&mut session, "ghost", "anything", false)
        .unwrap_err();
    let wrong = auth
        .login(&mut session, "real_alias", "wrong_password", false)
        .unwrap_err();
    assert_eq!(ghost.to_string(), wrong.to_string());
    assert!(!session.is_logged_in());

    auth.login(&mut session, "real_alias", "real_alias-password", false)
        .unwrap();
    assert!(session.is_logged_in());
    auth.logout(&mut session);
    assert!(!session.is_logged_in());
}

#[test]
fn test_remember_me_survives_process_boundaries() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");

    let token = {
        let store = Store::new(&data);
        register(&store, "returning");
        let mut session = Session::default();
        store
            .auth()
            .login(&mut session, "returning", "returning-password", true)
            .unwrap()
            .expect("token minted")
    };

    // A separate store over the same directory stands in for a new process
    let store = Store::new(&data);
    let mut session = Session::default();
    assert!(store.auth().resume(&mut session, &token.token).unwrap());
    assert_eq!(session.user().unwrap().alias, "returning");

    let mut other = Session::default();
    assert!(!store.auth().resume(&mut other, "not-the-token").unwrap());
    assert!(!other.is_logged_in());
}

#[test]
fn test_update_isolation_leaves_other_lines_untouched() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    let store = Store::new(&data);

    register(&store, "aaa");
    register(&store, "bbb");
    register(&store, "ccc");

    let before: Vec<String> = fs::read_to_string(data.join(USERS_FILE))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();

    // Attach a remember token to the middle user only
    let mut session = Session::default();
    store
        .auth()
        .login(&mut session, "bbb", "bbb-password", true)
        .unwrap();

    let after: Vec<String> = fs::read_to_string(data.join(USERS_FILE))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();

    assert_eq!(before.len(), 3);
    assert_eq!(after.len(), 3);
    assert_eq!(before[0], after[0], "first record must be byte-identical");
    assert_eq!(before[2], after[2], "third record must be byte-identical");
    assert_ne!(before[1], after[1], "updated record must have changed");
    assert!(after[1].contains("remember_token"));
}

#[test]
fn test_post_pagination_against_seeded_days() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    let store = Store::new(&data);
    let author = register(&store, "writer");

    // Seed posts with fixed timestamps by rewriting what create() stamped
    for day in 1..=5u32 {
        store
            .posts()
            .create(NewPost::new(format!("Day {}", day), "body"), &author)
            .unwrap();
    }
    let posts_path = data.join(POSTS_FILE);
    let reseeded: Vec<String> = fs::read_to_string(&posts_path)
        .unwrap()
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let mut post: Post = serde_json::from_str(line).unwrap();
            post.created_at = format!("2026-05-{:02} 12:00:00", index + 1);
            serde_json::to_string(&post).unwrap()
        })
        .collect();
    fs::write(&posts_path, format!("{}\n", reseeded.join("\n"))).unwrap();

    let titles = |page: Vec<Post>| -> Vec<String> {
        page.into_iter().map(|post| post.title).collect()
    };

    assert_eq!(
        titles(store.posts().list(Page::new(2, 0)).unwrap()),
        vec!["Day 5", "Day 4"]
    );
    assert_eq!(
        titles(store.posts().list(Page::new(2, 2)).unwrap()),
        vec!["Day 3", "Day 2"]
    );
    assert!(store.posts().list(Page::new(2, 5)).unwrap().is_empty());
}

#[test]
fn test_malformed_lines_are_invisible_to_readers() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    let store = Store::new(&data);
    let author = register(&store, "writer");
    store
        .posts()
        .create(NewPost::new("Valid", "body"), &author)
        .unwrap();

    let posts_path = data.join(POSTS_FILE);
    let mut raw = fs::read_to_string(&posts_path).unwrap();
    raw.push('\n'); // blank line
    raw.push_str("{\"id\":\"trunc"); // torn write, no newline
    fs::write(&posts_path, raw).unwrap();

    let listed = store.posts().list(Page::first(10)).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Valid");

    // The optimize pass makes the cleanup durable
    let report = store.optimize().unwrap();
    assert_eq!(report.posts.kept, 1);
    assert_eq!(report.posts.dropped, 1);
    let cleaned = fs::read_to_string(&posts_path).unwrap();
    assert_eq!(cleaned.lines().count(), 1);
}

#[test]
fn test_gallery_records_validated_paths_only() {
    let dir = tempdir().unwrap();
    let store = Store::new(dir.path().join("data"));

    store
        .gallery()
        .add(NewGalleryItem::new("gallery/abc123_cat.jpg").with_uploader("writer"))
        .unwrap();
    let page = store.gallery().list(Page::first(5)).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].filename, "gallery/abc123_cat.jpg");
    assert_eq!(page[0].uploaded_by, "writer");
}
