//! Cross-module flow tests: route parsing into view contexts, page
//! application, pagination walks, and the local patches interactions make.
//! Network responses are simulated by applying fetched pages directly.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use scribble::api::ApiClient;
use scribble::app::{Action, App, InputMode};
use scribble::route::ViewContext;
use scribble_types::{FeedPage, Post};

fn key(code: KeyCode) -> KeyEvent {
    let mut event = KeyEvent::new(code, KeyModifiers::empty());
    event.kind = KeyEventKind::Press;
    event
}

fn post(id: i64, owner_id: i64, contents: &str, likes: i64) -> Post {
    Post {
        id,
        owner_id,
        contents: contents.to_string(),
        time: chrono::Utc::now(),
        likes,
        user_has_liked: false,
        username: Some(format!("user{}", owner_id)),
    }
}

fn page(posts: Vec<Post>, total_pages: u32) -> FeedPage {
    let count = posts.len() as u32;
    FeedPage {
        posts,
        total_pages,
        current_page_count: count,
    }
}

fn app_for(route: &str) -> App {
    let ctx = ViewContext::parse(route).expect("route should parse");
    App::new(ctx, ApiClient::new("http://localhost:8000"), Some(1))
}

/// Simulate a successful fetch for the page the app just asked for.
fn deliver(app: &mut App, page_index: u32, feed_page: FeedPage) {
    let seq = app.feed.begin_load();
    app.apply_feed_page(seq, page_index, feed_page);
}

#[test]
fn paging_walk_through_a_three_page_feed() {
    let mut app = app_for("/");

    let full = |start: i64| -> Vec<Post> {
        (start..start + 10).map(|i| post(i, 2, "x", 0)).collect()
    };

    // Page 1: full page of a 3-page feed.
    deliver(&mut app, 1, page(full(1), 3));
    assert_eq!(app.feed.posts.len(), 10);
    assert!(!app.feed.pagination.prev_enabled());
    assert!(app.feed.pagination.next_enabled());

    // Next -> page 2 (middle page: both directions live).
    let action = app.handle_key_event(key(KeyCode::Char('n'))).unwrap();
    assert_eq!(action, Some(Action::LoadPage(2)));
    deliver(&mut app, 2, page(full(11), 3));
    assert!(app.feed.pagination.prev_enabled());
    assert!(app.feed.pagination.next_enabled());

    // Next -> page 3 comes back short: next goes dead.
    let action = app.handle_key_event(key(KeyCode::Char('n'))).unwrap();
    assert_eq!(action, Some(Action::LoadPage(3)));
    deliver(&mut app, 3, page(vec![post(21, 2, "tail", 0)], 3));
    assert_eq!(app.feed.posts.len(), 1);
    assert!(!app.feed.pagination.next_enabled());
    assert_eq!(app.handle_key_event(key(KeyCode::Char('n'))).unwrap(), None);

    // Previous still works from the last page.
    let action = app.handle_key_event(key(KeyCode::Char('p'))).unwrap();
    assert_eq!(action, Some(Action::LoadPage(2)));
}

#[test]
fn superseded_reload_cannot_overwrite_newer_one() {
    let mut app = app_for("/");

    // The user clicks next twice quickly: request A (page 2) is superseded
    // by request B (page 3), but A's response arrives last.
    let seq_a = app.feed.begin_load();
    let seq_b = app.feed.begin_load();

    app.apply_feed_page(seq_b, 3, page(vec![post(30, 2, "newer", 0)], 3));
    app.apply_feed_page(seq_a, 2, page(vec![post(20, 2, "older", 0)], 3));

    assert_eq!(app.feed.pagination.current_page, 3);
    assert_eq!(app.feed.posts[0].contents, "newer");
}

#[test]
fn posted_scribble_shows_on_reload_with_zero_likes() {
    let mut app = app_for("/");
    deliver(&mut app, 1, page(vec![post(1, 2, "first", 4)], 1));

    // After a successful post the client reloads page 1; the server returns
    // the new scribble first (reverse chronological), count zero.
    deliver(
        &mut app,
        1,
        page(vec![post(2, 1, "hello", 0), post(1, 2, "first", 4)], 1),
    );

    assert_eq!(app.feed.posts[0].contents, "hello");
    assert_eq!(app.feed.posts[0].likes, 0);
    assert_eq!(app.feed.posts[1].contents, "first");
}

#[test]
fn edit_persists_across_rerender_and_reload() {
    let mut app = app_for("/");
    deliver(&mut app, 1, page(vec![post(7, 1, "old", 0)], 1));

    // Saving the edit patches the rendered content in place...
    app.apply_edit(7, "new".to_string());
    assert_eq!(app.feed.posts[0].contents, "new");

    // ...and the next load (server already persisted it) agrees.
    deliver(&mut app, 1, page(vec![post(7, 1, "new", 0)], 1));
    assert_eq!(app.feed.posts[0].contents, "new");
}

#[test]
fn like_keys_round_trip_through_the_dispatch_table() {
    let mut app = app_for("/");
    deliver(&mut app, 1, page(vec![post(9, 2, "likeable", 2)], 1));

    // 'l' asks for the network call; the response patches local state.
    let action = app.handle_key_event(key(KeyCode::Char('l'))).unwrap();
    assert_eq!(action, Some(Action::ToggleLike));

    app.apply_like(9, true);
    assert_eq!(app.feed.posts[0].likes, 3);
    assert!(app.feed.posts[0].user_has_liked);

    app.apply_like(9, false);
    assert_eq!(app.feed.posts[0].likes, 2);
    assert!(!app.feed.posts[0].user_has_liked);
}

#[test]
fn profile_route_wires_the_follow_panel() {
    let mut app = app_for("/profile/5");
    assert!(app.follow.is_some());
    assert_eq!(app.follow.as_ref().unwrap().owner_id, 5);

    // 'f' dispatches the follow toggle only here.
    let action = app.handle_key_event(key(KeyCode::Char('f'))).unwrap();
    assert_eq!(action, Some(Action::ToggleFollow));

    let mut following = app_for("/following");
    assert!(following.follow.is_none());
    assert_eq!(
        following.handle_key_event(key(KeyCode::Char('f'))).unwrap(),
        None
    );
}

#[test]
fn reload_resets_an_open_compose_box() {
    let mut app = app_for("/");
    deliver(&mut app, 1, page(vec![post(1, 2, "x", 0)], 1));

    app.handle_key_event(key(KeyCode::Char('c'))).unwrap();
    assert_eq!(app.input_mode, InputMode::Typing);
    app.handle_key_event(key(KeyCode::Char('h'))).unwrap();
    app.handle_key_event(key(KeyCode::Char('i'))).unwrap();
    assert_eq!(app.composer.get_content(), "hi");

    deliver(&mut app, 1, page(vec![post(1, 2, "x", 0)], 1));
    assert!(!app.composer.is_open());
    assert_eq!(app.composer.char_count(), 0);
    assert_eq!(app.input_mode, InputMode::Navigation);
}
