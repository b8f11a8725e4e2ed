use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use scribble_types::{FeedPage, FollowResponse, Post, SCRIBBLE_MAX_CHARS};

use crate::api::ApiClient;
use crate::route::ViewContext;
use crate::{log_api_call, log_key_event};

pub mod state;
pub use state::*;


/// Deferred work a key press asks for. The event loop awaits these so the
/// synchronous key handler stays testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadPage(u32),
    ToggleLike,
    ToggleFollow,
    SubmitComposer,
}

impl App {
    pub fn new(ctx: ViewContext, api_client: ApiClient, viewer: Option<i64>) -> Self {
        Self {
            running: true,
            follow: ctx.profile_owner().map(FollowPanel::new),
            ctx,
            viewer,
            api_client,
            input_mode: InputMode::Navigation,
            feed: FeedState::new(),
            composer: ComposerState::new(),
            notice: None,
            usernames: std::collections::HashMap::new(),
            log_config: crate::logging::LogConfig::default(),
        }
    }

    /// Display name for a post, after resolution.
    pub fn display_name(post: &Post) -> &str {
        post.username.as_deref().unwrap_or("Unknown User")
    }

    /// Whether the viewer owns the given post (id equality).
    pub fn owns(&self, post: &Post) -> bool {
        self.viewer == Some(post.owner_id)
    }

    // ------------------------------------------------------------------
    // Key dispatch
    // ------------------------------------------------------------------

    /// Handle one key press. Pure state transitions happen here; anything
    /// that needs the network comes back as an `Action`.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        log_key_event!(self.log_config, "{:?} ({:?})", key.code, self.input_mode);

        if self.input_mode == InputMode::Typing {
            return Ok(self.handle_composer_key(key));
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('j') | KeyCode::Down => self.feed.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.feed.select_previous(),
            KeyCode::Char('l') | KeyCode::Enter => return Ok(Some(Action::ToggleLike)),
            KeyCode::Char('f') => {
                if self.follow.is_some() {
                    return Ok(Some(Action::ToggleFollow));
                }
            }
            KeyCode::Char('c') => self.open_new_scribble(),
            KeyCode::Char('e') => self.start_edit_selected(),
            KeyCode::Char('n') | KeyCode::Right => return Ok(self.next_page()),
            KeyCode::Char('p') | KeyCode::Left => return Ok(self.previous_page()),
            KeyCode::Char('r') => {
                return Ok(Some(Action::LoadPage(self.feed.pagination.current_page)))
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_composer_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.composer.reset();
                self.input_mode = InputMode::Navigation;
                None
            }
            KeyCode::Enter => Some(Action::SubmitComposer),
            _ => {
                // The counter may run past the hard limit; submission is what
                // gets blocked, matching the disabled submit button.
                use tui_textarea::Input;
                let input = Input::from(crossterm::event::Event::Key(key));
                self.composer.textarea.input(input);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Composer
    // ------------------------------------------------------------------

    /// Open the compose box for a new scribble. Home context only; other
    /// pages have no compose box to open.
    pub fn open_new_scribble(&mut self) {
        if !self.ctx.has_composer() {
            return;
        }
        self.composer.open(ComposerMode::NewScribble, "");
        self.input_mode = InputMode::Typing;
    }

    /// Switch the selected post into its editable form. No-op unless the
    /// viewer owns the post.
    pub fn start_edit_selected(&mut self) {
        let Some(post) = self.feed.selected_post() else {
            return;
        };
        if !self.owns(post) {
            return;
        }
        let mode = ComposerMode::EditPost { post_id: post.id };
        let contents = post.contents.clone();
        self.composer.open(mode, &contents);
        self.input_mode = InputMode::Typing;
    }

    /// Submit the composer content according to its mode.
    pub async fn submit_composer(&mut self) -> Result<()> {
        let Some(mode) = self.composer.mode.clone() else {
            return Ok(());
        };

        let content = self.composer.get_content();
        if content.trim().is_empty() {
            self.notice = Some("Cannot post an empty scribble.".to_string());
            return Ok(());
        }
        if !self.composer.submit_enabled() {
            self.notice = Some(format!(
                "Scribble exceeds {} characters (current: {})",
                SCRIBBLE_MAX_CHARS,
                self.composer.char_count()
            ));
            return Ok(());
        }
        self.notice = None;

        match mode {
            ComposerMode::NewScribble => {
                log_api_call!(self.log_config, "POST /api/post_scribble/");
                match self.api_client.post_scribble(content).await {
                    Ok(()) => {
                        self.composer.reset();
                        self.input_mode = InputMode::Navigation;
                        self.load_feed(1).await?;
                    }
                    Err(e) => {
                        // Composer stays open so the draft is not lost.
                        log::error!("Error posting scribble: {}", e);
                    }
                }
            }
            ComposerMode::EditPost { post_id } => {
                log_api_call!(self.log_config, "POST /api/edit_post/{}/", post_id);
                match self.api_client.edit_post(post_id, content.clone()).await {
                    Ok(()) => {
                        self.apply_edit(post_id, content);
                        self.composer.reset();
                        self.input_mode = InputMode::Navigation;
                    }
                    Err(e) => match e {
                        crate::api::ApiError::Network(_) => {
                            log::error!("Error editing post {}: {}", post_id, e)
                        }
                        other => self.notice = Some(other.to_string()),
                    },
                }
            }
        }
        Ok(())
    }

    /// Re-render the edited content as plain text in place.
    pub fn apply_edit(&mut self, post_id: i64, content: String) {
        if let Some(post) = self.feed.posts.iter_mut().find(|p| p.id == post_id) {
            post.contents = content;
        }
    }

    // ------------------------------------------------------------------
    // Feed loading
    // ------------------------------------------------------------------

    /// Fetch and apply one page of the feed for the active context.
    ///
    /// On failure the previous posts and pagination stay as they were; the
    /// error only reaches the status line and the log.
    pub async fn load_feed(&mut self, page: u32) -> Result<()> {
        let seq = self.feed.begin_load();
        let filter = self.ctx.filter();
        log_api_call!(self.log_config, "GET /api/data/ page={} {:?}", page, filter);

        match self.api_client.feed(&filter, page).await {
            Ok(mut feed_page) => {
                self.resolve_usernames(&mut feed_page.posts).await;
                self.apply_feed_page(seq, page, feed_page);
                if let Some(panel) = &mut self.follow {
                    if panel.username.is_none() {
                        panel.username = self.usernames.get(&panel.owner_id).cloned();
                    }
                }
            }
            Err(e) => {
                log::error!("Error fetching or processing feed: {}", e);
                // A stale failure must not disturb a newer load either.
                if self.feed.is_current(seq) {
                    self.feed.error = Some(categorize_error(&e.to_string()));
                    self.feed.loading = false;
                }
            }
        }
        Ok(())
    }

    /// Apply a fetched page if its sequence token is still the newest;
    /// superseded responses are dropped on the floor.
    pub fn apply_feed_page(&mut self, seq: u64, page_index: u32, page: FeedPage) {
        if !self.feed.is_current(seq) {
            log::debug!("Discarding stale feed response (seq {})", seq);
            return;
        }

        self.feed.pagination.apply(page_index, &page);
        self.feed.posts = page.posts;
        if self.feed.posts.is_empty() {
            self.feed.list_state.select(None);
        } else {
            self.feed.list_state.select(Some(0));
        }
        self.feed.loading = false;
        self.feed.error = None;
        self.notice = None;

        // A fresh render also resets the compose box and its counter.
        self.composer.reset();
        self.input_mode = InputMode::Navigation;
    }

    /// Fill in display names, one request per distinct owner, memoized for
    /// the life of the app. A failed lookup renders as "Unknown User" and is
    /// retried on the next load.
    async fn resolve_usernames(&mut self, posts: &mut [Post]) {
        // Names the server already embedded seed the cache for free.
        for post in posts.iter() {
            if let Some(name) = &post.username {
                self.usernames
                    .entry(post.owner_id)
                    .or_insert_with(|| name.clone());
            }
        }

        let mut missing: Vec<i64> = posts
            .iter()
            .filter(|p| p.username.is_none() && !self.usernames.contains_key(&p.owner_id))
            .map(|p| p.owner_id)
            .collect();
        missing.sort_unstable();
        missing.dedup();

        // Also resolve the profile owner's name, even on an empty page.
        if let Some(panel) = &self.follow {
            if panel.username.is_none() && !self.usernames.contains_key(&panel.owner_id) {
                missing.push(panel.owner_id);
            }
        }

        for owner_id in missing {
            log_api_call!(self.log_config, "GET /api/get_username_by_id/?owner_id={}", owner_id);
            match self.api_client.username_by_id(owner_id).await {
                Ok(name) => {
                    self.usernames.insert(owner_id, name);
                }
                Err(e) => {
                    log::warn!("Error fetching username for {}: {}", owner_id, e);
                }
            }
        }

        for post in posts.iter_mut() {
            if post.username.is_none() {
                post.username = Some(
                    self.usernames
                        .get(&post.owner_id)
                        .cloned()
                        .unwrap_or_else(|| "Unknown User".to_string()),
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    pub fn next_page(&mut self) -> Option<Action> {
        if self.feed.pagination.next_enabled() {
            Some(Action::LoadPage(self.feed.pagination.current_page + 1))
        } else {
            None
        }
    }

    pub fn previous_page(&mut self) -> Option<Action> {
        if self.feed.pagination.prev_enabled() {
            Some(Action::LoadPage(self.feed.pagination.current_page - 1))
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Like toggle
    // ------------------------------------------------------------------

    /// Toggle the like on the selected post.
    pub async fn toggle_like_selected(&mut self) -> Result<()> {
        let Some(post_id) = self.feed.selected_post().map(|p| p.id) else {
            return Ok(());
        };
        log_api_call!(self.log_config, "POST /api/update_like/ id={}", post_id);

        match self.api_client.toggle_like(post_id).await {
            Ok(resp) => {
                self.notice = None;
                self.apply_like(post_id, resp.is_new_like);
            }
            Err(e) if e.is_unauthenticated() => {
                // The web client alerts and navigates to the login page; the
                // closest terminal equivalent is a notice plus the browser.
                let login_url = self.api_client.login_url();
                log::error!("Error updating like, likely user not logged in: {}", e);
                self.notice = Some(format!("Please log in to like a scribble ({})", login_url));
                if let Err(err) = webbrowser::open(&login_url) {
                    log::warn!("Could not open login page: {}", err);
                }
            }
            Err(e) => {
                log::error!("Error updating like value: {}", e);
            }
        }
        Ok(())
    }

    /// Patch the local count and liked state from the toggle response.
    /// Decrements are floor-clamped at zero.
    pub fn apply_like(&mut self, post_id: i64, is_new_like: bool) {
        if let Some(post) = self.feed.posts.iter_mut().find(|p| p.id == post_id) {
            if is_new_like {
                post.likes += 1;
                post.user_has_liked = true;
            } else {
                if post.likes > 0 {
                    post.likes -= 1;
                }
                post.user_has_liked = false;
            }
        }
    }

    // ------------------------------------------------------------------
    // Follow toggle
    // ------------------------------------------------------------------

    /// Toggle following the profile owner.
    pub async fn toggle_follow(&mut self) -> Result<()> {
        let Some(owner_id) = self.follow.as_ref().map(|p| p.owner_id) else {
            return Ok(());
        };
        log_api_call!(self.log_config, "POST /api/update_follow/ id={}", owner_id);

        match self.api_client.toggle_follow(owner_id).await {
            Ok(resp) => {
                self.notice = None;
                self.apply_follow(&resp);
            }
            Err(e) => match e {
                crate::api::ApiError::Network(_) => {
                    log::error!("Error updating follow value: {}", e)
                }
                other => {
                    // Server-supplied message, surfaced to the user.
                    self.notice = Some(other.to_string());
                    log::error!("Error updating follow value: {}", other);
                }
            },
        }
        Ok(())
    }

    /// Rewrite the follow label and both counts from the server response.
    pub fn apply_follow(&mut self, resp: &FollowResponse) {
        if let Some(panel) = &mut self.follow {
            panel.is_following = resp.is_new_follow;
            panel.follower_count = Some(resp.follower_count);
            panel.following_count = Some(resp.following_count);
        }
    }
}

/// Map low-level error text onto the short messages the status line shows.
fn categorize_error(error_str: &str) -> String {
    let error_lower = error_str.to_lowercase();

    if error_lower.contains("connection")
        || error_lower.contains("timeout")
        || error_lower.contains("network")
    {
        return "Network Error: Connection failed. Check your network and press r to retry"
            .to_string();
    }

    if error_lower.contains("401")
        || error_lower.contains("403")
        || error_lower.contains("not logged in")
        || error_lower.contains("forbidden")
    {
        return "Not logged in: log in on the website, then press r to retry".to_string();
    }

    if error_lower.contains("500") || error_lower.contains("502") || error_lower.contains("503") {
        return "Server Error: the server hit a problem. Try again shortly".to_string();
    }

    format!("Error: {}", error_str)
}
