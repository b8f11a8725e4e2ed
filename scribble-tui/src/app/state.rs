use std::collections::HashMap;

use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use scribble_types::{FeedPage, Post, PAGE_SIZE, SCRIBBLE_MAX_CHARS, SCRIBBLE_WARN_CHARS};

use crate::api::ApiClient;
use crate::route::ViewContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Navigation, // Browsing the feed, shortcuts active
    Typing,     // In the composer, shortcuts disabled
}

/// Color/enablement level of the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Neutral,
    Warning,
    Over,
}

impl CounterLevel {
    /// Thresholds match the web front end: warning starts at 260, the hard
    /// limit is 280 inclusive, anything beyond disables submission.
    pub fn for_count(count: usize) -> Self {
        if count > SCRIBBLE_MAX_CHARS {
            CounterLevel::Over
        } else if count >= SCRIBBLE_WARN_CHARS {
            CounterLevel::Warning
        } else {
            CounterLevel::Neutral
        }
    }

    pub fn submit_enabled(self) -> bool {
        !matches!(self, CounterLevel::Over)
    }
}

/// Composer mode - what the textarea content will be submitted as
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerMode {
    NewScribble,
    EditPost { post_id: i64 },
}

/// Compose-box state backed by tui-textarea.
pub struct ComposerState {
    pub mode: Option<ComposerMode>,
    pub textarea: TextArea<'static>,
}

impl ComposerState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        Self {
            mode: None,
            textarea,
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn get_content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn char_count(&self) -> usize {
        self.get_content().chars().count()
    }

    pub fn level(&self) -> CounterLevel {
        CounterLevel::for_count(self.char_count())
    }

    pub fn submit_enabled(&self) -> bool {
        self.level().submit_enabled()
    }

    /// Close the composer and drop its content.
    pub fn reset(&mut self) {
        self.mode = None;
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        self.textarea = textarea;
    }

    /// Open in a given mode with prefilled content.
    pub fn open(&mut self, mode: ComposerMode, content: &str) {
        self.mode = Some(mode);
        let mut textarea = if content.is_empty() {
            TextArea::default()
        } else {
            TextArea::from(content.lines())
        };
        textarea.set_hard_tab_indent(true);
        self.textarea = textarea;
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pagination bookkeeping, derived from the latest successful fetch.
/// Button enablement is a pure function of these three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
    pub current_page_count: u32,
}

impl PaginationState {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            current_page_count: 0,
        }
    }

    /// Update from a freshly applied page.
    pub fn apply(&mut self, page_index: u32, page: &FeedPage) {
        self.current_page = page_index.max(1);
        self.total_pages = page.total_pages.max(1);
        self.current_page_count = page.current_page_count;
    }

    pub fn prev_enabled(&self) -> bool {
        self.current_page > 1
    }

    /// Next is enabled only when there is a further page and the current one
    /// came back full. A short page is always the last page worth showing.
    pub fn next_enabled(&self) -> bool {
        self.current_page != self.total_pages && self.current_page_count == PAGE_SIZE
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Follow panel for the profile being viewed. Counts are unknown until the
/// first toggle response delivers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowPanel {
    pub owner_id: i64,
    pub username: Option<String>,
    pub is_following: bool,
    pub follower_count: Option<i64>,
    pub following_count: Option<i64>,
}

impl FollowPanel {
    pub fn new(owner_id: i64) -> Self {
        Self {
            owner_id,
            username: None,
            is_following: false,
            follower_count: None,
            following_count: None,
        }
    }
}

/// Feed state: the rendered posts always reflect the most recent successful
/// fetch; a failed load leaves everything as it was.
pub struct FeedState {
    pub posts: Vec<Post>,
    pub list_state: ListState,
    pub pagination: PaginationState,
    pub loading: bool,
    pub error: Option<String>,
    /// Sequence token of the newest load that was started. A response is
    /// applied only if it still carries this token, so a superseded request
    /// can never overwrite a newer one.
    load_seq: u64,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            list_state: ListState::default(),
            pagination: PaginationState::new(),
            loading: false,
            error: None,
            load_seq: 0,
        }
    }

    /// Start a load and return its sequence token.
    pub fn begin_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.loading = true;
        self.load_seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.load_seq
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.list_state.selected().and_then(|i| self.posts.get(i))
    }

    pub fn select_next(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.posts.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(prev));
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state
pub struct App {
    pub running: bool,
    pub ctx: ViewContext,
    /// The logged-in user's id, when known. Ownership checks (edit control)
    /// compare it to `post.owner_id`.
    pub viewer: Option<i64>,
    pub api_client: ApiClient,
    pub input_mode: InputMode,
    pub feed: FeedState,
    pub follow: Option<FollowPanel>,
    pub composer: ComposerState,
    /// One-line status notice shown to the user (login prompts, follow
    /// errors). Cleared on the next successful action.
    pub notice: Option<String>,
    /// Username cache, one lookup per distinct owner for the app's lifetime.
    pub usernames: HashMap<i64, String>,
    pub log_config: crate::logging::LogConfig,
}
