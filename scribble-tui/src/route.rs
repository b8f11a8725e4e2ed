use regex::Regex;

/// Which view the client was launched into. Mirrors the page routes of the
/// web front end; there is no in-app router, so the context is fixed for the
/// life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContext {
    /// `/` — the full feed plus the compose box.
    Home,
    /// `/profile/<int>` — one user's posts plus the follow panel.
    Profile(i64),
    /// `/following` — posts from users the viewer follows.
    Following,
}

/// The feed filter the posts endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFilter {
    All,
    Owner(i64),
    Following,
}

impl ViewContext {
    /// Parse a URL-style route. Returns `None` for anything the client does
    /// not recognize.
    pub fn parse(path: &str) -> Option<Self> {
        if path == "/" || path.is_empty() {
            return Some(ViewContext::Home);
        }
        if path == "/following" || path == "/following/" {
            return Some(ViewContext::Following);
        }

        let profile_re = Regex::new(r"^/profile/(\d+)/?$").expect("static regex");
        if let Some(caps) = profile_re.captures(path) {
            let owner_id: i64 = caps[1].parse().ok()?;
            return Some(ViewContext::Profile(owner_id));
        }

        None
    }

    pub fn filter(&self) -> FeedFilter {
        match self {
            ViewContext::Home => FeedFilter::All,
            ViewContext::Profile(owner_id) => FeedFilter::Owner(*owner_id),
            ViewContext::Following => FeedFilter::Following,
        }
    }

    /// Only the home context has a compose box.
    pub fn has_composer(&self) -> bool {
        matches!(self, ViewContext::Home)
    }

    /// Only profile pages carry the follow panel.
    pub fn profile_owner(&self) -> Option<i64> {
        match self {
            ViewContext::Profile(owner_id) => Some(*owner_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_home() {
        assert_eq!(ViewContext::parse("/"), Some(ViewContext::Home));
        assert_eq!(ViewContext::parse(""), Some(ViewContext::Home));
    }

    #[test]
    fn parses_profile_with_integer_id() {
        assert_eq!(
            ViewContext::parse("/profile/42"),
            Some(ViewContext::Profile(42))
        );
        assert_eq!(
            ViewContext::parse("/profile/42/"),
            Some(ViewContext::Profile(42))
        );
    }

    #[test]
    fn parses_following() {
        assert_eq!(ViewContext::parse("/following"), Some(ViewContext::Following));
    }

    #[test]
    fn rejects_unknown_routes() {
        assert_eq!(ViewContext::parse("/profile/abc"), None);
        assert_eq!(ViewContext::parse("/profile/"), None);
        assert_eq!(ViewContext::parse("/settings"), None);
    }

    #[test]
    fn filter_follows_context() {
        assert_eq!(ViewContext::Home.filter(), FeedFilter::All);
        assert_eq!(ViewContext::Profile(7).filter(), FeedFilter::Owner(7));
        assert_eq!(ViewContext::Following.filter(), FeedFilter::Following);
    }

    #[test]
    fn composer_only_on_home() {
        assert!(ViewContext::Home.has_composer());
        assert!(!ViewContext::Profile(1).has_composer());
        assert!(!ViewContext::Following.has_composer());
    }
}
