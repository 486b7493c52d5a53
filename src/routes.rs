//! Page routes
//!
//! Every page has a path; navigation in the TUI and `astra routes` on the
//! command line share this table.

/// A navigable page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Dashboard with section shortcuts
    Home,
    /// AI chat
    Chat,
    /// Photo generation
    Photo,
    /// Video generation
    Video,
    /// Prompt catalog
    Prompts,
    /// One prompt
    PromptDetail(String),
    /// Custom assistants
    Assistants,
    /// Past generations
    Generations,
    /// Training courses
    Training,
    /// Plans and top-ups
    Subscription,
    /// User profile
    Profile,
    /// Support tickets and FAQ
    Support,
    /// Content factory: source registry
    Sources,
    /// Content factory: collection and filtering
    Collection,
    /// Content factory: credibility check
    Check,
    /// Content factory: base posts
    BasePost,
    /// Content factory: verification and editing
    Verification,
    /// Content factory: publications list
    Publications,
    /// Content factory: per-network adaptation
    PublicationEdit,
    /// Anything else (keeps the requested path)
    NotFound(String),
}

/// Pages with a fixed path, in menu order
const STATIC_ROUTES: &[(&str, Route)] = &[
    ("/", Route::Home),
    ("/chat", Route::Chat),
    ("/photo", Route::Photo),
    ("/video", Route::Video),
    ("/prompts", Route::Prompts),
    ("/assistants", Route::Assistants),
    ("/generations", Route::Generations),
    ("/training", Route::Training),
    ("/subscription", Route::Subscription),
    ("/profile", Route::Profile),
    ("/support", Route::Support),
    ("/content-factory/sources", Route::Sources),
    ("/content-factory/collection", Route::Collection),
    ("/content-factory/check", Route::Check),
    ("/content-factory/base-post", Route::BasePost),
    ("/content-factory/verification", Route::Verification),
    ("/content-factory/publications", Route::Publications),
    ("/content-factory/publications/edit", Route::PublicationEdit),
];

impl Route {
    /// Resolve a path; query string, fragment and a trailing slash are ignored
    pub fn resolve(path: &str) -> Self {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let bare = if bare.len() > 1 {
            bare.trim_end_matches('/')
        } else {
            bare
        };

        if let Some((_, route)) = STATIC_ROUTES.iter().find(|(p, _)| *p == bare) {
            return route.clone();
        }

        if let Some(id) = bare.strip_prefix("/prompt/")
            && !id.is_empty()
            && !id.contains('/')
        {
            return Self::PromptDetail(id.to_string());
        }

        Self::NotFound(path.to_string())
    }

    /// Canonical path
    pub fn path(&self) -> String {
        match self {
            Self::PromptDetail(id) => format!("/prompt/{id}"),
            Self::NotFound(path) => path.clone(),
            other => STATIC_ROUTES
                .iter()
                .find(|(_, route)| route == other)
                .map(|(path, _)| (*path).to_string())
                .unwrap_or_default(),
        }
    }

    /// Page title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Chat => "AI Chat",
            Self::Photo => "Photo generation",
            Self::Video => "Video generation",
            Self::Prompts => "Prompt catalog",
            Self::PromptDetail(_) => "Prompt",
            Self::Assistants => "My assistants",
            Self::Generations => "My generations",
            Self::Training => "Training",
            Self::Subscription => "Subscription",
            Self::Profile => "Profile",
            Self::Support => "Support",
            Self::Sources => "Sources",
            Self::Collection => "Collection & filtering",
            Self::Check => "Credibility check",
            Self::BasePost => "Base posts",
            Self::Verification => "Verification & editing",
            Self::Publications => "Publications",
            Self::PublicationEdit => "Publication & approval",
            Self::NotFound(_) => "Not found",
        }
    }

    /// Part of the content factory pipeline
    pub const fn is_content_factory(&self) -> bool {
        matches!(
            self,
            Self::Sources
                | Self::Collection
                | Self::Check
                | Self::BasePost
                | Self::Verification
                | Self::Publications
                | Self::PublicationEdit
        )
    }

    /// Pages listed in the sidebar, in order
    pub fn menu() -> Vec<Self> {
        STATIC_ROUTES.iter().map(|(_, route)| route.clone()).collect()
    }
}

/// Value of `key` in a path's query string (`?id=3&edit=true`)
pub fn query_value(path: &str, key: &str) -> Option<String> {
    let (_, query) = path.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_route_round_trips() {
        for route in Route::menu() {
            assert_eq!(Route::resolve(&route.path()), route);
        }
        let detail = Route::PromptDetail("42".to_string());
        assert_eq!(Route::resolve(&detail.path()), detail);
    }

    #[test]
    fn test_resolve_ignores_query_and_trailing_slash() {
        assert_eq!(
            Route::resolve("/content-factory/verification?id=3&edit=true"),
            Route::Verification
        );
        assert_eq!(Route::resolve("/chat/"), Route::Chat);
        assert_eq!(Route::resolve("/"), Route::Home);
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Route::resolve("/library"), Route::NotFound("/library".to_string()));
        assert!(matches!(Route::resolve("/prompt/"), Route::NotFound(_)));
        assert!(matches!(Route::resolve("/prompt/1/edit"), Route::NotFound(_)));
    }

    #[test]
    fn test_query_value() {
        let path = "/content-factory/publications/edit?id=7&edit=true";
        assert_eq!(query_value(path, "id").as_deref(), Some("7"));
        assert_eq!(query_value(path, "edit").as_deref(), Some("true"));
        assert_eq!(query_value(path, "tab"), None);
        assert_eq!(query_value("/chat", "id"), None);
    }

    #[test]
    fn test_content_factory_group() {
        assert!(Route::Check.is_content_factory());
        assert!(!Route::Chat.is_content_factory());
    }
}
