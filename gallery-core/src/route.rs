/// Top-level page selected from the location path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// The gallery. Carries the path below the default route, e.g. `metal-works/red-bird`.
    Home(String),
    Page(String),
    Exposition(String),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str, default_route: &str) -> Route {
        let marker = default_route.trim_matches('/');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home(String::new()),
            [first, rest @ ..] if *first == marker => Route::Home(rest.join("/")),
            ["page", slug] => Route::Page(slug.to_string()),
            ["exposition" | "projet", slug] => Route::Exposition(slug.to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Name of the component that renders this route.
    pub fn component(&self) -> &'static str {
        match self {
            Route::Home(_) => "home",
            Route::Page(_) => "page",
            Route::Exposition(_) => "exposition",
            Route::NotFound(_) => "not-found",
        }
    }
}
