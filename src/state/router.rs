// Route resolution and navigation history.
// Every path maps to exactly one page; unknown paths land on NotFound.

/// One of the fixed set of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Projects,
    Articles,
    NotFound,
}

/// Known paths, matched in order. Anything else is NotFound.
const ROUTES: &[(&str, Route)] = &[
    ("/", Route::Home),
    ("/about", Route::About),
    ("/projects", Route::Projects),
    ("/articles", Route::Articles),
];

/// Resolve a navigation path to its page.
pub fn resolve(path: &str) -> Route {
    ROUTES
        .iter()
        .find(|(known, _)| *known == path)
        .map(|(_, route)| *route)
        .unwrap_or(Route::NotFound)
}

impl Route {
    /// Pages shown in the navigation bar, in order.
    pub const NAV: [Route; 4] = [Route::Home, Route::About, Route::Projects, Route::Articles];

    /// Get the display title for this route.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Projects => "Projects",
            Route::Articles => "Articles",
            Route::NotFound => "Not Found",
        }
    }

    /// Canonical path for this route. NotFound has none.
    pub fn path(&self) -> Option<&'static str> {
        ROUTES
            .iter()
            .find(|(_, route)| route == self)
            .map(|(path, _)| *path)
    }

    pub fn next(&self) -> Self {
        match self {
            Route::Home => Route::About,
            Route::About => Route::Projects,
            Route::Projects => Route::Articles,
            Route::Articles | Route::NotFound => Route::Home,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Route::Home | Route::NotFound => Route::Articles,
            Route::About => Route::Home,
            Route::Projects => Route::About,
            Route::Articles => Route::Projects,
        }
    }
}

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbNode {
    /// Path as it was navigated to.
    pub path: String,
    /// The route the path resolved to.
    pub route: Route,
}

/// Current page plus the paths visited to get there.
#[derive(Debug, Clone)]
pub struct Router {
    /// Stack of visited paths (bottom = mount path, top = current).
    history: Vec<String>,
    current: Route,
    generation: u64,
}

impl Router {
    /// Mount the router at `initial_path`.
    pub fn new(initial_path: &str) -> Self {
        Self {
            history: vec![initial_path.to_string()],
            current: resolve(initial_path),
            generation: 0,
        }
    }

    /// Move to `path`. Always succeeds; unknown paths resolve to NotFound.
    pub fn navigate(&mut self, path: &str) -> Route {
        let route = resolve(path);
        tracing::debug!(path, ?route, "navigate");
        self.history.push(path.to_string());
        self.transition(route)
    }

    /// Go back to the previous path. Returns None if already at the mount path.
    pub fn back(&mut self) -> Option<Route> {
        if self.history.len() > 1 {
            self.history.pop();
            let route = resolve(self.path());
            Some(self.transition(route))
        } else {
            None
        }
    }

    /// Check if we can go back (not at the mount path).
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// The active path.
    pub fn path(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }

    /// Count of transitions so far. Async results are tagged with it to detect staleness.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get the breadcrumb trail, oldest first.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        self.history
            .iter()
            .map(|path| BreadcrumbNode {
                path: path.clone(),
                route: resolve(path),
            })
            .collect()
    }

    fn transition(&mut self, route: Route) -> Route {
        self.current = route;
        self.generation += 1;
        route
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}
