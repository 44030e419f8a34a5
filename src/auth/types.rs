//! Routes and navigation decisions

use std::fmt;

/// A view of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Customers,
    Reports,
}

impl Route {
    /// Whether entering the route needs a session
    pub fn requires_login(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Customers => "/",
            Route::Reports => "/reports",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of the navigation guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Enter the requested route
    Proceed(Route),
    /// Go somewhere else instead
    Redirect(Route),
}

impl Navigation {
    /// The route that ends up being shown
    pub fn route(&self) -> Route {
        match self {
            Navigation::Proceed(route) | Navigation::Redirect(route) => *route,
        }
    }
}
