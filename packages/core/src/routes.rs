//! Route definitions for the application

use std::fmt;

/// All application routes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Verify,
    Register,
    Home,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Verify => "/verify",
            Route::Register => "/register",
            Route::Home => "/",
        }
    }

    /// Resolve a path. Unknown paths fall back to Home, which is protected,
    /// so an anonymous visitor still ends up on Login.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/verify" => Route::Verify,
            "/register" => Route::Register,
            _ => Route::Home,
        }
    }

    /// Routes that require a committed session user
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Register | Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
