use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::{AppError, Result};

static ENDPOINT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/endpoints/(?P<endpoint>[^/]+)/?$").unwrap());

static NEW_SPEC_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/endpoints/(?P<endpoint>[^/]+)/specs/new/?$").unwrap());

static SPEC_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/endpoints/(?P<endpoint>[^/]+)/specs/(?P<spec>[^/]+)/?$").unwrap()
});

/// Every page of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    NewEndpoint,
    Endpoint { endpoint_id: String },
    NewSpec { endpoint_id: String },
    Spec { endpoint_id: String, spec_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::NewEndpoint => "/endpoints/new".to_string(),
            Route::Endpoint { endpoint_id } => format!("/endpoints/{}", endpoint_id),
            Route::NewSpec { endpoint_id } => format!("/endpoints/{}/specs/new", endpoint_id),
            Route::Spec {
                endpoint_id,
                spec_id,
            } => format!("/endpoints/{}/specs/{}", endpoint_id, spec_id),
        }
    }

    pub fn from_path(path: &str) -> Result<Route> {
        let path = path.trim();
        match path {
            "/login" | "/login/" => return Ok(Route::Login),
            "" | "/" => return Ok(Route::Dashboard),
            "/endpoints/new" | "/endpoints/new/" => return Ok(Route::NewEndpoint),
            _ => {}
        }
        if let Some(caps) = NEW_SPEC_PATH.captures(path) {
            return Ok(Route::NewSpec {
                endpoint_id: caps["endpoint"].to_string(),
            });
        }
        if let Some(caps) = SPEC_PATH.captures(path) {
            return Ok(Route::Spec {
                endpoint_id: caps["endpoint"].to_string(),
                spec_id: caps["spec"].to_string(),
            });
        }
        if let Some(caps) = ENDPOINT_PATH.captures(path) {
            return Ok(Route::Endpoint {
                endpoint_id: caps["endpoint"].to_string(),
            });
        }
        Err(AppError::NotFound(format!("No page at '{}'", path)))
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The page actually shown for `requested`.
pub fn guard(requested: Route, authenticated: bool) -> Route {
    if requested.requires_auth() && !authenticated {
        Route::Login
    } else {
        requested
    }
}

/// Where a page error sends the user, if anywhere.
pub fn route_for_error(err: &AppError) -> Option<Route> {
    err.is_unauthorized().then_some(Route::Login)
}
