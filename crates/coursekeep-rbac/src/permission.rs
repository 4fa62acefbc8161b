use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::route::normalize_route;

/// An HTTP method and the normalized routes it is allowed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPermission")]
pub struct Permission {
    pub method: String,
    routes: HashSet<String>,
}

/// Shape of a permission as written in the role file, before normalization.
#[derive(Deserialize)]
struct RawPermission {
    method: String,
    #[serde(default)]
    routes: Vec<String>,
}

impl From<RawPermission> for Permission {
    fn from(raw: RawPermission) -> Self {
        Permission::new(raw.method, raw.routes)
    }
}

impl Permission {
    pub fn new<I, S>(method: impl Into<String>, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            method: method.into(),
            routes: routes
                .into_iter()
                .map(|r| normalize_route(r.as_ref()))
                .collect(),
        }
    }

    pub fn matches_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }

    /// `route` must already be normalized.
    pub fn allows(&self, normalized_route: &str) -> bool {
        self.routes.contains(normalized_route)
    }

    pub fn routes(&self) -> &HashSet<String> {
        &self.routes
    }
}
