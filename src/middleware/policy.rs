//! Route authorization policy: an ordered (method, path pattern) → access table.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::auth::Identity;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

/// `"/a/b"` matches exactly; `"/a/**"` matches `/a` and everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Subtree(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(prefix) => PathPattern::Subtree(prefix.to_string()),
            None => PathPattern::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == p,
            PathPattern::Subtree(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    /// `None` matches every method.
    method: Option<Method>,
    patterns: Vec<PathPattern>,
    access: Access,
}

impl Rule {
    pub fn any_method(patterns: &[&str], access: Access) -> Self {
        Self {
            method: None,
            patterns: patterns.iter().map(|p| PathPattern::parse(p)).collect(),
            access,
        }
    }

    pub fn for_method(method: Method, patterns: &[&str], access: Access) -> Self {
        Self {
            method: Some(method),
            ..Self::any_method(patterns, access)
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().map_or(true, |m| m == method)
            && self.patterns.iter().any(|p| p.matches(path))
    }
}

/// First matching rule wins; requests matching no rule get `fallback`.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    rules: Vec<Rule>,
    fallback: Access,
}

impl RoutePolicy {
    pub fn new(rules: Vec<Rule>, fallback: Access) -> Self {
        Self { rules, fallback }
    }

    /// Account endpoints, probes and static assets are public, as is browsing
    /// listings with GET. Everything else needs a bound identity.
    pub fn standard() -> Self {
        Self::new(
            vec![
                Rule::any_method(&["/auth/industry/**"], Access::Public),
                Rule::any_method(
                    &["/test", "/", "/index.html", "/static/**", "/error", "/health"],
                    Access::Public,
                ),
                Rule::for_method(Method::GET, &["/jobs/**"], Access::Public),
                Rule::for_method(Method::GET, &["/hackathons/**"], Access::Public),
            ],
            Access::Authenticated,
        )
    }

    pub fn access_for(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map_or(self.fallback, |rule| rule.access)
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Middleware: reject anonymous requests to routes the policy marks as authenticated.
/// Must run after [`super::auth::authenticate`].
pub async fn authorize(
    State(policy): State<Arc<RoutePolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let access = policy.access_for(request.method(), request.uri().path());
    if access == Access::Authenticated && request.extensions().get::<Identity>().is_none() {
        debug!(method = %request.method(), path = %request.uri().path(), "unauthenticated request rejected");
        return AppError::Unauthorized("Authentication required".to_string()).into_response();
    }
    next.run(request).await
}
