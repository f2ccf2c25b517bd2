//! Route templates and ordered route tables
//!
//! A template such as `/compute/instances/{id}/start` is split into literal
//! and parameter segments. Tables keep their routes sorted most specific
//! first so that `/users/roles` is matched before `/users/{id}`.
//!
//! `{name}` only accepts identifier characters; `{*name}` accepts any
//! non-empty segment, for opaque values such as dotted tokens.

use reqwest::Method;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

/// Path parameters captured while matching a template
pub type PathParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Raw(String),
}

/// True if `segment` may stand in for a `{param}`
pub fn is_identifier(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn split_path(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

/// A parsed endpoint template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    pub fn parse(template: &str) -> Self {
        let segments = split_path(template)
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => match name.strip_prefix('*') {
                    Some(raw) => Segment::Raw(raw.to_string()),
                    None => Segment::Param(name.to_string()),
                },
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self {
            raw: template.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Template has no parameter segments
    pub fn is_exact(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    fn literal_prefix_len(&self) -> usize {
        self.segments
            .iter()
            .take_while(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Ordering key, higher is more specific
    fn specificity(&self) -> (bool, usize, usize, usize) {
        (
            self.is_exact(),
            self.literal_count(),
            self.literal_prefix_len(),
            self.segments.len(),
        )
    }

    /// Match a concrete path, capturing parameters
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {},
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    if !is_identifier(part) {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                },
                Segment::Raw(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                },
            }
        }
        Some(params)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One `(method, template) -> handler` entry
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: Method,
    pub template: RouteTemplate,
    pub handler: H,
}

/// Routes ordered by specificity, ties kept in declaration order
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route, keeping the table sorted
    pub fn route(mut self, method: Method, template: &str, handler: H) -> Self {
        let template = RouteTemplate::parse(template);
        let key = Reverse(template.specificity());
        // Insert after every route at least as specific
        let pos = self
            .routes
            .partition_point(|r| Reverse(r.template.specificity()) <= key);
        self.routes.insert(
            pos,
            Route {
                method,
                template,
                handler,
            },
        );
        self
    }

    /// First route matching both method and path
    pub fn resolve(&self, method: &Method, path: &str) -> Option<(&H, PathParams)> {
        self.routes
            .iter()
            .filter(|r| &r.method == method)
            .find_map(|r| r.template.matches(path).map(|params| (&r.handler, params)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }
}
