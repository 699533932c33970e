/// One allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPattern {
    Exact(String),
    /// `prefix/*`: the prefix itself and everything below it
    Prefix(String),
}

impl PathPattern {
    fn parse(raw: &str) -> Self {
        match raw.strip_suffix("/*") {
            Some(prefix) => PathPattern::Prefix(normalize(prefix).to_string()),
            None => PathPattern::Exact(normalize(raw).to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => p == path,
            PathPattern::Prefix(prefix) if prefix == "/" => true,
            PathPattern::Prefix(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Trailing slashes are ignored, except for the root path.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Ordered set of paths exempt from the request gate.
///
/// Built once at startup and never mutated afterwards. Patterns are exact
/// paths (`/callback`) or a prefix wildcard (`/docs/*`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    patterns: Vec<PathPattern>,
}

impl AllowList {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<PathPattern> = Vec::new();
        for raw in patterns {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let pattern = PathPattern::parse(raw);
            if !list.contains(&pattern) {
                list.push(pattern);
            }
        }
        Self { patterns: list }
    }

    /// `path` is the request path without query string.
    pub fn is_allowed(&self, path: &str) -> bool {
        let path = normalize(path);
        self.patterns.iter().any(|p| p.matches(path))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
