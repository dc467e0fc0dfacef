use url::form_urlencoded;

/// Page size used when the caller's limit is out of range.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size the API accepts.
pub const MAX_LIMIT: i64 = 100;

/// Normalizes a page size: anything `<= 0` or `> 100` becomes 10.
pub fn clamp_limit(limit: i64) -> i64 {
    if limit <= 0 || limit > MAX_LIMIT {
        DEFAULT_LIMIT
    } else {
        limit
    }
}

/// Builds a URL-escaped query string, one `key=value` pair at a time.
pub struct Query {
    pairs: form_urlencoded::Serializer<'static, String>,
}

impl Query {
    pub fn new() -> Self {
        Self {
            pairs: form_urlencoded::Serializer::new(String::new()),
        }
    }

    /// Appends the pair unconditionally.
    pub fn push(&mut self, key: &str, value: &str) -> &mut Self {
        self.pairs.append_pair(key, value);
        self
    }

    /// Appends the pair only when `value` is non-empty.
    pub fn push_opt(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.pairs.append_pair(key, value);
        }
        self
    }

    pub fn finish(mut self) -> String {
        self.pairs.finish()
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins an endpoint path and a query string.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
