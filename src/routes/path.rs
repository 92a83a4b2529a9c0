//! Request path shapes understood by the explorer.

/// Parsed form of a request path after trimming surrounding slashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestPath<'a> {
    /// `/`
    Root,
    /// `/{table}`
    Table(&'a str),
    /// `/{table}/{id}`; the id is opaque here.
    Record(&'a str, &'a str),
    /// Three or more segments.
    Nested(&'a str),
}

impl<'a> RequestPath<'a> {
    pub fn parse(path: &'a str) -> Self {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return RequestPath::Root;
        }
        let mut parts = trimmed.split('/');
        let table = parts.next().unwrap_or_default();
        match (parts.next(), parts.next()) {
            (None, _) => RequestPath::Table(table),
            (Some(id), None) => RequestPath::Record(table, id),
            (Some(_), Some(_)) => RequestPath::Nested(table),
        }
    }

    /// First segment, for every shape but the root.
    pub fn table(&self) -> Option<&'a str> {
        match *self {
            RequestPath::Root => None,
            RequestPath::Table(t) | RequestPath::Record(t, _) | RequestPath::Nested(t) => Some(t),
        }
    }
}
