//! Query string encoding for list and change-log endpoints.

use std::fmt::Display;

/// Ordered list of query parameters. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Push one `key=value` pair per item.
    pub fn push_all<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for v in values {
            self.pairs.push((key.to_string(), v.to_string()));
        }
        self
    }

    pub fn push_opt(&mut self, key: &str, value: Option<impl Display>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Encode as `&k=v&k=v`, ready to append after the auth parameters.
    pub fn to_query_string(&self) -> String {
        build_query_string(&self.pairs)
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// Encode pairs as `&key=value` segments, percent-encoding keys and values
/// RFC 3986 style (space becomes `%20`).
pub fn build_query_string<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();
    for (k, v) in pairs {
        out.push('&');
        out.push_str(&encode(k.as_ref()));
        out.push('=');
        out.push_str(&encode(v.as_ref()));
    }
    out
}

/// Percent-encode a single component.
pub fn encode(input: &str) -> String {
    // form encoding only differs from RFC 3986 in its space handling; a
    // literal `+` is already escaped to `%2B`
    url::form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
