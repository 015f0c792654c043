use std::{convert::Infallible, fmt, str::FromStr};

use url::form_urlencoded;

/// An ordered list of query parameters, with the semantics of the browser's `URLSearchParams`.
///
/// Parsing and serializing use `application/x-www-form-urlencoded`, so spaces become `+` and
/// reserved characters are percent-encoded exactly like the browser encodes them.
///
/// ```rust
/// # use dioxus_query_params::QueryParams;
/// let mut params = QueryParams::parse("?foo=1&q=hello+world");
/// assert_eq!(params.get("q"), Some("hello world"));
///
/// params.set("bar", "a&b");
/// assert_eq!(params.to_string(), "foo=1&q=hello+world&bar=a%26b");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// An empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// The first value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value bound to `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether `name` is bound at all.
    pub fn has(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Bind `name` to `value`.
    ///
    /// The first existing pair for `name` keeps its position and takes the new value, any further
    /// pairs for `name` are dropped. If `name` is not bound yet, the pair is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut found = false;
        self.pairs.retain_mut(|(key, current)| {
            if key != name {
                return true;
            }
            if found {
                return false;
            }
            found = true;
            *current = value.to_string();
            true
        });

        if !found {
            self.append(name, value);
        }
    }

    /// Append a pair, keeping any existing pairs for `name`.
    pub fn append(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Drop every pair for `name`. Returns whether anything was dropped.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(key, _)| key != name);
        self.pairs.len() != before
    }

    /// Drop every pair.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// The number of pairs, counting repeated names.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

impl FromStr for QueryParams {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.pairs.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_question_mark() {
        assert_eq!(QueryParams::parse("?a=1&b=2"), QueryParams::parse("a=1&b=2"));
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn decodes_like_the_browser() {
        let params = QueryParams::parse("q=caf%C3%A9+au+lait&empty=&flag");
        assert_eq!(params.get("q"), Some("café au lait"));
        assert_eq!(params.get("empty"), Some(""));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn encodes_reserved_characters() {
        let mut params = QueryParams::new();
        params.set("path", "/a b?c=d&e#f");
        assert_eq!(params.to_string(), "path=%2Fa+b%3Fc%3Dd%26e%23f");
    }

    #[test]
    fn set_overwrites_first_and_drops_duplicates() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.to_string(), "a=9&b=2");
    }

    #[test]
    fn set_appends_new_names() {
        let mut params = QueryParams::parse("foo=1");
        params.set("bar", "2");
        assert_eq!(params.to_string(), "foo=1&bar=2");
    }

    #[test]
    fn duplicates_survive_untouched() {
        let mut params = QueryParams::parse("tag=a&tag=b&page=1");
        params.set("page", "2");
        assert_eq!(params.get("tag"), Some("a"));
        assert_eq!(params.get_all("tag").collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(params.to_string(), "tag=a&tag=b&page=2");
    }

    #[test]
    fn delete_reports_whether_anything_changed() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        assert!(params.delete("a"));
        assert!(!params.delete("a"));
        assert_eq!(params.to_string(), "b=2");
    }

    #[test]
    fn collects_from_pairs() {
        let params: QueryParams = [("x", "1"), ("y", "two words")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.to_string(), "x=1&y=two+words");
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            [("x", "1"), ("y", "two words")]
        );
    }
}
