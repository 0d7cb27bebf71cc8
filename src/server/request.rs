use http::Method;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Inbound request descriptor handed to filters and handlers.
///
/// The query string is kept raw; path parameters extracted by the router are merged
/// into it before any filter runs, so handlers read them with [`Request::query_param`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Path without the query string
    pub path: String,
    /// Raw query string without the leading `?`
    pub raw_query: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Request {
    /// Build a request from a method and a request target such as `/cats/1?x=2`.
    ///
    /// The path is percent-decoded before it is stored, so `%2F` becomes a real
    /// segment separator for matching. The query string stays raw.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        Self {
            method,
            path: decode_path(path),
            raw_query: raw_query.to_string(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Builder-style header insert; the name is lowercased.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Decoded query pairs in the order they appear.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.raw_query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// First value for `name`, if any.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.raw_query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Every value for `name`, in order.
    #[must_use]
    pub fn query_values(&self, name: &str) -> Vec<String> {
        url::form_urlencoded::parse(self.raw_query.as_bytes())
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    /// Prepend `params` to the raw query string.
    ///
    /// The existing query is kept after a `&` separator; no separator is added when the
    /// existing query is empty.
    pub fn merge_query<'a, I>(&mut self, params: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(params);
        let encoded = serializer.finish();
        if encoded.is_empty() {
            return;
        }
        self.raw_query = if self.raw_query.is_empty() {
            encoded
        } else {
            format!("{encoded}&{}", self.raw_query)
        };
    }
}

fn decode_path(path: &str) -> String {
    if !path.contains('%') {
        return path.to_string();
    }
    String::from_utf8_lossy(&urlencoding::decode_binary(path.as_bytes())).into_owned()
}

/// Convert a `may_minihttp::Request` into a [`Request`].
///
/// Extension methods are kept as-is. A method token `http` rejects outright is treated
/// as `GET`.
pub fn parse_request(req: may_minihttp::Request) -> Request {
    let method = Method::from_bytes(req.method().as_bytes()).unwrap_or(Method::GET);
    let mut request = Request::new(method, req.path());

    request.headers = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let mut body = Vec::new();
    if let Err(err) = req.body().read_to_end(&mut body) {
        debug!(error = %err, "Request body read failed");
    }
    request.body = body;

    debug!(
        method = %request.method,
        path = %request.path,
        headers_count = request.headers.len(),
        body_size_bytes = request.body.len(),
        "HTTP request parsed"
    );
    request
}
