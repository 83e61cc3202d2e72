use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    ops::{Deref, DerefMut},
    str::FromStr,
};

use bytes::Bytes;
use url::Url;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: RequestMethod,
    pub url: Url,
    pub headers: RequestHeaders,
    pub body: Bytes,
}

/// Ordered so that identical requests produce identical outbound headers.
/// Keys differing only in case are distinct entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestHeaders(pub BTreeMap<String, String>);

impl RequestHeaders {
    pub fn get(&self, key: &str) -> Option<&String> {
        BTreeMap::get(self, key)
    }

    /// Header names are case-insensitive on the wire, map keys are not.
    pub fn contains_ignore_case(&self, key: &str) -> bool {
        self.keys().any(|k| k.eq_ignore_ascii_case(key))
    }
}

impl Deref for RequestHeaders {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RequestHeaders {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[(String, String); N]> for RequestHeaders {
    fn from(arr: [(String, String); N]) -> Self {
        let map = arr.into_iter().collect();
        RequestHeaders(map)
    }
}

impl FromIterator<(String, String)> for RequestHeaders {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        RequestHeaders(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl RequestMethod {
    pub const ALL: [RequestMethod; 7] = [
        RequestMethod::Get,
        RequestMethod::Post,
        RequestMethod::Put,
        RequestMethod::Delete,
        RequestMethod::Patch,
        RequestMethod::Head,
        RequestMethod::Options,
    ];

    /// Only these methods get a payload attached on the outbound call.
    pub fn carries_body(&self) -> bool {
        matches!(
            self,
            RequestMethod::Post | RequestMethod::Put | RequestMethod::Patch
        )
    }

    pub fn allowed_list() -> String {
        RequestMethod::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Head => "HEAD",
            RequestMethod::Options => "OPTIONS",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RequestMethod {
    type Err = RequestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        RequestMethod::ALL
            .into_iter()
            .find(|method| method.to_string() == normalized)
            .ok_or(RequestError::UnsupportedMethod(normalized))
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("HTTP method {0} is not supported")]
    UnsupportedMethod(String),
}
