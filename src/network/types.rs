use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;

/// A success type an API call may decode into.
pub trait ResponseBody: DeserializeOwned + Send + 'static {
    /// Value for a successful response that carried no body, when this type
    /// expects none.
    fn no_content() -> Option<Self> {
        None
    }
}

impl ResponseBody for () {
    fn no_content() -> Option<Self> {
        Some(())
    }
}

/// Declared return type of an endpoint. `None` parameters describe a raw,
/// unparameterized type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Call(Option<&'static TypeShape>),
    Either(Option<(&'static TypeShape, &'static TypeShape)>),
    ApiError,
    Unit,
    Named(&'static str),
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Call(Some(inner)) => write!(f, "Call<{inner}>"),
            TypeShape::Call(None) => f.write_str("Call"),
            TypeShape::Either(Some((l, r))) => write!(f, "Either<{l}, {r}>"),
            TypeShape::Either(None) => f.write_str("Either"),
            TypeShape::ApiError => f.write_str("ApiError"),
            TypeShape::Unit => f.write_str("()"),
            TypeShape::Named(name) => f.write_str(name),
        }
    }
}

/// One entry of an API's registration table.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: Method,
    /// Path relative to the base URL. `{param}` segments are substituted.
    pub path: &'static str,
    pub returns: TypeShape,
}

#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn to_reqwest(&self, timeout: Option<Duration>) -> reqwest::Request {
        let mut request = reqwest::Request::new(self.method.clone(), self.url.clone());
        *request.headers_mut() = self.headers.clone();
        *request.timeout_mut() = timeout;
        request
    }
}

/// Transport-level envelope of a finished call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    status: StatusCode,
    body: Option<T>,
    error_body: Option<String>,
}

impl<T> Response<T> {
    pub fn success(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
            error_body: None,
        }
    }

    pub fn new(status: StatusCode, body: Option<T>) -> Self {
        Self {
            status,
            body,
            error_body: None,
        }
    }

    pub fn error(status: StatusCode, error_body: impl Into<String>) -> Self {
        Self {
            status,
            body: None,
            error_body: Some(error_body.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_successful(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn error_body(&self) -> Option<&str> {
        self.error_body.as_deref()
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }

    pub fn into_parts(self) -> (StatusCode, Option<T>, Option<String>) {
        (self.status, self.body, self.error_body)
    }
}
