use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::{debug, warn};

use super::adapter::{EitherCall, EitherCallAdapter, EitherCallAdapterFactory};
use super::error::{ConfigError, Result};
use super::http_call::HttpCall;
use super::types::{Endpoint, Request, ResponseBody};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// An endpoint that passed adapter registration.
#[derive(Debug, Clone)]
pub struct Binding {
    endpoint: &'static Endpoint,
    adapter: EitherCallAdapter,
}

impl Binding {
    pub fn endpoint(&self) -> &'static Endpoint {
        self.endpoint
    }
}

/// Shared HTTP client plus the base URL all endpoints resolve against.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    factory: EitherCallAdapterFactory,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
            factory: EitherCallAdapterFactory,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs adapter registration for `endpoint`. Every endpoint of an API is
    /// bound when the API is constructed, so shape mistakes never reach a
    /// request.
    pub fn bind(&self, endpoint: &'static Endpoint) -> Result<Binding> {
        let adapter = self
            .factory
            .get(&endpoint.returns)?
            .ok_or_else(|| ConfigError::NoAdapter {
                endpoint: endpoint.name,
                shape: endpoint.returns.to_string(),
            })?;

        debug!(
            endpoint = endpoint.name,
            response_type = %adapter.response_type(),
            "registered endpoint"
        );
        Ok(Binding { endpoint, adapter })
    }

    pub fn call<T: ResponseBody>(
        &self,
        binding: &Binding,
        path_params: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> EitherCall<T> {
        let url = self.resolve(binding.endpoint, path_params, query);
        let request = Request::new(binding.endpoint.method.clone(), url)
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));
        let call = HttpCall::<T>::new(self.client.clone(), request, Some(self.timeout));
        binding.adapter.adapt(Box::new(call))
    }

    fn resolve(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Url {
        let mut url = self.base_url.clone();

        // The base URL was checked to be hierarchical, so this cannot fail.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for segment in endpoint.path.split('/').filter(|s| !s.is_empty()) {
                segments.push(substitute(endpoint.name, segment, path_params));
            }
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        url
    }
}

fn substitute<'a>(endpoint: &str, segment: &'a str, path_params: &[(&str, &'a str)]) -> &'a str {
    let Some(name) = segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return segment;
    };

    match path_params.iter().find(|(key, _)| *key == name) {
        Some((_, value)) => *value,
        None => {
            warn!(endpoint, param = name, "missing path parameter");
            segment
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
