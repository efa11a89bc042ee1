use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::call::{Call, CallResult, Callback};
use super::error::CallError;
use super::types::{Request, Response, ResponseBody};

#[derive(Debug, Default)]
struct CallState {
    executed: AtomicBool,
    cancel: CancellationToken,
}

/// [`Call`] backed by a `reqwest` client, decoding 2xx bodies as JSON.
/// Bodies of no-content types are never read.
pub struct HttpCall<T> {
    client: reqwest::Client,
    request: Request,
    timeout: Option<Duration>,
    state: Arc<CallState>,
    _body: PhantomData<fn() -> T>,
}

impl<T> HttpCall<T>
where
    T: ResponseBody,
{
    pub fn new(client: reqwest::Client, request: Request, timeout: Option<Duration>) -> Self {
        Self {
            client,
            request,
            timeout,
            state: Arc::new(CallState::default()),
            _body: PhantomData,
        }
    }

    // Same call instance, shared state. Used to move the call into a task.
    fn share(&self) -> Self {
        Self {
            client: self.client.clone(),
            request: self.request.clone(),
            timeout: self.timeout,
            state: Arc::clone(&self.state),
            _body: PhantomData,
        }
    }

    async fn perform(&self) -> CallResult<T> {
        let response = self
            .client
            .execute(self.request.to_reqwest(self.timeout))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(Response::error(status, body));
        }

        // a no-content type ignores whatever body arrives
        if let Some(body) = T::no_content() {
            return Ok(Response::new(status, Some(body)));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Response::new(status, None));
        }

        let body = serde_json::from_slice(&bytes)?;
        Ok(Response::new(status, Some(body)))
    }
}

#[async_trait]
impl<T> Call<T> for HttpCall<T>
where
    T: ResponseBody,
{
    async fn execute(&self) -> CallResult<T> {
        if self.state.executed.swap(true, Ordering::SeqCst) {
            return Err(CallError::AlreadyExecuted);
        }
        if self.state.cancel.is_cancelled() {
            return Err(CallError::Canceled);
        }

        debug!(
            method = %self.request.method(),
            url = %self.request.url(),
            "executing call"
        );

        tokio::select! {
            () = self.state.cancel.cancelled() => Err(CallError::Canceled),
            outcome = self.perform() => outcome,
        }
    }

    fn enqueue(&self, callback: Callback<T>) {
        let call = self.share();
        tokio::spawn(async move {
            let outcome = call.execute().await;
            callback(outcome);
        });
    }

    fn clone_call(&self) -> Box<dyn Call<T>> {
        Box::new(HttpCall::<T>::new(
            self.client.clone(),
            self.request.clone(),
            self.timeout,
        ))
    }

    fn cancel(&self) {
        self.state.cancel.cancel();
    }

    fn is_executed(&self) -> bool {
        self.state.executed.load(Ordering::SeqCst)
    }

    fn is_canceled(&self) -> bool {
        self.state.cancel.is_cancelled()
    }

    fn request(&self) -> &Request {
        &self.request
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
