use std::time::Duration;

use async_trait::async_trait;

use super::error::CallError;
use super::types::{Request, Response};

pub type CallResult<T> = std::result::Result<Response<T>, CallError>;

/// Completion handler for [`Call::enqueue`]. Runs on whichever tokio worker
/// finished the call.
pub type Callback<T> = Box<dyn FnOnce(CallResult<T>) + Send + 'static>;

/// A single deferred HTTP exchange.
///
/// A call runs at most once. `clone_call` yields an independent call for the
/// same request.
#[async_trait]
pub trait Call<T: Send + 'static>: Send + Sync {
    async fn execute(&self) -> CallResult<T>;

    fn enqueue(&self, callback: Callback<T>);

    fn clone_call(&self) -> Box<dyn Call<T>>;

    fn cancel(&self);

    fn is_executed(&self) -> bool;

    fn is_canceled(&self) -> bool;

    fn request(&self) -> &Request;

    fn timeout(&self) -> Option<Duration>;
}
