use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::call::{Call, CallResult, Callback};
use super::error::{ApiError, CallError, ConfigError};
use super::types::{Request, Response, ResponseBody, TypeShape};
use crate::functional::{Either, Left, Right};

const EMPTY_BODY: &str = "Response body was null";

/// Decides at registration time whether an endpoint's declared return type
/// is `Call<Either<ApiError, T>>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EitherCallAdapterFactory;

impl EitherCallAdapterFactory {
    /// `Ok(None)` means the shape is unrelated and another mechanism should
    /// handle it. A raw `Call` or `Either` is a wiring mistake and fails.
    pub fn get(&self, return_type: &TypeShape) -> Result<Option<EitherCallAdapter>, ConfigError> {
        let TypeShape::Call(param) = *return_type else {
            return Ok(None);
        };
        let response_type = param.ok_or(ConfigError::NotParameterized("Return type"))?;

        let TypeShape::Either(params) = *response_type else {
            return Ok(None);
        };
        let (left_type, right_type) = params.ok_or(ConfigError::NotParameterized("Response type"))?;

        if *left_type != TypeShape::ApiError {
            return Ok(None);
        }

        Ok(Some(EitherCallAdapter {
            response_type: right_type,
        }))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EitherCallAdapter {
    response_type: &'static TypeShape,
}

impl EitherCallAdapter {
    pub fn response_type(&self) -> &'static TypeShape {
        self.response_type
    }

    pub fn adapt<T: ResponseBody>(&self, call: Box<dyn Call<T>>) -> EitherCall<T> {
        EitherCall { delegate: call }
    }
}

/// A call whose completion is always a successful envelope carrying
/// `Either<ApiError, T>`.
///
/// The only `Err` it reports is [`CallError::Canceled`]: a canceled call has
/// no mapped result.
pub struct EitherCall<T> {
    delegate: Box<dyn Call<T>>,
}

impl<T: ResponseBody> EitherCall<T> {
    /// Executes and unwraps the envelope. `None` for a canceled call.
    pub async fn fetch(&self) -> Option<Either<ApiError, T>> {
        match self.execute().await {
            Ok(response) => response.into_body(),
            Err(_) => None,
        }
    }
}

#[async_trait]
impl<T: ResponseBody> Call<Either<ApiError, T>> for EitherCall<T> {
    async fn execute(&self) -> CallResult<Either<ApiError, T>> {
        let outcome = self.delegate.execute().await;
        to_either(outcome)
            .map(Response::success)
            .ok_or(CallError::Canceled)
    }

    fn enqueue(&self, callback: Callback<Either<ApiError, T>>) {
        self.delegate.enqueue(Box::new(move |outcome| match to_either(outcome) {
            Some(either) => callback(Ok(Response::success(either))),
            None => debug!("call canceled, completion dropped"),
        }));
    }

    fn clone_call(&self) -> Box<dyn Call<Either<ApiError, T>>> {
        Box::new(EitherCall {
            delegate: self.delegate.clone_call(),
        })
    }

    fn cancel(&self) {
        self.delegate.cancel();
    }

    fn is_executed(&self) -> bool {
        self.delegate.is_executed()
    }

    fn is_canceled(&self) -> bool {
        self.delegate.is_canceled()
    }

    fn request(&self) -> &Request {
        self.delegate.request()
    }

    fn timeout(&self) -> Option<Duration> {
        self.delegate.timeout()
    }
}

fn to_either<T: ResponseBody>(outcome: CallResult<T>) -> Option<Either<ApiError, T>> {
    match outcome {
        Ok(response) => Some(response_to_either(response)),
        Err(error) => classify_failure(error).map(Left),
    }
}

fn response_to_either<T: ResponseBody>(response: Response<T>) -> Either<ApiError, T> {
    let (status, body, error_body) = response.into_parts();

    if !status.is_success() {
        return Left(ApiError::Http {
            code: status.as_u16(),
            body: error_body.unwrap_or_default(),
        });
    }

    match body.or_else(T::no_content) {
        Some(body) => Right(body),
        None => Left(ApiError::unknown(EMPTY_BODY)),
    }
}

fn classify_failure(error: CallError) -> Option<ApiError> {
    let api_error = match error {
        CallError::Canceled => return None,
        CallError::Io(e) => ApiError::Network(Box::new(e)),
        CallError::Transport(e) if is_connectivity(&e) => ApiError::Network(Box::new(e)),
        CallError::Transport(e) => ApiError::Unknown(Box::new(e)),
        CallError::Decode(e) => ApiError::Unknown(Box::new(e)),
        other @ CallError::AlreadyExecuted => ApiError::Unknown(Box::new(other)),
    };
    Some(api_error)
}

fn is_connectivity(error: &reqwest::Error) -> bool {
    if error.is_decode() {
        return false;
    }
    if error.is_connect() || error.is_timeout() || error.is_request() || error.is_body() {
        return true;
    }

    let mut source = error.source();
    while let Some(cause) = source {
        if cause.is::<std::io::Error>() {
            return true;
        }
        source = cause.source();
    }
    false
}
