pub mod adapter;
pub mod call;
pub mod error;
pub mod http_call;
pub mod service;
pub mod types;

pub use adapter::{EitherCall, EitherCallAdapter, EitherCallAdapterFactory};
pub use call::{Call, CallResult, Callback};
pub use error::{ApiError, BoxError, CallError, ConfigError};
pub use http_call::HttpCall;
pub use service::{ApiClient, Binding};
pub use types::{Endpoint, Request, Response, ResponseBody, TypeShape};
