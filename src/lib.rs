pub mod challenge;
pub mod codewars;
pub mod config;
pub mod error;
pub mod functional;
pub mod model;
pub mod network;
pub mod paging;
pub mod present;
pub mod user;

pub use challenge::{
    ChallengeDetails, ChallengeRepository, DefaultChallengeRepository, GetChallengeDetails,
};
pub use codewars::{ChallengeApi, CodewarsApi, UserApi};
pub use config::{Settings, SettingsError};
pub use error::AppError;
pub use functional::{Either, Left, Right};
pub use network::{ApiClient, ApiError, Call, EitherCall, EitherCallAdapterFactory};
pub use user::{
    CompletedChallenge, GetUserCompletedChallenges, PagedUserRepository, UserRepository,
};
