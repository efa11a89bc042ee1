use async_trait::async_trait;
use reqwest::Method;

use super::types::{ChallengeDetailsDto, CompletedChallengesDto};
use crate::functional::{Either, Left};
use crate::network::{
    ApiClient, ApiError, Binding, CallError, ConfigError, EitherCall, Endpoint, TypeShape,
};

static COMPLETED_CHALLENGES_DTO: TypeShape = TypeShape::Named("CompletedChallengesDto");
static COMPLETED_CHALLENGES_RESULT: TypeShape =
    TypeShape::Either(Some((&TypeShape::ApiError, &COMPLETED_CHALLENGES_DTO)));

static CHALLENGE_DETAILS_DTO: TypeShape = TypeShape::Named("ChallengeDetailsDto");
static CHALLENGE_DETAILS_RESULT: TypeShape =
    TypeShape::Either(Some((&TypeShape::ApiError, &CHALLENGE_DETAILS_DTO)));

pub static COMPLETED_CHALLENGES: Endpoint = Endpoint {
    name: "completed_challenges",
    method: Method::GET,
    path: "users/{username}/code-challenges/completed",
    returns: TypeShape::Call(Some(&COMPLETED_CHALLENGES_RESULT)),
};

pub static CHALLENGE_DETAILS: Endpoint = Endpoint {
    name: "challenge_details",
    method: Method::GET,
    path: "code-challenges/{challengeId}",
    returns: TypeShape::Call(Some(&CHALLENGE_DETAILS_RESULT)),
};

#[async_trait]
pub trait UserApi: Send + Sync {
    async fn completed_challenges(
        &self,
        username: &str,
        page: u32,
    ) -> Either<ApiError, CompletedChallengesDto>;
}

#[async_trait]
pub trait ChallengeApi: Send + Sync {
    async fn challenge_details(&self, id: &str) -> Either<ApiError, ChallengeDetailsDto>;
}

/// Codewars REST API v1.
#[derive(Debug, Clone)]
pub struct CodewarsApi {
    client: ApiClient,
    completed: Binding,
    details: Binding,
}

impl CodewarsApi {
    pub fn new(client: ApiClient) -> Result<Self, ConfigError> {
        let completed = client.bind(&COMPLETED_CHALLENGES)?;
        let details = client.bind(&CHALLENGE_DETAILS)?;
        Ok(Self {
            client,
            completed,
            details,
        })
    }

    pub fn completed_challenges_call(
        &self,
        username: &str,
        page: u32,
    ) -> EitherCall<CompletedChallengesDto> {
        self.client.call(
            &self.completed,
            &[("username", username)],
            &[("page", page.to_string())],
        )
    }

    pub fn challenge_details_call(&self, id: &str) -> EitherCall<ChallengeDetailsDto> {
        self.client.call(&self.details, &[("challengeId", id)], &[])
    }
}

// The calls below are owned here and never canceled, so `fetch` always
// yields a value; the fallback only keeps the signature total.
async fn fetch_owned<T: crate::network::ResponseBody>(call: EitherCall<T>) -> Either<ApiError, T> {
    call.fetch()
        .await
        .unwrap_or_else(|| Left(ApiError::Unknown(Box::new(CallError::Canceled))))
}

#[async_trait]
impl UserApi for CodewarsApi {
    async fn completed_challenges(
        &self,
        username: &str,
        page: u32,
    ) -> Either<ApiError, CompletedChallengesDto> {
        fetch_owned(self.completed_challenges_call(username, page)).await
    }
}

#[async_trait]
impl ChallengeApi for CodewarsApi {
    async fn challenge_details(&self, id: &str) -> Either<ApiError, ChallengeDetailsDto> {
        fetch_owned(self.challenge_details_call(id)).await
    }
}
