pub mod api;
pub mod types;

pub use api::{CHALLENGE_DETAILS, COMPLETED_CHALLENGES, ChallengeApi, CodewarsApi, UserApi};
pub use types::{
    ActionByDto, ChallengeDetailsDto, CompletedChallengeDto, CompletedChallengesDto, RankDto,
    UnresolvedDto,
};
