pub mod completed;
pub mod details;
pub mod screen;

pub use completed::{CompletedChallengeUiMapper, CompletedChallengeUiModel};
pub use details::{ActionByUiModel, ChallengeDetailsUiMapper, ChallengeDetailsUiModel, RankUiModel};
pub use screen::{ChallengeDetailsError, ChallengeDetailsScreen, ChallengeDetailsScreenState};
