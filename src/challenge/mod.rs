pub mod mapper;
pub mod model;
pub mod repository;
pub mod usecase;

pub use mapper::ChallengeDetailsMapper;
pub use model::{ActionBy, ChallengeDetails, ChallengeStats, Rank, RankColor, Tag};
pub use repository::{ChallengeRepository, DefaultChallengeRepository};
pub use usecase::GetChallengeDetails;
