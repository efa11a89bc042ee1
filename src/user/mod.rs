pub mod mapper;
pub mod model;
pub mod repository;
pub mod source;
pub mod usecase;

pub use mapper::CompletedChallengeMapper;
pub use model::{CompletedChallenge, User};
pub use repository::{CODEWARS_PAGE_SIZE, ChallengePages, PagedUserRepository, UserRepository};
pub use source::{CompletedChallengesPagingSource, InMemoryUserDataSource, UserDataSource};
pub use usecase::GetUserCompletedChallenges;
