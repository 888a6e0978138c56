pub mod member_repository;
pub mod session_repository;
pub mod user_repository;

pub use member_repository::MemberRepository;
pub use session_repository::SessionRepository;
pub use user_repository::{CreateUserError, UserRepository};
