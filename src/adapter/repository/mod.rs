pub mod in_memory;
pub mod member_postgres;
pub mod user_postgres;

pub use in_memory::{InMemoryMemberRepository, InMemorySessionRepository, InMemoryUserRepository};
pub use member_postgres::MemberPostgresRepository;
pub use user_postgres::UserPostgresRepository;
