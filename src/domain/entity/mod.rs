pub mod member;
pub mod payload;
pub mod session;
pub mod token;
pub mod user;

pub use member::{Member, MemberPage, MemberUpdate, NewMember, PageMeta};
pub use payload::Payload;
pub use session::Session;
pub use token::Token;
pub use user::{NewUser, User};
