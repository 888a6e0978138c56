pub mod auth;

pub use auth::{auth_middleware, AuthErrorResponse, AuthState, CredentialSource};
