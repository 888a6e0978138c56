pub mod create_member;
pub mod create_user;
pub mod delete_member;
pub mod delete_members;
pub mod get_current_user;
pub mod get_member;
pub mod list_members;
pub mod login_user;
pub mod logout_user;
pub mod update_member;

pub use create_member::CreateMemberUseCase;
pub use create_user::CreateUserUseCase;
pub use delete_member::DeleteMemberUseCase;
pub use delete_members::DeleteMembersUseCase;
pub use get_current_user::GetCurrentUserUseCase;
pub use get_member::GetMemberUseCase;
pub use list_members::ListMembersUseCase;
pub use login_user::LoginUserUseCase;
pub use logout_user::LogoutUserUseCase;
pub use update_member::UpdateMemberUseCase;

/// 空文字列（空白のみを含む）を None として扱う。
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
