use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User はログイン可能なアカウントを表すドメインエンティティ。
/// パスワードハッシュはシリアライズしない。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// NewUser はユーザー作成時の入力値。パスワードはハッシュ化済み。
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hashed_password: String,
}
