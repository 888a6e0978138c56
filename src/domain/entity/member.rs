use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member は管理対象の従業員レコードを表すドメインエンティティ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// NewMember はメンバー作成時の入力値。
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// MemberUpdate は部分更新の入力値。None のフィールドは変更しない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// PageMeta はメンバー一覧のページ情報を表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageMeta {
    pub page_id: i32,
    pub page_size: i32,
    pub page_count: i64,
    pub total_count: i64,
}

impl PageMeta {
    pub fn new(page_id: i32, page_size: i32, total_count: i64) -> Self {
        let size = i64::from(page_size.max(1));
        Self {
            page_id,
            page_size,
            page_count: (total_count + size - 1) / size,
            total_count,
        }
    }
}

/// MemberPage はメンバー一覧とページ情報を表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberPage {
    pub meta: PageMeta,
    pub data: Vec<Member>,
}
