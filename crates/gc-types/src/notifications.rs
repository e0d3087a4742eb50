use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.is_read).count()
}
