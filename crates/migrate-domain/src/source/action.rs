use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action type Trello records when a member posts a comment on a card.
pub const COMMENT_CARD: &str = "commentCard";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub data: ActionData,
    #[serde(default)]
    pub member_creator: Member,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
}

impl Action {
    pub fn is_comment(&self) -> bool {
        self.kind == COMMENT_CARD
    }

    /// Display name of the comment author, falling back to the username.
    pub fn author(&self) -> &str {
        if self.member_creator.full_name.is_empty() {
            &self.member_creator.username
        } else {
            &self.member_creator.full_name
        }
    }
}
