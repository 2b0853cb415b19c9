use serde::{Deserialize, Serialize};

use super::action::Action;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub id_checklists: Vec<String>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub id_attachment_cover: Option<String>,
    #[serde(default)]
    pub manual_cover_attachment: bool,
    #[serde(default)]
    pub cover: Option<Cover>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub badges: Badges,
}

impl Card {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether `attachment` is the one Trello shows as this card's cover.
    pub fn is_cover_attachment(&self, attachment: &Attachment) -> bool {
        self.id_attachment_cover
            .as_deref()
            .is_some_and(|id| !id.is_empty() && id == attachment.id)
    }

    /// The highest resolution rendition of a manually chosen cover image.
    pub fn manual_cover_image(&self) -> Option<&ScaledImage> {
        if !self.manual_cover_attachment {
            return None;
        }
        self.cover.as_ref().and_then(Cover::largest)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|action| action.is_comment())
    }
}

/// Counters Trello reports per card; used to skip fetches for empty cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Badges {
    #[serde(default)]
    pub attachments: u32,
    #[serde(default)]
    pub comments: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
}

impl CheckItem {
    pub fn is_complete(&self) -> bool {
        self.state == "complete"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// False for links bookmarked on the card rather than uploaded files.
    #[serde(default)]
    pub is_upload: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cover {
    #[serde(default)]
    pub id_attachment: Option<String>,
    #[serde(default)]
    pub scaled: Vec<ScaledImage>,
}

impl Cover {
    /// Trello lists scaled renditions smallest first.
    pub fn largest(&self) -> Option<&ScaledImage> {
        self.scaled.last()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaledImage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}
