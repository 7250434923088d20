use super::Tag;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Photo => "photos",
            Self::Video => "videos",
        }
    }

    pub fn link_table(&self) -> &'static str {
        match self {
            Self::Photo => "photo_tags",
            Self::Video => "video_tags",
        }
    }

    pub fn link_column(&self) -> &'static str {
        match self {
            Self::Photo => "photo_id",
            Self::Video => "video_id",
        }
    }

    /// Directory under the upload root that holds files of this kind.
    pub fn upload_prefix(&self) -> &'static str {
        self.table()
    }

    /// Top-level MIME type accepted for uploads of this kind.
    pub fn accepted_mime(&self) -> &'static str {
        match self {
            Self::Photo => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Photo => write!(f, "photo"),
            Self::Video => write!(f, "video"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub id: Uuid,
    pub kind: MediaKind,
    pub title: String,
    pub description: String,
    pub file: Option<String>,
    pub tags: Vec<Tag>,
    pub created_at: String,
    pub updated_at: String,
}

impl std::fmt::Display for MediaItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NewMedia {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MediaUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<Uuid>>,
}
