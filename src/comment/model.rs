use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub post_id: ObjectId,
    pub name: String,
    pub email: String,
    pub content: String,
    pub active: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Cleaned comment form data.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub content: String,
}

impl Comment {
    pub fn new(post_id: ObjectId, data: NewComment) -> Self {
        let now = Utc::now();
        Comment {
            id: None,
            post_id,
            name: data.name,
            email: data.email,
            content: data.content,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct CommentView {
    pub id: Option<String>,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        CommentView {
            id: comment.id.map(|id| id.to_hex()),
            name: comment.name.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }
}
