use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database, IndexModel};

use crate::comment::model::Comment;
use crate::comment::repository::CommentRepository;
use crate::utils::error::CustomError;

pub struct CommentService {
    collection: Collection<Comment>,
}

impl CommentService {
    pub fn new(db: &Database) -> Self {
        CommentService {
            collection: db.collection::<Comment>("comments"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), CustomError> {
        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "post_id": 1, "active": 1, "created_at": 1 })
                    .build(),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for CommentService {
    async fn add_comment(&self, mut comment: Comment) -> Result<Comment, CustomError> {
        let result = self.collection.insert_one(&comment).await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to add comment: {}", e))
        })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            CustomError::InternalServerError("Failed to get inserted comment ID".to_string())
        })?;
        comment.id = Some(id);

        Ok(comment)
    }

    async fn active_for_post(&self, post_id: &ObjectId) -> Result<Vec<Comment>, CustomError> {
        let cursor = self
            .collection
            .find(doc! { "post_id": *post_id, "active": true })
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to fetch comments: {}", e))
            })?;

        let comments: Vec<Comment> = cursor.try_collect().await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to collect comments: {}", e))
        })?;

        Ok(comments)
    }
}
