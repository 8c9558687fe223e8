use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::comment::model::Comment;
use crate::utils::error::CustomError;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Store `comment`, returning it with its id assigned.
    async fn add_comment(&self, comment: Comment) -> Result<Comment, CustomError>;

    /// Active comments of a post, oldest first.
    async fn active_for_post(&self, post_id: &ObjectId) -> Result<Vec<Comment>, CustomError>;
}
