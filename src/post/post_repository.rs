use async_trait::async_trait;
use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;

use crate::post::post_model::{Post, Tag};
use crate::utils::error::CustomError;

/// Read access to posts and tags. Every method only ever returns
/// published posts, newest first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All published posts, optionally restricted to those carrying `tag`.
    async fn published(&self, tag: Option<&Tag>) -> Result<Vec<Post>, CustomError>;

    /// Published posts with `slug` whose publish date (UTC) is `date`.
    async fn published_on(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, CustomError>;

    async fn published_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError>;

    /// Published posts other than `exclude` carrying at least one of `tag_ids`.
    async fn published_with_any_tag(
        &self,
        tag_ids: &[ObjectId],
        exclude: &ObjectId,
    ) -> Result<Vec<Post>, CustomError>;

    async fn tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, CustomError>;
}
