use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::post::post_model::{Post, Tag};
use crate::post::post_repository::PostRepository;
use crate::utils::error::CustomError;

pub struct PostService {
    collection: Collection<Post>,
    tags: Collection<Tag>,
}

impl PostService {
    pub fn new(db: &Database) -> Self {
        PostService {
            collection: db.collection::<Post>("posts"),
            tags: db.collection::<Tag>("tags"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), CustomError> {
        self.collection
            .create_indexes([
                IndexModel::builder()
                    .keys(doc! { "status": 1, "publish": -1 })
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "slug": 1, "publish": -1 })
                    .build(),
                IndexModel::builder().keys(doc! { "tags._id": 1 }).build(),
            ])
            .await?;

        self.tags
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        Ok(())
    }

    async fn find_published(&self, mut filter: Document) -> Result<Vec<Post>, CustomError> {
        filter.insert("status", "published");
        log::debug!("posts query: {}", filter);

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "publish": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }
}

fn day_bounds(date: NaiveDate) -> Result<(BsonDateTime, BsonDateTime), CustomError> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CustomError::NotFoundError("Post not found".into()))?;
    let start = date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    let end = next.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());

    match (start, end) {
        (Some(start), Some(end)) => Ok((
            BsonDateTime::from_millis(start.timestamp_millis()),
            BsonDateTime::from_millis(end.timestamp_millis()),
        )),
        _ => Err(CustomError::NotFoundError("Post not found".into())),
    }
}

#[async_trait]
impl PostRepository for PostService {
    async fn published(&self, tag: Option<&Tag>) -> Result<Vec<Post>, CustomError> {
        let filter = match tag {
            Some(tag) => doc! { "tags._id": tag.id },
            None => doc! {},
        };
        self.find_published(filter).await
    }

    async fn published_on(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, CustomError> {
        let (start, end) = day_bounds(date)?;
        self.find_published(doc! {
            "slug": slug,
            "publish": { "$gte": start, "$lt": end },
        })
        .await
    }

    async fn published_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError> {
        Ok(self
            .collection
            .find_one(doc! { "_id": *id, "status": "published" })
            .await?)
    }

    async fn published_with_any_tag(
        &self,
        tag_ids: &[ObjectId],
        exclude: &ObjectId,
    ) -> Result<Vec<Post>, CustomError> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_published(doc! {
            "_id": { "$ne": *exclude },
            "tags._id": { "$in": tag_ids.to_vec() },
        })
        .await
    }

    async fn tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, CustomError> {
        Ok(self.tags.find_one(doc! { "slug": slug }).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_cover_one_utc_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let (start, end) = day_bounds(date).unwrap();
        assert_eq!(end.timestamp_millis() - start.timestamp_millis(), 86_400_000);
        assert_eq!(start.timestamp_millis(), 1_709_078_400_000);
    }
}
