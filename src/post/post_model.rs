use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Datelike, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub publish: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Post {
    /// Canonical path of the post's detail page.
    pub fn absolute_url(&self) -> String {
        format!(
            "/blog/{}/{}/{}/{}/",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }

    pub fn shared_tag_count(&self, other: &Post) -> usize {
        self.tags
            .iter()
            .filter(|tag| other.tags.iter().any(|t| t.id == tag.id))
            .count()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TagView {
    pub slug: String,
    pub name: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        TagView {
            slug: tag.slug.clone(),
            name: tag.name.clone(),
        }
    }
}

/// A post as handed to views, with its canonical URL resolved.
#[derive(Debug, Serialize, Clone)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub tags: Vec<TagView>,
    pub url: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        PostView {
            id: post.id.to_hex(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            body: post.body.clone(),
            publish: post.publish,
            tags: post.tags.iter().map(TagView::from).collect(),
            url: post.absolute_url(),
        }
    }
}

/// A search hit
#[derive(Debug, Serialize, Clone)]
pub struct SearchResult {
    #[serde(flatten)]
    pub post: PostView,
    pub similarity: f64,
}
