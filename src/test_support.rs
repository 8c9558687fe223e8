//! In-memory stores and a recording mailer for handler tests.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::comment::model::Comment;
use crate::comment::repository::CommentRepository;
use crate::post::post_model::{Post, PostStatus, Tag};
use crate::post::post_repository::PostRepository;
use crate::router::index::routes;
use crate::utils::email::Mailer;
use crate::utils::error::CustomError;

pub fn tag(slug: &str) -> Tag {
    Tag {
        id: ObjectId::new(),
        slug: slug.to_string(),
        name: slug.to_uppercase(),
    }
}

/// 2024-01-01 12:00 UTC plus `day` days.
pub fn published_at(day: u64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Days::new(day)
}

/// A published post named after its slug.
pub fn post(slug: &str, day: u64, tags: &[&Tag]) -> Post {
    let publish = published_at(day);
    Post {
        id: ObjectId::new(),
        title: slug.replace('-', " "),
        slug: slug.to_string(),
        body: format!("Body of {}", slug),
        status: PostStatus::Published,
        publish,
        created_at: publish,
        updated_at: publish,
        tags: tags.iter().map(|tag| (*tag).clone()).collect(),
    }
}

#[derive(Default)]
pub struct InMemoryPosts {
    posts: RwLock<Vec<Post>>,
    tags: RwLock<Vec<Tag>>,
}

impl InMemoryPosts {
    pub async fn add_tag(&self, tag: &Tag) {
        self.tags.write().await.push(tag.clone());
    }

    pub async fn add(&self, post: &Post) {
        self.posts.write().await.push(post.clone());
    }

    async fn select(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut selected: Vec<Post> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|post| post.status == PostStatus::Published && keep(post))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.publish.cmp(&a.publish));
        selected
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn published(&self, tag: Option<&Tag>) -> Result<Vec<Post>, CustomError> {
        Ok(self
            .select(|post| tag.is_none_or(|tag| post.tags.iter().any(|t| t.id == tag.id)))
            .await)
    }

    async fn published_on(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, CustomError> {
        Ok(self
            .select(|post| post.slug == slug && post.publish.date_naive() == date)
            .await)
    }

    async fn published_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError> {
        Ok(self.select(|post| post.id == *id).await.pop())
    }

    async fn published_with_any_tag(
        &self,
        tag_ids: &[ObjectId],
        exclude: &ObjectId,
    ) -> Result<Vec<Post>, CustomError> {
        Ok(self
            .select(|post| {
                post.id != *exclude && post.tags.iter().any(|t| tag_ids.contains(&t.id))
            })
            .await)
    }

    async fn tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, CustomError> {
        Ok(self
            .tags
            .read()
            .await
            .iter()
            .find(|tag| tag.slug == slug)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryComments {
    comments: RwLock<Vec<Comment>>,
}

impl InMemoryComments {
    pub async fn all(&self) -> Vec<Comment> {
        self.comments.read().await.clone()
    }

    pub async fn insert(&self, comment: Comment) {
        self.comments.write().await.push(comment);
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn add_comment(&self, mut comment: Comment) -> Result<Comment, CustomError> {
        comment.id = Some(ObjectId::new());
        self.comments.write().await.push(comment.clone());
        Ok(comment)
    }

    async fn active_for_post(&self, post_id: &ObjectId) -> Result<Vec<Comment>, CustomError> {
        let mut active: Vec<Comment> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == *post_id && c.active)
            .cloned()
            .collect();
        active.sort_by_key(|c| c.created_at);
        Ok(active)
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub subject: String,
    pub message: String,
    pub from: String,
    pub recipients: Vec<String>,
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: RwLock<Vec<SentMail>>,
}

impl RecordingMailer {
    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn sender(&self) -> String {
        "Blog <blog@example.com>".to_string()
    }

    async fn send_mail(
        &self,
        subject: &str,
        message: &str,
        from: &str,
        recipients: &[String],
    ) -> Result<(), CustomError> {
        self.sent.write().await.push(SentMail {
            subject: subject.to_string(),
            message: message.to_string(),
            from: from.to_string(),
            recipients: recipients.to_vec(),
        });
        Ok(())
    }
}

/// Stores behind a test app.
#[derive(Default, Clone)]
pub struct TestState {
    pub posts: Arc<InMemoryPosts>,
    pub comments: Arc<InMemoryComments>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestState {
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let posts: Arc<dyn PostRepository> = self.posts.clone();
        let comments: Arc<dyn CommentRepository> = self.comments.clone();
        let mailer: Arc<dyn Mailer> = self.mailer.clone();

        cfg.app_data(web::Data::from(posts))
            .app_data(web::Data::from(comments))
            .app_data(web::Data::from(mailer))
            .configure(routes);
    }
}
