use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::comment::model::{Comment, CommentView};
use crate::comment::repository::CommentRepository;
use crate::post::post_forms::{CommentForm, EmailPostForm, SearchForm};
use crate::post::post_model::{Post, PostView, SearchResult, TagView};
use crate::post::post_repository::PostRepository;
use crate::post::ranking::{search_titles, similar_posts};
use crate::utils::email::Mailer;
use crate::utils::error::CustomError;
use crate::utils::forms::BoundForm;
use crate::utils::helpers::render;
use crate::utils::pagination::{POSTS_PER_PAGE, Page, Paginator};

/// Raw query string pairs. Repeated keys are allowed; the last one wins.
type QueryPairs = web::Query<Vec<(String, String)>>;

fn last_param(pairs: QueryPairs, key: &str) -> Option<String> {
    pairs
        .into_inner()
        .into_iter()
        .filter(|(name, _)| name == key)
        .map(|(_, value)| value)
        .next_back()
}

#[derive(Serialize)]
struct ListContext {
    page: Option<String>,
    posts: Page<PostView>,
    tag: Option<TagView>,
}

#[derive(Serialize)]
struct DetailContext {
    post: PostView,
    comments: Vec<CommentView>,
    new_comment: Option<CommentView>,
    comment_form: BoundForm<CommentForm>,
    similar_posts: Vec<PostView>,
}

#[derive(Serialize)]
struct ShareContext {
    post: PostView,
    form: BoundForm<EmailPostForm>,
    sent: bool,
}

#[derive(Serialize)]
struct SearchContext {
    form: BoundForm<SearchForm>,
    query: Option<String>,
    results: Vec<SearchResult>,
}

async fn list_posts(
    posts: &dyn PostRepository,
    tag_slug: Option<String>,
    page: Option<String>,
) -> Result<HttpResponse, CustomError> {
    let tag = match tag_slug {
        Some(slug) => match posts.tag_by_slug(&slug).await? {
            Some(tag) => Some(tag),
            None => {
                log::warn!("unknown tag {:?}", slug);
                return Err(CustomError::NotFoundError("Tag not found".into()));
            }
        },
        None => None,
    };

    let object_list: Vec<PostView> = posts
        .published(tag.as_ref())
        .await?
        .iter()
        .map(PostView::from)
        .collect();
    let selected = Paginator::new(object_list, POSTS_PER_PAGE).page(page.as_deref());

    Ok(render(
        "blog/post/list.html",
        "Posts fetched successfully",
        ListContext {
            page,
            posts: selected,
            tag: tag.as_ref().map(TagView::from),
        },
    ))
}

/// GET /blog/
pub async fn post_list(
    posts: web::Data<dyn PostRepository>,
    query: QueryPairs,
) -> Result<HttpResponse, CustomError> {
    list_posts(posts.get_ref(), None, last_param(query, "page")).await
}

/// GET /blog/tag/{tag_slug}/
pub async fn post_list_by_tag(
    posts: web::Data<dyn PostRepository>,
    tag_slug: web::Path<String>,
    query: QueryPairs,
) -> Result<HttpResponse, CustomError> {
    list_posts(
        posts.get_ref(),
        Some(tag_slug.into_inner()),
        last_param(query, "page"),
    )
    .await
}

async fn find_post_on(
    posts: &dyn PostRepository,
    (year, month, day, slug): (i32, u32, u32, String),
) -> Result<Post, CustomError> {
    let not_found = || CustomError::NotFoundError("Post not found".into());

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(not_found)?;
    let mut matches = posts.published_on(date, &slug).await?;
    if matches.len() != 1 {
        log::warn!("{} published posts match {} on {}", matches.len(), slug, date);
        return Err(not_found());
    }

    matches.pop().ok_or_else(not_found)
}

async fn render_detail(
    post: Post,
    posts: &dyn PostRepository,
    comments: &dyn CommentRepository,
    comment_form: BoundForm<CommentForm>,
    new_comment: Option<Comment>,
) -> Result<HttpResponse, CustomError> {
    let active = comments.active_for_post(&post.id).await?;
    let tag_ids: Vec<ObjectId> = post.tags.iter().map(|tag| tag.id).collect();
    let candidates = posts.published_with_any_tag(&tag_ids, &post.id).await?;
    let similar = similar_posts(&post, candidates);

    Ok(render(
        "blog/post/detail.html",
        "Post fetched successfully",
        DetailContext {
            post: PostView::from(&post),
            comments: active.iter().map(CommentView::from).collect(),
            new_comment: new_comment.as_ref().map(CommentView::from),
            comment_form,
            similar_posts: similar.iter().map(PostView::from).collect(),
        },
    ))
}

/// GET /blog/{year}/{month}/{day}/{slug}/
pub async fn post_detail(
    posts: web::Data<dyn PostRepository>,
    comments: web::Data<dyn CommentRepository>,
    path: web::Path<(i32, u32, u32, String)>,
) -> Result<HttpResponse, CustomError> {
    let post = find_post_on(posts.get_ref(), path.into_inner()).await?;

    render_detail(
        post,
        posts.get_ref(),
        comments.get_ref(),
        BoundForm::new(CommentForm::default()),
        None,
    )
    .await
}

/// POST /blog/{year}/{month}/{day}/{slug}/
pub async fn post_comment(
    posts: web::Data<dyn PostRepository>,
    comments: web::Data<dyn CommentRepository>,
    path: web::Path<(i32, u32, u32, String)>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, CustomError> {
    let post = find_post_on(posts.get_ref(), path.into_inner()).await?;
    let form = form.into_inner();

    let (comment_form, new_comment) = match form.clean() {
        Ok(data) => {
            let saved = comments.add_comment(Comment::new(post.id, data)).await?;
            log::info!("comment added to post {}", post.id);
            (BoundForm::new(form), Some(saved))
        }
        Err(errors) => (BoundForm::with_errors(form, errors), None),
    };

    render_detail(
        post,
        posts.get_ref(),
        comments.get_ref(),
        comment_form,
        new_comment,
    )
    .await
}

async fn find_shared_post(posts: &dyn PostRepository, post_id: &str) -> Result<Post, CustomError> {
    let not_found = || CustomError::NotFoundError("Post not found".into());

    let id = ObjectId::parse_str(post_id).map_err(|_| not_found())?;
    posts.published_by_id(&id).await?.ok_or_else(|| {
        log::warn!("share requested for missing post {}", post_id);
        not_found()
    })
}

/// GET /blog/{post_id}/share/
pub async fn share_form(
    posts: web::Data<dyn PostRepository>,
    post_id: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let post = find_shared_post(posts.get_ref(), &post_id).await?;

    Ok(render(
        "blog/post/share.html",
        "Share form",
        ShareContext {
            post: PostView::from(&post),
            form: BoundForm::new(EmailPostForm::default()),
            sent: false,
        },
    ))
}

/// POST /blog/{post_id}/share/
pub async fn post_share(
    req: HttpRequest,
    posts: web::Data<dyn PostRepository>,
    mailer: web::Data<dyn Mailer>,
    post_id: web::Path<String>,
    form: web::Form<EmailPostForm>,
) -> Result<HttpResponse, CustomError> {
    let post = find_shared_post(posts.get_ref(), &post_id).await?;
    let form = form.into_inner();

    let (form, sent) = match form.clean() {
        Ok(cd) => {
            let post_url = {
                let info = req.connection_info();
                format!("{}://{}{}", info.scheme(), info.host(), post.absolute_url())
            };
            let subject = format!(
                "{} ({}) recommends you read \"{}\"",
                cd.name, cd.email, post.title
            );
            let message = format!(
                "Read \"{}\" at {}\n\n{}'s comments: {}",
                post.title, post_url, cd.name, cd.comments
            );
            mailer
                .send_mail(&subject, &message, &mailer.sender(), &[cd.to])
                .await?;
            (BoundForm::new(form), true)
        }
        Err(errors) => (BoundForm::with_errors(form, errors), false),
    };

    Ok(render(
        "blog/post/share.html",
        if sent { "Post shared successfully" } else { "Share form" },
        ShareContext {
            post: PostView::from(&post),
            form,
            sent,
        },
    ))
}

/// GET /blog/search/
pub async fn post_search(
    posts: web::Data<dyn PostRepository>,
    query: QueryPairs,
) -> Result<HttpResponse, CustomError> {
    let submitted = SearchForm {
        query: last_param(query, "query"),
    };

    let context = if submitted.query.is_none() {
        SearchContext {
            form: BoundForm::new(SearchForm::default()),
            query: None,
            results: Vec::new(),
        }
    } else {
        match submitted.clean() {
            Ok(query) => {
                let published = posts.published(None).await?;
                let results = search_titles(&query, &published);
                log::debug!("search {:?}: {} result(s)", query, results.len());
                SearchContext {
                    form: BoundForm::new(submitted),
                    query: Some(query),
                    results,
                }
            }
            Err(errors) => SearchContext {
                form: BoundForm::with_errors(submitted, errors),
                query: None,
                results: Vec::new(),
            },
        }
    };

    Ok(render("blog/post/search.html", "Search results", context))
}
