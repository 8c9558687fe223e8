use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use serde_json::json;

mod comment;
mod config;
mod database;
mod middleware;
mod post;
mod router;
#[cfg(test)]
mod test_support;
mod utils;

use comment::repository::CommentRepository;
use comment::service::CommentService;
use config::AppConfig;
use middleware::error_handler::handle_error;
use middleware::not_found::not_found;
use post::post_repository::PostRepository;
use post::post_service::PostService;
use router::index::routes;
use utils::email::{EmailService, Mailer};
use utils::helpers::service_name;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the blog",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": service_name(),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let db = database::connect_to_mongo(&config)
        .await
        .map_err(std::io::Error::other)?;

    let post_service = PostService::new(&db);
    let comment_service = CommentService::new(&db);
    post_service
        .ensure_indexes()
        .await
        .map_err(std::io::Error::other)?;
    comment_service
        .ensure_indexes()
        .await
        .map_err(std::io::Error::other)?;

    let posts: Arc<dyn PostRepository> = Arc::new(post_service);
    let comments: Arc<dyn CommentRepository> = Arc::new(comment_service);
    let mailer: Arc<dyn Mailer> = Arc::new(
        EmailService::with_config(config.email.clone()).map_err(std::io::Error::other)?,
    );

    let posts = web::Data::from(posts);
    let comments = web::Data::from(comments);
    let mailer = web::Data::from(mailer);

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(posts.clone())
            .app_data(comments.clone())
            .app_data(mailer.clone())
            .configure(routes)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, not_found)
                    .default_handler(handle_error),
            )
            .service(default)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
