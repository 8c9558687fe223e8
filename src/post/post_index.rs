use super::post_controller::{
    post_comment, post_detail, post_list, post_list_by_tag, post_search, post_share, share_form,
};
use actix_web::web;

/// Largest accepted form body, matching the usual 2.5 MB upload ceiling.
pub const FORM_LIMIT: usize = 2_621_440;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .app_data(web::FormConfig::default().limit(FORM_LIMIT))
            .route("/", web::get().to(post_list))
            .route("/tag/{tag_slug}/", web::get().to(post_list_by_tag))
            .route("/search/", web::get().to(post_search))
            .route("/{post_id}/share/", web::get().to(share_form))
            .route("/{post_id}/share/", web::post().to(post_share))
            .route("/{year}/{month}/{day}/{slug}/", web::get().to(post_detail))
            .route("/{year}/{month}/{day}/{slug}/", web::post().to(post_comment)),
    );
}
