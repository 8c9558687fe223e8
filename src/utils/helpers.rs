use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::json;

/// Name reported in every response envelope.
pub fn service_name() -> String {
    std::env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string())
}

/// Wrap a view context in the standard success envelope.
pub fn render<T: Serialize>(view: &str, message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": message,
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": service_name(),
        "view": view,
        "data": data,
    }))
}
