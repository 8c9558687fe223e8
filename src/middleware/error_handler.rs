use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse};
use serde_json::json;

use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;

/// Fallback for framework errors (bad extractors, unsupported methods).
/// Responses built from `CustomError` already carry the envelope.
pub fn handle_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let already_enveloped = res
        .response()
        .error()
        .is_some_and(|e| e.as_error::<CustomError>().is_some());
    let status_code = res.status();
    if already_enveloped || !(status_code.is_client_error() || status_code.is_server_error()) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let error_message = res
        .response()
        .error()
        .map(|e| e.to_string())
        .unwrap_or_else(|| status_code.canonical_reason().unwrap_or("Unknown error").to_string());
    if status_code.is_server_error() {
        log::error!("{} {}: {}", res.request().method(), res.request().path(), error_message);
    }

    let new_response = HttpResponse::build(status_code).json(json!({
        "success": false,
        "message": error_message,
        "httpStatusCode": status_code.as_u16(),
        "error": status_code.canonical_reason().unwrap_or("Unknown"),
        "service": service_name(),
    }));

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}
