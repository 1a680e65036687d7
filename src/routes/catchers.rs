use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

// Rocket-level failures (bad JSON, unknown route) use the same body as AppError.
// A body that fails to decode is a client error and always answers 400.
#[catch(default)]
pub fn default_catcher(status: Status, request: &Request<'_>) -> (Status, Json<Value>) {
    let status = match status.code {
        422 => Status::BadRequest,
        _ => status,
    };
    let message = match status.code {
        400 => "Malformed request body",
        404 => "Not found",
        415 => "Expected a JSON body",
        _ => "Something went wrong",
    };

    tracing::warn!(uri = %request.uri(), status = status.code, "{}", message);
    (status, Json(json!({ "message": message })))
}
