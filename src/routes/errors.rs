use quire_models::Error;
use rocket::{
    http::Status,
    response::{self, Responder},
    Request,
};
use rocket_contrib::json::Json;
use serde_json::Value;
use tracing::{error, warn};

/// A failed request, answered with the status matching the underlying error.
/// The body is then produced by the catcher of that status.
#[derive(Debug)]
pub struct ErrorPage(pub Error);

impl From<Error> for ErrorPage {
    fn from(err: Error) -> ErrorPage {
        ErrorPage(err)
    }
}

impl From<std::io::Error> for ErrorPage {
    fn from(err: std::io::Error) -> ErrorPage {
        ErrorPage(Error::from(err))
    }
}

impl<'r> Responder<'r> for ErrorPage {
    fn respond_to(self, req: &Request<'_>) -> response::Result<'r> {
        match self.0 {
            Error::NotFound => Err(Status::NotFound),
            Error::Unauthorized => Err(Status::Unauthorized),
            err => {
                error!("{} {}: {}", req.method(), req.uri(), err);
                Err(Status::InternalServerError)
            }
        }
    }
}

#[catch(401)]
pub fn unauthorized(req: &Request<'_>) -> Json<Value> {
    warn!("Unauthorized request to {}", req.uri());
    Json(json!({ "error": "You need to be logged in to do this" }))
}

#[catch(404)]
pub fn not_found(req: &Request<'_>) -> Json<Value> {
    Json(json!({ "error": format!("Nothing found at {}", req.uri()) }))
}

#[catch(500)]
pub fn server_error(_req: &Request<'_>) -> Json<Value> {
    Json(json!({ "error": "Something broke on our side" }))
}
