use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::fmt;
use std::io::Cursor;

#[derive(Debug, Clone)]
pub enum Error {
    LoginError(String),
    ApiError(String),
    RateExceeded(String),
    /// PVOutput has no status recorded for the system yet.
    NoData(String),
    /// Response body and reason it could not be parsed.
    InvalidResponse(String, String),
    FormatError,
    InternalError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LoginError(s) => write!(f, "authentication failed: {}", s),
            Error::ApiError(s) => write!(f, "API error: {}", s),
            Error::RateExceeded(s) => write!(f, "request rate exceeded: {}", s),
            Error::NoData(s) => write!(f, "no data available: {}", s),
            Error::InvalidResponse(body, reason) => {
                write!(f, "invalid response ({}): {}", reason, body)
            }
            Error::FormatError => write!(f, "unable to format output"),
            Error::InternalError => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for Error {}

fn html(status: Status, error: String) -> response::Result<'static> {
    Response::build()
        .status(status)
        .sized_body(error.len(), Cursor::new(error))
        .header(ContentType::new("text", "html"))
        .ok()
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Error::RateExceeded(s) => html(
                Status::TooManyRequests,
                format!("<html><body><h3>429 Too Many Requests</h3>Downstream API response: <code>{}</code></body></html>", s),
            ),
            Error::LoginError(s) => html(
                Status::Forbidden,
                format!("<html><body><h3>403 Forbidden</h3>Error while authenticating to downstream API: <code>{}</code></body></html>", s),
            ),
            Error::NoData(s) => html(
                Status::ServiceUnavailable,
                format!("<html><body><h3>503 Service Unavailable</h3>Downstream API has no data: <code>{}</code></body></html>", s),
            ),
            _ => html(
                Status::InternalServerError,
                format!(
                    "<html><body><h3>Unknown exception</h3><code>{}</code></body></html>",
                    self
                ),
            ),
        }
    }
}
