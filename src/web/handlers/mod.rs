// Route handlers, one module per endpoint group.

pub mod files;
pub mod progress;
pub mod similar;
pub mod unique;

use axum::http::StatusCode;
use axum::response::Response;

use crate::web::api_error;

/// Map a store failure to a response: missing files are 404, other I/O
/// failures 500, and bad names or unparseable files 400.
pub(crate) fn store_error(err: &anyhow::Error) -> Response {
    let io = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<std::io::Error>());
    let status = match io {
        Some(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
        None => StatusCode::BAD_REQUEST,
    };
    api_error(status, &format!("{err:#}"))
}
