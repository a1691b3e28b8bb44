// Response writing module
// Turns the pipeline's decision into the HTTP response sent to the client

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http;
use crate::logger;
use crate::static_resource::StaticResource;

/// Build the client response for a resolved static resource
///
/// Status and headers are copied in order. The file is read only when the
/// pipeline left content enabled. HEAD responses carry the `Content-Length`
/// the body would have had.
pub async fn build_response(resource: StaticResource, is_head: bool) -> Response<Full<Bytes>> {
    let StaticResource { filename, response } = resource;

    let body = if response.should_send_content() {
        match tokio::fs::read(&filename).await {
            Ok(data) => Bytes::from(data),
            Err(e) => {
                logger::log_error(&format!("Failed to read file '{}': {e}", filename.display()));
                return http::build_500_response();
            }
        }
    } else {
        Bytes::new()
    };

    let mut builder = Response::builder().status(response.status());
    for (name, value) in response.headers() {
        builder = builder.header(name, value);
    }

    if is_head && response.status() == 200 {
        let length = match response.content_length() {
            Some(length) => Some(length),
            None => tokio::fs::metadata(&filename).await.ok().map(|m| m.len()),
        };
        if let Some(length) = length {
            builder = builder.header("Content-Length", length);
        }
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        logger::log_error(&format!(
            "Failed to build response for '{}': {e}",
            filename.display()
        ));
        http::build_500_response()
    })
}
