//! TraceLayer span maker that keeps credentials out of request logs

use axum::http::{Request, Uri};
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameters whose values are replaced before logging.
const REDACTED_PARAMS: &[&str] = &["token", "access_token", "authorization", "phone"];

#[derive(Clone, Debug, Default)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %redact_query(request.uri()),
            version = ?request.version(),
        )
    }
}

/// `/v1/x?token=abc&page=2` becomes `/v1/x?token=[REDACTED]&page=2`.
fn redact_query(uri: &Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _))
                if REDACTED_PARAMS
                    .iter()
                    .any(|p| key.eq_ignore_ascii_case(p)) =>
            {
                format!("{key}=[REDACTED]")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", uri.path(), pairs.join("&"))
}
