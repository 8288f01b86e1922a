//! Request-level logging, request IDs, and parent trace extraction.

mod propagation;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use self::{
    request_ids::{REQUEST_ID_HEADER, RequestId},
    spans::RouteName,
};
use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";
const UNTRACKED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// Wrap each request in an `http.request` span, tag it with a request id and
/// record its outcome in logs and metrics.
#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACKED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let started = Instant::now();

    let request_id = RequestId::from_header(req.header::<String>(REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.as_str().to_owned());

    request_id.write_header(res);

    let method = req.method().to_string();
    let names = RouteName::new(&method, req.uri().path());
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.span_name,
        otel.kind = "server",
        request_id = %request_id.as_str(),
        method = %method,
        route = %names.route,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::current().propagate_parent
        && let Some(parent) = propagation::remote_parent(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = request_ids::final_status(res);

    metrics::observe_request(
        &method,
        &names.route,
        status.as_u16(),
        duration.as_secs_f64(),
    );

    record_completion(&span, status, duration);
}

fn record_completion(span: &Span, status: StatusCode, duration: Duration) {
    let duration_ms = duration.as_millis();
    let threshold_ms = settings::current().slow_request_threshold.as_millis();

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = status.as_u16(), "server error response");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), "client error response");
        }

        if duration_ms > threshold_ms {
            warn!(duration_ms, threshold_ms, "slow request detected");
        }
    });
}
