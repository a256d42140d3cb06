use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE, HeaderValue,
};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::time::sleep;

use crate::config::AppConfig;
use crate::probe::{ProbeRequest, probe};

/// Bind on all interfaces at the configured port and serve until the
/// process dies. Bind failures are startup errors and propagate to `main`.
pub async fn serve(config: &AppConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = TcpListener::bind(addr).await?;
    log::info!("ping service listening on {addr}");

    run(listener).await
}

/// Accept loop: one spawned task per connection, so a slow probe never
/// blocks other callers. Accept errors (typically transient descriptor
/// pressure) are logged and the loop keeps going.
pub async fn run(listener: TcpListener) -> std::io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let io = TokioIo::new(stream);
                tokio::spawn(async move {
                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service_fn(handle))
                        .await
                    {
                        // callers hanging up mid-probe is normal
                        log::debug!("connection from {peer} ended: {err}");
                    }
                });
            }
            Err(err) => {
                log::warn!("accept failed: {err}");
                sleep(Duration::from_millis(100)).await;
            }
        }
    }
}

async fn handle(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(route(req.method(), req.uri()).await)
}

/// Route table. Every probe outcome travels back as HTTP 200; the verdict
/// lives in the JSON payload, never in the status code.
async fn route(method: &Method, uri: &Uri) -> Response<Full<Bytes>> {
    match (method, uri.path()) {
        (&Method::GET, "/health") => text_response(StatusCode::OK, "pong"),
        (&Method::GET, "/ping") => {
            let request = ProbeRequest::from_query(uri.query().unwrap_or(""));
            let result = probe(&request).await;
            json_response(serde_json::to_vec(&result).expect("probe result is serializable"))
        }
        (&Method::OPTIONS, _) => preflight_response(),
        _ => text_response(StatusCode::NOT_FOUND, "not found"),
    }
}

fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    with_cors(response)
}

fn json_response(body: Vec<u8>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    with_cors(response)
}

fn preflight_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NO_CONTENT;
    response.headers_mut().insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,HEAD,OPTIONS"),
    );
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    with_cors(response)
}

// The frontend widget is served from another origin; every response,
// including 404s, carries the permissive CORS grant.
fn with_cors(mut response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}
