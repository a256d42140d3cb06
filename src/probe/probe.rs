use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use super::request::ProbeRequest;
use super::result::ProbeResult;

/// Hard per-attempt deadline. Not exposed to callers.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Attempt one TCP handshake against the target and report which of the
/// three outcomes settled first: connect, deadline, or error.
///
/// The attempt is a single future, so the connect/timeout/error race
/// resolves exactly once and the socket is closed on every path,
/// including cancellation of the enclosing task. This function never
/// returns an error; refusals, unreachable hosts and DNS failures are
/// all reported inside the [`ProbeResult`].
pub async fn probe(request: &ProbeRequest) -> ProbeResult {
    let addr = format!("{}:{}", request.host, request.port);

    match timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr)).await {
        Ok(Ok(stream)) => {
            // Handshake success alone is the signal; no data is exchanged.
            drop(stream);
            ProbeResult::connected()
        }
        Ok(Err(err)) => ProbeResult::failed(&err),
        Err(_) => ProbeResult::timed_out(CONNECT_TIMEOUT),
    }
}
