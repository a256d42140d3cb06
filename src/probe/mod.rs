pub mod probe;
pub mod request;
pub mod result;

pub use probe::{CONNECT_TIMEOUT, probe};
pub use request::ProbeRequest;
pub use result::ProbeResult;
