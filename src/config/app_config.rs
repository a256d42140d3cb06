use std::env;

/// Default listening port when `PORT` is unset or unparseable.
const DEFAULT_LISTEN_PORT: u16 = 3000;

pub struct AppConfig {
    pub listen_port: u16,
}

/// Load the application configuration from environment variables.
/// `.env` files are honored (loaded by `main` before this runs); the only
/// tunable is `PORT`, the HTTP listening port, defaulting to 3000.
/// The probe deadline is a code constant and deliberately not configurable
/// per request.
pub fn load_config() -> AppConfig {
    let listen_port = parse_listen_port(env::var("PORT").ok());

    AppConfig { listen_port }
}

fn parse_listen_port(raw: Option<String>) -> u16 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_LISTEN_PORT)
}
