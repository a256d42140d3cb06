pub mod config;
pub mod probe;
pub mod server;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let app_config = config::load_config();

    if let Err(err) = server::serve(&app_config).await {
        log::error!("failed to start ping service: {err}");
        std::process::exit(1);
    }
}
