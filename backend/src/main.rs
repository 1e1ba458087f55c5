use anyhow::{Context, Result};
use sensor_hub::{
    api,
    auth::TokenIssuer,
    config::Config,
    db::Store,
    sweeper::{Sweeper, SWEEP_PERIOD},
};

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::info!("ENV on: {}", config.environment);

    let store = Store::connect(&config.database_url, config.pool_size).context("opening store")?;
    let tokens = TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl);

    let sweeper = Sweeper::spawn(store.clone(), SWEEP_PERIOD);

    log::info!("listening on {}:{}", config.host, config.port);
    let served = api::new_http_server(store, tokens, (config.host.clone(), config.port)).await;

    // the server returns once actix handled SIGINT/SIGTERM
    sweeper.shutdown().await;
    served.context("http server")
}
