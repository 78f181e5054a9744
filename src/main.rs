use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use todo_api::{
    auth::TokenKeys,
    config::Config,
    create_app,
    store::{MemoryStore, PgStore},
    AppState,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("refusing to start: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let keys = TokenKeys::from_secret(&config.jwt_secret);

    let state = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await.map_err(|e| {
                log::error!("failed to open database: {}", e);
                io::Error::new(io::ErrorKind::Other, e.to_string())
            })?;
            log::info!("using postgres store");
            AppState::new(Arc::new(store), keys, config.bcrypt_cost)
        }
        None => {
            log::warn!("DATABASE_URL not set; data is kept in memory and lost on exit");
            AppState::new(Arc::new(MemoryStore::new()), keys, config.bcrypt_cost)
        }
    };
    let state = web::Data::new(state);
    let cors_origin = config.cors_origin.clone();

    log::info!("Starting todo-api server at {}", config.server_url());
    HttpServer::new(move || create_app(state.clone(), &cors_origin))
        .bind((config.server_host.as_str(), config.server_port))?
        .run()
        .await
}
