#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Domain models, bearer-token authentication, the storage seam, routing and"]
#![doc = "error handling for the to-do list service. The binary (`main.rs`) only reads"]
#![doc = "configuration, picks a store and runs `create_app` inside an `HttpServer`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::{header, Method},
    middleware::{Logger, NormalizePath},
    web, App,
};

pub use error::AppError;
pub use state::AppState;

/// Builds the complete application: CORS, request logging, trailing-slash
/// normalization (so `/api/tasks/` and `/api/tasks` are the same route), JSON
/// error shaping, `/health` and the `/api` routes.
pub fn create_app(
    state: web::Data<AppState>,
    cors_origin: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let keys = state.keys.clone();

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .wrap(NormalizePath::trim())
        .wrap(
            Cors::default()
                .allowed_origin(cors_origin)
                .allowed_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                .max_age(3600),
        )
        .wrap(Logger::default())
        .service(routes::health::health)
        .service(web::scope("/api").configure(routes::config(keys)))
}
