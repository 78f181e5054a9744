pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::{AuthMiddleware, TokenKeys};

/// Mounts the `/auth` and `/tasks` scopes. Everything under `/tasks` sits behind
/// `AuthMiddleware`, which gets its own copy of the signing keys.
pub fn config(keys: TokenKeys) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware::new(keys))
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::toggle_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
    }
}
