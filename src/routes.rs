/// Route table for the blog service.
///
/// Authentication layout:
/// - `/posts` and `/groups` reads are public; writes authenticate through
///   the `UserId` extractor.
/// - `/posts/{post_id}/comments` and `/follow` require authentication for
///   every operation, enforced by `JwtAuthMiddleware` on the scope.
use actix_web::web;

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/health/ready", web::get().to(handlers::readiness))
        .service(
            web::scope("/api/v1")
                .route("/users", web::post().to(handlers::register))
                .route("/token", web::post().to(handlers::login))
                .route("/token/refresh", web::post().to(handlers::refresh_token))
                .service(
                    web::scope("/posts")
                        .service(
                            web::scope("/{post_id}/comments")
                                .wrap(JwtAuthMiddleware)
                                .route("", web::get().to(handlers::list_comments))
                                .route("", web::post().to(handlers::create_comment))
                                .route("/{id}", web::get().to(handlers::get_comment))
                                .route("/{id}", web::put().to(handlers::update_comment))
                                .route("/{id}", web::patch().to(handlers::update_comment))
                                .route("/{id}", web::delete().to(handlers::delete_comment)),
                        )
                        .route("", web::get().to(handlers::list_posts))
                        .route("", web::post().to(handlers::create_post))
                        .route("/{id}", web::get().to(handlers::get_post))
                        .route("/{id}", web::put().to(handlers::update_post))
                        .route("/{id}", web::patch().to(handlers::update_post))
                        .route("/{id}", web::delete().to(handlers::delete_post)),
                )
                .service(
                    web::scope("/groups")
                        .route("", web::get().to(handlers::list_groups))
                        .route("", web::post().to(handlers::create_group)),
                )
                .service(
                    web::scope("/follow")
                        .wrap(JwtAuthMiddleware)
                        .route("", web::get().to(handlers::list_follows))
                        .route("", web::post().to(handlers::create_follow)),
                ),
        );
}
