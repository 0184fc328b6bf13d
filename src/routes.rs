use crate::{
    api::{attendance, report, session},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

// Per-peer-IP limiter allowing `requests_per_min` with an equal burst
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("non-zero period and burst");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let submit_limiter = Arc::new(build_limiter(config.rate_submit_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(login_limiter)
                .route(web::post().to(handlers::login)),
        ),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            // /attendance, open to students
            .service(
                web::resource("/attendance")
                    .wrap(submit_limiter)
                    .route(web::post().to(attendance::submit_attendance)),
            )
            // /sessions, faculty or admin
            .service(
                web::scope("/sessions")
                    .wrap(from_fn(auth_middleware))
                    .wrap(protected_limiter.clone())
                    .service(web::resource("").route(web::post().to(session::start_session)))
                    .service(
                        web::resource("/{code}/display")
                            .route(web::get().to(session::session_display)),
                    ),
            )
            // /reports, admin
            .service(
                web::scope("/reports")
                    .wrap(from_fn(auth_middleware))
                    .wrap(protected_limiter)
                    .service(
                        web::resource("/attendance").route(web::get().to(report::list_attendance)),
                    )
                    .service(
                        web::resource("/attendance/export")
                            .route(web::get().to(report::export_attendance)),
                    ),
            ),
    );
}
