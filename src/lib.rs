#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod swagger;
pub mod utils;

use std::sync::Arc;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::make_swagger_ui;

use crate::services::booking_service::BookingService;
use crate::services::movie_service::MovieService;
use crate::store::MovieStore;
use crate::swagger::swagger_ui;

/// Assemble the HTTP service around an already connected store.
pub fn build_rocket(store: Arc<dyn MovieStore>) -> Rocket<Build> {
    let movie_service = MovieService::new(store.clone());
    let booking_service = BookingService::new(store.clone());

    rocket::build()
        .manage(movie_service)
        .manage(booking_service)
        .mount(
            "/movie",
            openapi_get_routes![
                routes::movie_route::get_movies,
                routes::movie_route::get_movie,
                routes::movie_route::add_movie,
                routes::booking_route::book_movie,
            ],
        )
        .mount("/movie", routes![routes::booking_route::book_movie_without_json])
        .mount(
            "/swagger",
            make_swagger_ui(&swagger_ui()),
        )
        .register("/", catchers![routes::catchers::default_catcher])
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
        .attach(AdHoc::on_shutdown("Close movie store", move |_| {
            Box::pin(async move {
                store.close().await;
                tracing::info!("movie store closed");
            })
        }))
}
