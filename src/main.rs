#[macro_use]
extern crate diesel;

mod admin;
mod booking;
mod config;
mod database;
mod models;
mod notify;
mod protocol;
mod scheduling;
mod schema;
mod utils;

use actix_web::{middleware, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, MysqlConnection};

use crate::{
    config::{AdminConfig, BusinessHours, SalonInfo},
    notify::Mailer,
};

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

/// Shared per-worker state: the connection pool plus everything that
/// used to live as hidden constants (business hours, salon identity,
/// admin capability, mail transport).
#[derive(Clone)]
pub struct AppContext {
    pub pool: DbPool,
    pub hours: BusinessHours,
    pub admin: AdminConfig,
    pub mailer: Mailer,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let conn_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not found");
    let manager = ConnectionManager::<MysqlConnection>::new(conn_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    let ctx = AppContext {
        pool,
        hours: BusinessHours::from_env(),
        admin: AdminConfig::from_env(),
        mailer: Mailer::from_env(SalonInfo::from_env()),
    };

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .data(ctx.clone())
            .wrap(middleware::Logger::default())
            // public booking surface
            .service(web::scope("/booking").configure(booking::config))
            // authorized management surface
            .service(web::scope("/admin").configure(admin::config))
    })
    .bind(bind)?
    .run()
    .await
}
