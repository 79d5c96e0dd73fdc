use crate::{error, log, rest, rpc, Result};
use actix_web::{
    middleware::{from_fn, Compress, ErrorHandlers, NormalizePath},
    web::{scope, Data, QueryConfig},
    App, HttpServer,
};
use deadpool_sqlite::Pool;
use std::env;
use tracing::info;

pub async fn run(pool: Pool) -> Result<()> {
    let addr = env::var("FIELDOPS_ADDR").unwrap_or("127.0.0.1:8000".into());
    info!(addr, "Starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(log::middleware::handle_request))
            .wrap(NormalizePath::trim())
            .wrap(Compress::default())
            .app_data(Data::new(pool.clone()))
            .app_data(QueryConfig::default().error_handler(error::query_error_handler))
            .service(
                scope("rpc")
                    .wrap(ErrorHandlers::new().default_handler(rpc::handler::handle_rpc_error))
                    .service(rpc::handler::handle),
            )
            .service(
                scope("v1")
                    .service(
                        scope("buildings")
                            .service(rest::v1::buildings::get)
                            .service(rest::v1::buildings::get_by_id),
                    )
                    .service(
                        scope("workers")
                            .service(rest::v1::workers::get)
                            .service(rest::v1::workers::get_by_id),
                    )
                    .service(
                        scope("tasks")
                            .service(rest::v1::tasks::get)
                            .service(rest::v1::tasks::get_by_id),
                    )
                    .service(
                        scope("reports")
                            .service(rest::v1::reports::get)
                            .service(rest::v1::reports::get_by_id),
                    )
                    .service(scope("weather").service(rest::v1::weather::get)),
            )
    })
    .bind(addr)?
    .run()
    .await?;
    Ok(())
}
