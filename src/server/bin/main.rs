use std::net::SocketAddr;
use lambda_http::{run, Error};
use bookstore::core::domain::{Configuration, Runtime};
use bookstore::server::{build_router, build_state};
use bookstore::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::load()?;
    setup_tracing(&config);

    let state = build_state(&config).await;

    match config.runtime {
        Runtime::Local => {
            let addr: SocketAddr = format!("{}:{}", config.http_host, config.http_port).parse()?;
            tracing::info!(%addr, environment = config.environment.as_str(), "bookstore listening");
            let app = build_router::<axum::body::Body>(state);
            axum::Server::bind(&addr).serve(app.into_make_service()).await?;
            Ok(())
        }
        Runtime::Lambda => {
            tracing::info!(environment = config.environment.as_str(), "bookstore running on lambda");
            run(build_router::<lambda_http::Body>(state)).await
        }
    }
}
