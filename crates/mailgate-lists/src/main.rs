use lambda_http::{Error, Request, run, service_fn};
use mailgate_lists::{ListsContext, handler};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .json()
        .init();

    info!("Starting Mailgate lists Lambda function");

    // Configuration and the vendor client are built once per process
    let ctx = Arc::new(ListsContext::new()?);

    // Run the Lambda runtime with our handler
    run(service_fn(|event: Request| {
        let ctx = Arc::clone(&ctx);
        async move { handler(ctx, event).await }
    }))
    .await
}
