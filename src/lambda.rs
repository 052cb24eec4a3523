//! AWS Lambda entry point.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use lambda_runtime::{service_fn, LambdaEvent};
use thumbforge::store::{ObjectStore, S3Store};
use thumbforge::{config, HandlerResponse, ImageResizeHandler, NotificationBatch};

async fn function_handler(
    event: LambdaEvent<NotificationBatch>,
    handler: &ImageResizeHandler,
) -> Result<HandlerResponse, lambda_runtime::Error> {
    tracing::info!(
        "Invocation {}: {} record(s)",
        event.context.request_id,
        event.payload.len()
    );
    Ok(handler.handle(&event.payload).await?)
}

/// Serve invocations until the runtime shuts the process down.
pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let s3: Arc<dyn ObjectStore> = Arc::new(S3Store::from_env().await);
    let handler = ImageResizeHandler::from_config(&config.buckets, s3.clone(), s3);

    tracing::info!(
        "Starting Lambda runtime, writing to bucket '{}'",
        handler.destination_bucket()
    );

    lambda_runtime::run(service_fn(|event| function_handler(event, &handler)))
        .await
        .map_err(|e| anyhow::anyhow!("Lambda runtime error: {}", e))
}
