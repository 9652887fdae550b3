use anyhow::Result;
use blobgate_azure_blob::{BlobClient, Config};
use blobgate_core::{Context, Metadata, OsEnv, StorageService};
use blobgate_http_send_reqwest::ReqwestHttpSend;
use log::{debug, info};
use std::io::Read;

#[tokio::main]
async fn main() -> Result<()> {
    // Enable logging to see what happens on the wire
    env_logger::init();
    let _ = dotenv::dotenv();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    // AZURE_STORAGE_ACCOUNT_NAME, AZURE_STORAGE_CONTAINER, AZURE_TENANT_ID,
    // AZURE_CLIENT_ID and AZURE_CLIENT_SECRET must be set.
    let config = Config::default().from_env(&ctx);
    debug!("loaded config: {config:?}");

    let service = StorageService::new(BlobClient::from_config(ctx, &config)?);
    info!("using {}", service.backend().base_uri());

    let path = "blobgate-demo/hello.txt";

    let output = service.write(path, "Hello, World!").await?;
    println!("wrote {} bytes to {}", output.contents.len(), output.path);

    let mut output = service.read_stream(path).await?;
    let mut contents = String::new();
    output.stream.read_to_string(&mut contents)?;
    println!("read back: {contents}");

    let metadata = Metadata::from_iter([("author".to_string(), "John Doe".to_string())]);
    service.set_metadata(path, &metadata).await?;
    println!("tagged {path} with {metadata:?}");

    service.delete(path).await?;
    println!("deleted {path}");

    Ok(())
}
