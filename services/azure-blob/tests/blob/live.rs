use std::env;

use blobgate_azure_blob::{BlobClient, Config};
use blobgate_core::{Context, ErrorKind, Metadata, OsEnv, Storage};
use blobgate_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use log::warn;

fn init_client() -> Option<BlobClient> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("BLOBGATE_AZURE_BLOB_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);

    Some(BlobClient::from_config(ctx, &config).expect("AZURE_* env must be set"))
}

#[tokio::test]
async fn test_live_blob_lifecycle() -> anyhow::Result<()> {
    let Some(client) = init_client() else {
        warn!("BLOBGATE_AZURE_BLOB_TEST is not set, skipped");
        return Ok(());
    };

    let path = format!("blobgate-test/{}.txt", chrono::Utc::now().timestamp_millis());

    client.write(&path, Bytes::from("content")).await?;
    assert_eq!(client.read(&path).await?.contents, Bytes::from("content"));

    let metadata = Metadata::from_iter([("author".to_string(), "John Doe".to_string())]);
    assert!(client.set_metadata(&path, &metadata).await?);

    assert!(client.delete(&path).await?);
    let err = client.read(&path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Read);

    Ok(())
}
