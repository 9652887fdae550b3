use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Headers used by the blob service.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_BLOB_TYPE: &str = "x-ms-blob-type";
pub const X_MS_META_PREFIX: &str = "x-ms-meta-";

pub const AZURE_VERSION: &str = "2020-10-02";
pub const BLOCK_BLOB: &str = "BlockBlob";

// OAuth 2.0 client-credentials grant.
pub const AZURE_PUBLIC_CLOUD: &str = "https://login.microsoftonline.com";
pub const STORAGE_SCOPE: &str = "https://storage.azure.com/.default";

// Env values used to load config.
pub const AZURE_STORAGE_ACCOUNT_NAME: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const AZURE_STORAGE_CONTAINER: &str = "AZURE_STORAGE_CONTAINER";
pub const AZURE_STORAGE_ENDPOINT: &str = "AZURE_STORAGE_ENDPOINT";
pub const AZURE_STORAGE_CACHE_TOKEN: &str = "AZURE_STORAGE_CACHE_TOKEN";
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";

/// AsciiSet for blob paths.
///
/// Unreserved characters and `/` are kept, so `dir/test.txt` is sent as-is.
pub static AZURE_PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
