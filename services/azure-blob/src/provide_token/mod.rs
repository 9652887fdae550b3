mod client_secret;
pub use client_secret::ClientSecretTokenProvider;
