//! Image store implementations.

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

pub use local::LocalImageStore;
#[cfg(feature = "s3")]
pub use s3::S3ImageStore;

/// Join a public base URL and an object key.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
