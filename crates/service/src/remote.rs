use std::sync::Arc;

use async_trait::async_trait;
use movie_tracker_client::{ClientError, SheetsClient};
use movie_tracker_core::{AppendRequest, RemoteMovie};

/// The spreadsheet-backed store of record, as seen from the client side.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read every movie row across all year tabs.
    async fn fetch_all(&self) -> Result<Vec<RemoteMovie>, ClientError>;

    /// Append one movie to its year tab.
    async fn append(&self, request: &AppendRequest) -> Result<(), ClientError>;
}

#[async_trait]
impl RemoteStore for SheetsClient {
    async fn fetch_all(&self) -> Result<Vec<RemoteMovie>, ClientError> {
        SheetsClient::fetch_all(self).await
    }

    async fn append(&self, request: &AppendRequest) -> Result<(), ClientError> {
        SheetsClient::append(self, request).await
    }
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    async fn fetch_all(&self) -> Result<Vec<RemoteMovie>, ClientError> {
        (**self).fetch_all().await
    }

    async fn append(&self, request: &AppendRequest) -> Result<(), ClientError> {
        (**self).append(request).await
    }
}
