//! Store interface between the list editor and its backing store.
//!
//! The editor never talks to a store directly. It hands back
//! [`StoreRequest`]s, the host executes them against a [`SettingStore`]
//! and feeds the resulting [`StoreResponse`]s back in.

use cfg_editor_config::{CopyKind, IdentifierError, SettingKey};
use std::future::Future;
use thiserror::Error;

/// Failures reported by a setting store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("setting {0} is not known to the store")]
    UnknownSetting(SettingKey),
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error("store I/O failed: {0}")]
    Io(String),
    #[error("store rejected the request: {0}")]
    Rejected(String),
}

/// Server-side copy of a profile or domain identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    /// List setting holding the identifiers
    pub setting: SettingKey,
    /// Identifier to copy from
    pub source_id: String,
    /// New identifier
    pub destination_id: String,
    pub kind: CopyKind,
}

/// A store call the editor wants executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    Read(SettingKey),
    Write {
        key: SettingKey,
        values: Vec<String>,
    },
    Copy(CopyRequest),
}

impl StoreRequest {
    /// Setting the request belongs to
    pub fn key(&self) -> &SettingKey {
        match self {
            StoreRequest::Read(key) => key,
            StoreRequest::Write { key, .. } => key,
            StoreRequest::Copy(request) => &request.setting,
        }
    }

    /// Completion reporting `error` without the request having run
    pub fn into_failure(self, error: StoreError) -> StoreResponse {
        match self {
            StoreRequest::Read(key) => StoreResponse::Read {
                key,
                result: Err(error),
            },
            StoreRequest::Write { key, .. } => StoreResponse::Write {
                key,
                result: Err(error),
            },
            StoreRequest::Copy(request) => StoreResponse::Copy {
                key: request.setting,
                result: Err(error),
            },
        }
    }
}

/// Completion of a [`StoreRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreResponse {
    Read {
        key: SettingKey,
        result: Result<Vec<String>, StoreError>,
    },
    Write {
        key: SettingKey,
        result: Result<(), StoreError>,
    },
    Copy {
        key: SettingKey,
        result: Result<(), StoreError>,
    },
}

impl StoreResponse {
    pub fn key(&self) -> &SettingKey {
        match self {
            StoreResponse::Read { key, .. }
            | StoreResponse::Write { key, .. }
            | StoreResponse::Copy { key, .. } => key,
        }
    }
}

/// Asynchronous key/value access to stored settings.
///
/// Implemented by the host (file store) and by [`crate::MemoryStore`].
pub trait SettingStore: Send + Sync {
    /// Fetch the current value of a setting
    fn read_setting(
        &self,
        key: &SettingKey,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Persist the full value of a setting
    fn write_setting(
        &self,
        key: &SettingKey,
        values: Vec<String>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Create a new profile/domain derived from an existing one
    fn copy_identifier(
        &self,
        request: &CopyRequest,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Execute a request and package its completion
    fn execute(&self, request: StoreRequest) -> impl Future<Output = StoreResponse> + Send {
        async move {
            match request {
                StoreRequest::Read(key) => {
                    let result = self.read_setting(&key).await;
                    StoreResponse::Read { key, result }
                }
                StoreRequest::Write { key, values } => {
                    let result = self.write_setting(&key, values).await;
                    StoreResponse::Write { key, result }
                }
                StoreRequest::Copy(request) => {
                    let result = self.copy_identifier(&request).await;
                    StoreResponse::Copy {
                        key: request.setting,
                        result,
                    }
                }
            }
        }
    }
}
