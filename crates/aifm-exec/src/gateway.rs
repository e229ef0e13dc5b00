//! Client for the remote file gateway.
//!
//! One blocking request per operation, no retries and no request timeout.
//! Any non-2xx status is a failure; acknowledgement bodies are ignored.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;

use aifm_core::config::GatewayConfig;
use aifm_core::FileEntry;
use aifm_core::GatewayError;
use aifm_core::SpecialFolders;

use crate::contracts::DriveInfo;
use crate::contracts::ProcessRequest;
use crate::contracts::RenameRequest;
use crate::contracts::TransferRequest;

pub trait RemoteGateway {
    fn drives(&self) -> Result<Vec<DriveInfo>, GatewayError>;
    fn files(&self, path: &str) -> Result<Vec<FileEntry>, GatewayError>;
    /// Raw reply of `/process`; it is either an action or an applied listing.
    fn process(&self, prompt: &str, path: &str) -> Result<serde_json::Value, GatewayError>;
    fn rename(&self, path: &str, old_name: &str, new_name: &str) -> Result<(), GatewayError>;
    fn move_entry(&self, source: &str, destination: &str) -> Result<(), GatewayError>;
    fn copy_entry(&self, source: &str, destination: &str) -> Result<(), GatewayError>;
    fn special_folders(&self) -> Result<SpecialFolders, GatewayError>;
    fn recycle_bin(&self) -> Result<Vec<FileEntry>, GatewayError>;

    /// Listing for `path`: drives at the root, directory contents elsewhere.
    fn listing(&self, path: &str) -> Result<Vec<FileEntry>, GatewayError> {
        if path.is_empty() {
            return Ok(self
                .drives()?
                .into_iter()
                .map(DriveInfo::into_entry)
                .collect());
        }
        let mut entries = self.files(path)?;
        place_in_directory(&mut entries, path);
        Ok(entries)
    }
}

/// Entries the gateway returns without a parent path belong to `path`, the
/// directory they were listed from.
pub fn place_in_directory(entries: &mut [FileEntry], path: &str) {
    for entry in entries.iter_mut() {
        if entry.parent_path.is_empty() {
            entry.parent_path = path.to_string();
        }
    }
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| GatewayError::Request {
                operation: "client".to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        tracing::debug!(operation, endpoint, "gateway request");
        let response = self
            .client
            .get(self.url(endpoint))
            .query(query)
            .send()
            .map_err(|err| request_error(operation, &err))?;
        decode(operation, check_status(operation, response)?)
    }

    fn post<B: Serialize>(
        &self,
        operation: &str,
        endpoint: &str,
        body: &B,
    ) -> Result<Response, GatewayError> {
        tracing::debug!(operation, endpoint, "gateway request");
        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .map_err(|err| request_error(operation, &err))?;
        check_status(operation, response)
    }
}

impl RemoteGateway for HttpGateway {
    fn drives(&self) -> Result<Vec<DriveInfo>, GatewayError> {
        self.get_json("drives", "drives", &[])
    }

    fn files(&self, path: &str) -> Result<Vec<FileEntry>, GatewayError> {
        self.get_json("files", "files", &[("path", path)])
    }

    fn process(&self, prompt: &str, path: &str) -> Result<serde_json::Value, GatewayError> {
        let response = self.post("process", "process", &ProcessRequest { prompt, path })?;
        decode("process", response)
    }

    fn rename(&self, path: &str, old_name: &str, new_name: &str) -> Result<(), GatewayError> {
        self.post(
            "rename",
            "rename",
            &RenameRequest {
                path,
                old_name,
                new_name,
            },
        )
        .map(drop)
    }

    fn move_entry(&self, source: &str, destination: &str) -> Result<(), GatewayError> {
        self.post(
            "move",
            "move",
            &TransferRequest {
                source,
                destination,
            },
        )
        .map(drop)
    }

    fn copy_entry(&self, source: &str, destination: &str) -> Result<(), GatewayError> {
        self.post(
            "copy",
            "copy",
            &TransferRequest {
                source,
                destination,
            },
        )
        .map(drop)
    }

    fn special_folders(&self) -> Result<SpecialFolders, GatewayError> {
        self.get_json("specialFolders", "specialFolders", &[])
    }

    fn recycle_bin(&self) -> Result<Vec<FileEntry>, GatewayError> {
        self.get_json("recycleBin", "recycleBin", &[])
    }
}

fn request_error(operation: &str, err: &reqwest::Error) -> GatewayError {
    tracing::warn!(operation, error = %err, "gateway request failed");
    GatewayError::Request {
        operation: operation.to_string(),
        message: err.to_string(),
    }
}

fn check_status(operation: &str, response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    tracing::warn!(operation, status = status.as_u16(), "gateway rejected request");
    Err(GatewayError::Status {
        operation: operation.to_string(),
        status: status.as_u16(),
    })
}

fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T, GatewayError> {
    response.json::<T>().map_err(|err| GatewayError::Decode {
        operation: operation.to_string(),
        message: err.to_string(),
    })
}
