//! A client for creating groups in the UW Groups Web Service (GWS). The service requires mutual TLS,
//! so every request is made with a client certificate and verified against a dedicated CA.

pub mod client;
pub mod config;
pub mod id;

pub use client::{Client, ClientError};
pub use config::DirectoryConfig;
pub use id::GroupId;

use serde::{Deserialize, Serialize};

/// The body of a group create-or-replace request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GroupRequest {
    pub data: GroupData,
}

impl GroupRequest {
    /// Builds the request for creating `group` with `admins` as its only administrator
    pub fn new(group: &GroupId, admins: &GroupId) -> Self {
        GroupRequest {
            data: GroupData {
                id: group.clone(),
                admins: vec![GroupAdmin {
                    kind: AdminKind::Group,
                    id: admins.clone(),
                }],
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GroupData {
    pub id: GroupId,
    pub admins: Vec<GroupAdmin>,
}

/// An entity granted administrative rights over a group
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GroupAdmin {
    #[serde(rename = "type")]
    pub kind: AdminKind,
    pub id: GroupId,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminKind {
    Group,
}

/// Creates (or replaces) `group` with `admins` as its administrator, using the given directory
/// configuration. Returns the raw status code from the service without interpreting it.
pub async fn create_or_update_group(
    config: &DirectoryConfig,
    group: &GroupId,
    admins: &GroupId,
) -> client::Result<reqwest::StatusCode> {
    let client = Client::from_config(config).await?;
    client.create_or_update_group(group, admins).await
}
