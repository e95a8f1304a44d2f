//! Client implementation for the Groups Web Service (GWS) v3 API. Only group creation is supported:
//! a single `PUT` that creates the group or replaces its administrators.

mod error;
pub mod load;

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client as HttpClient;
use reqwest::{Certificate, StatusCode};
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::DirectoryConfig;
use crate::{GroupId, GroupRequest};

pub use error::ClientError;

/// A shorthand `Result` type that always uses `ClientError` as its error variant
pub type Result<T> = std::result::Result<T, ClientError>;

pub const GROUP_ENDPOINT: &str = "group";
const JSON_MIME_TYPE: &str = "application/json";

/// A client type for interacting with the Groups Web Service
#[derive(Clone)]
pub struct Client {
    client: HttpClient,
    base_url: Url,
}

/// A builder for for setting up a `Client`. Created using `Client::builder`
#[derive(Default)]
pub struct ClientBuilder {
    ca_certs: Vec<Certificate>,
    identity_pem: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Adds a CA certificate the server's certificate may chain to. Once any CA is added, the TLS
    /// backend's built in roots are no longer trusted
    pub fn ca_cert(mut self, cert: Certificate) -> Self {
        self.ca_certs.push(cert);
        self
    }

    /// Sets the client certificate and private key (as a single PEM bundle) presented to the
    /// server during the TLS handshake
    pub fn identity_pem(mut self, pem: Vec<u8>) -> Self {
        self.identity_pem = Some(pem);
        self
    }

    /// Sets a timeout for the entire request, from connecting until the response status is
    /// received
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns a new Client with the given URL, configured using the set options.
    ///
    /// This URL should be the service root including the API version, so it would look something
    /// like `https://groups.uw.edu/group_sws/v3`. Will return an error if the URL is not valid
    pub fn build(self, base_url: &str) -> Result<Client> {
        let (base_parsed, headers) = base_url_and_headers(base_url)?;

        let identity = self
            .identity_pem
            .as_deref()
            .map(load::identity)
            .transpose()?;

        let mut builder = HttpClient::builder()
            .tls_built_in_root_certs(self.trusts_built_in_roots())
            .default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        for cert in self.ca_certs {
            builder = builder.add_root_certificate(cert);
        }
        if let Some(identity) = identity {
            builder = builder.identity(identity);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;
        Ok(Client {
            client,
            base_url: base_parsed,
        })
    }

    fn trusts_built_in_roots(&self) -> bool {
        self.ca_certs.is_empty()
    }
}

fn base_url_and_headers(base_url: &str) -> Result<(Url, HeaderMap)> {
    // Note that the trailing slash is important, otherwise the URL parser will treat the last
    // segment as a "file" component of the URL and replace it when joining
    let mut base = base_url.to_owned();
    if !base.ends_with('/') {
        info!("Provided base URL missing trailing slash, adding...");
        base.push('/');
    }
    let base_parsed = Url::parse(&base)?;
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(JSON_MIME_TYPE));
    Ok((base_parsed, headers))
}

impl Client {
    /// Returns a new Client with the given URL, configured using the default options. This trusts
    /// the system roots and presents no client certificate, so it is of little use against the real
    /// service; see [`Client::from_config`]
    pub fn new(base_url: &str) -> Result<Self> {
        ClientBuilder::default().build(base_url)
    }

    /// Returns a [`ClientBuilder`](ClientBuilder) configured with defaults
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Builds a mutual TLS client from the given configuration, reading the CA certificate and the
    /// client certificate and key from disk
    #[instrument(level = "trace", skip(config), fields(base_url = %config.base_url))]
    pub async fn from_config(config: &DirectoryConfig) -> Result<Self> {
        let ca = load::ca_cert(&config.ca_cert).await?;
        let identity = load::identity_pem(&config.client_cert, &config.client_key).await?;
        let mut builder = Client::builder().ca_cert(ca).identity_pem(identity);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build(&config.base_url)
    }

    /// Returns the URL of the given group's resource
    pub fn group_url(&self, group: &GroupId) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("{}/{}", GROUP_ENDPOINT, group))?)
    }

    //////////////// Create Group ////////////////

    /// Creates `group`, or replaces it if it already exists, with `admins` as its administrator.
    ///
    /// The status code from the service is returned as is. A rejection from the service (such as
    /// a 401 or a 409) is not an error here; only a failure to complete the exchange is
    #[instrument(level = "trace", skip(self, group, admins), fields(group = %group, admins = %admins))]
    pub async fn create_or_update_group(
        &self,
        group: &GroupId,
        admins: &GroupId,
    ) -> Result<StatusCode> {
        let url = self.group_url(group)?;
        let body = serde_json::to_vec(&GroupRequest::new(group, admins))?;
        debug!(%url, "Sending group request");
        let resp = self
            .client
            .put(url)
            .header(header::CONTENT_TYPE, JSON_MIME_TYPE)
            .body(body)
            .send()
            .await?;
        let status = resp.status();
        info!(%status, "Groups Web Service responded");
        Ok(status)
    }
}
