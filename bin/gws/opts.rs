use std::path::PathBuf;

use clap::Parser;

use gws::config::Config;
use gws::GroupId;

const DESCRIPTION: &str = r#"
Create a UW Group

Creates (or replaces) a group in the UW Groups Web Service and makes another
group its administrator. The service is reached over mutual TLS, so a CA
certificate, client certificate and client key must be configured either on
the command line, in the environment or in the config file.
"#;

#[derive(Parser)]
#[clap(name = "gws-create-group", version = clap::crate_version!(), about = DESCRIPTION)]
pub struct Opts {
    #[clap(index = 1, value_name = "UW_GROUP", help = "UW Group Id")]
    pub uw_group: GroupId,

    #[clap(
        index = 2,
        value_name = "UW_GROUP_ADMINS",
        help = "UW Group to administer the group"
    )]
    pub uw_group_admins: GroupId,

    #[clap(
        long = "config-path",
        env = "GWS_CONFIG",
        help = "The path to a configuration file [default: $XDG_CONFIG_HOME/gws/config.toml]"
    )]
    pub config_file: Option<PathBuf>,

    #[clap(
        short = 'u',
        long = "base-url",
        env = "GWS_BASE_URL",
        help = "The Groups Web Service root, including the API version (e.g. https://groups.uw.edu/group_sws/v3)"
    )]
    pub base_url: Option<String>,

    #[clap(
        long = "ca-cert",
        env = "GWS_CA_CERT",
        help = "The CA certificate used to verify the Groups Web Service"
    )]
    pub ca_cert: Option<PathBuf>,

    #[clap(
        short = 'c',
        long = "client-cert",
        env = "GWS_CLIENT_CERT",
        help = "The client certificate presented to the Groups Web Service"
    )]
    pub client_cert: Option<PathBuf>,

    #[clap(
        short = 'k',
        long = "client-key",
        env = "GWS_CLIENT_KEY",
        help = "The PEM private key for the client certificate. PKCS#8 is always accepted; RSA and EC keys only with the default rustls backend"
    )]
    pub client_key: Option<PathBuf>,

    #[clap(
        long = "timeout",
        env = "GWS_TIMEOUT",
        value_name = "SECONDS",
        help = "Give up on the request after this many seconds"
    )]
    pub timeout: Option<u64>,
}

impl Opts {
    /// The configuration values given on the command line or in the environment
    pub fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            ca_cert: self.ca_cert.clone(),
            client_cert: self.client_cert.clone(),
            client_key: self.client_key.clone(),
            timeout_secs: self.timeout,
        }
    }
}
