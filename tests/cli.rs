
use std::process::Output;

use test_util::*;

const ENV_BASE_URL: &str = "GWS_BASE_URL";
const ENV_CA_CERT: &str = "GWS_CA_CERT";
const ENV_CLIENT_CERT: &str = "GWS_CLIENT_CERT";
const ENV_CLIENT_KEY: &str = "GWS_CLIENT_KEY";

/// Builds a command for the binary that can't pick up configuration from the machine running the
/// tests
fn command(config_home: &std::path::Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(BINARY_PATH);
    cmd.env_remove(ENV_BASE_URL)
        .env_remove(ENV_CA_CERT)
        .env_remove(ENV_CLIENT_CERT)
        .env_remove(ENV_CLIENT_KEY)
        .env_remove("GWS_CONFIG")
        .env_remove("GWS_TIMEOUT")
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

fn tls_env(cmd: &mut tokio::process::Command, tls: &TlsFixtures, base_url: &str) {
    cmd.env(ENV_BASE_URL, base_url)
        .env(ENV_CA_CERT, &tls.ca_cert)
        .env(ENV_CLIENT_CERT, &tls.client_cert)
        .env(ENV_CLIENT_KEY, &tls.client_key);
}

#[tokio::test]
async fn test_create_group_prints_status() {
    let tls = TlsFixtures::generate();
    let directory = TestDirectory::new_mtls(201, &tls).await;
    let home = tempfile::tempdir().expect("unable to create tempdir");

    let mut cmd = command(home.path());
    tls_env(&mut cmd, &tls, &directory.base_url);
    let output = cmd
        .args(["uw_testgroup", "uw_admins"])
        .output()
        .await
        .expect("Should be able to run command");

    assert_status(&output, "Should be able to create a group");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "STATUS: 201");

    let requests = directory.requests();
    assert_eq!(requests.len(), 1, "Exactly one request should be sent");
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/group_sws/v3/group/uw_testgroup");
    assert_eq!(
        requests[0].json(),
        serde_json::json!({
            "data": {"id": "uw_testgroup", "admins": [{"type": "group", "id": "uw_admins"}]}
        })
    );
}

#[tokio::test]
async fn test_rejection_still_exits_zero() {
    let tls = TlsFixtures::generate();
    let directory = TestDirectory::new_mtls(409, &tls).await;
    let home = tempfile::tempdir().expect("unable to create tempdir");

    let mut cmd = command(home.path());
    tls_env(&mut cmd, &tls, &directory.base_url);
    let output = cmd
        .args(["uw_testgroup", "uw_admins"])
        .output()
        .await
        .expect("Should be able to run command");

    assert_status(&output, "A rejected request should still exit 0");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "STATUS: 409");
}

#[tokio::test]
async fn test_unreachable_service_is_fatal() {
    let tls = TlsFixtures::generate();
    let home = tempfile::tempdir().expect("unable to create tempdir");

    let mut cmd = command(home.path());
    tls_env(&mut cmd, &tls, &unreachable_base_url("https"));
    let output = cmd
        .args(["uw_testgroup", "uw_admins"])
        .output()
        .await
        .expect("Should be able to run command");

    assert!(!output.status.success(), "Unreachable service should fail");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "No status should be printed");
    assert!(String::from_utf8_lossy(&output.stderr).contains("FATAL: error creating group"));
}

#[tokio::test]
async fn test_invalid_group_never_reaches_service() {
    let tls = TlsFixtures::generate();
    let directory = TestDirectory::new_mtls(201, &tls).await;
    let home = tempfile::tempdir().expect("unable to create tempdir");

    for args in [["Invalid_Group", "uw_admins"], ["uw_testgroup", "Invalid_Group"]] {
        let mut cmd = command(home.path());
        tls_env(&mut cmd, &tls, &directory.base_url);
        let output = cmd
            .args(args)
            .output()
            .await
            .expect("Should be able to run command");

        assert!(!output.status.success(), "Invalid group ID should fail");
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid_Group"));
    }
    assert!(
        directory.requests().is_empty(),
        "No request should be made for an invalid group ID"
    );
}

#[tokio::test]
async fn test_missing_config_is_fatal() {
    let home = tempfile::tempdir().expect("unable to create tempdir");

    let output = command(home.path())
        .args(["uw_testgroup", "uw_admins"])
        .output()
        .await
        .expect("Should be able to run command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FATAL"), "Stderr: {}", stderr);
    assert!(stderr.contains("No base URL configured"), "Stderr: {}", stderr);
}

#[tokio::test]
async fn test_config_file_with_cli_override() {
    let tls = TlsFixtures::generate();
    let directory = TestDirectory::new_mtls(201, &tls).await;
    let home = tempfile::tempdir().expect("unable to create tempdir");

    // The file points at a service that isn't there, the flag should win
    let config_path = home.path().join("gws.toml");
    std::fs::write(
        &config_path,
        format!(
            "gws_base_url = {:?}\nca_cert = {:?}\nclient_cert = {:?}\nclient_key = {:?}\n",
            unreachable_base_url("https"),
            tls.ca_cert,
            tls.client_cert,
            tls.client_key
        ),
    )
    .unwrap();

    let output = command(home.path())
        .arg("--config-path")
        .arg(&config_path)
        .args(["--base-url", directory.base_url.as_str(), "uw_testgroup", "uw_admins"])
        .output()
        .await
        .expect("Should be able to run command");

    assert_status(&output, "Should be able to create a group from a config file");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "STATUS: 201");
    assert_eq!(directory.requests().len(), 1);
}

fn assert_status(output: &Output, message: &str) {
    assert!(
        output.status.success(),
        "{}:\nStdout:\n {}\nStderr:\n{}",
        message,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}
