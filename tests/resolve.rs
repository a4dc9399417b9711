//! End-to-end resolution against real secret files.

use site_settings::config::env::MapEnv;
use site_settings::config::loader::load_with;
use site_settings::config::schema::PasswordSource;
use site_settings::config::secrets::FsSecrets;
use site_settings::config::{ConfigResolver, LoadOptions};
use site_settings::security::{TrustedHostMatcher, TrustedProxies};

mod common;

fn docker_env() -> MapEnv {
    MapEnv::new()
        .with("DOMAIN", "cms.example.org")
        .with("ADDITIONAL_TRUSTED_HOSTS", "www.cms.example.org, admin.example.org")
        .with("DB_NAME", "drupal")
        .with("DB_USER", "drupal")
        .with("DB_PASSWORD", "from-env")
        .with("DB_HOST", "postgres")
        .with("TRUSTED_PROXY_CIDR", "172.20.0.0/16")
}

#[test]
fn test_docker_secret_overrides_env_password() {
    let dir = common::secrets_dir(&[("drupal", "s3cret\n")]);
    let options = LoadOptions {
        secrets_dir: Some(dir.path().to_path_buf()),
        secret_name: None,
    };

    let config = load_with(docker_env(), FsSecrets, &options).unwrap();
    let db = config.database.as_ref().unwrap();

    assert_eq!(db.password, "s3cret");
    assert_eq!(
        db.password_source,
        PasswordSource::SecretFile {
            path: dir.path().join("drupal_password")
        }
    );
    assert_eq!(db.port, 5432);
    assert_eq!(db.driver, "pgsql");
    assert_eq!(db.collation, "C");
}

#[test]
fn test_env_password_without_secret() {
    let dir = common::secrets_dir(&[]);
    let options = LoadOptions {
        secrets_dir: Some(dir.path().to_path_buf()),
        secret_name: None,
    };

    let config = load_with(docker_env(), FsSecrets, &options).unwrap();
    let db = config.database.unwrap();
    assert_eq!(db.password, "from-env");
    assert_eq!(db.password_source, PasswordSource::Environment);
}

#[test]
fn test_resolved_settings_drive_security_checks() {
    let dir = common::secrets_dir(&[]);
    let options = LoadOptions {
        secrets_dir: Some(dir.path().to_path_buf()),
        secret_name: None,
    };
    let config = load_with(docker_env(), FsSecrets, &options).unwrap();

    assert_eq!(
        config.trusted_host_patterns,
        vec![
            r"^cms\.example\.org$",
            r"^www\.cms\.example\.org$",
            r"^admin\.example\.org$",
        ]
    );

    let hosts = TrustedHostMatcher::from_config(&config).unwrap();
    assert!(hosts.is_allowed("cms.example.org"));
    assert!(hosts.is_allowed("admin.example.org:443"));
    assert!(!hosts.is_allowed("attacker.example"));

    let proxies = TrustedProxies::from_settings(&config.reverse_proxy).unwrap();
    assert!(proxies.is_trusted("172.20.3.4".parse().unwrap()));
    assert!(!proxies.is_trusted("8.8.8.8".parse().unwrap()));
}

#[test]
fn test_empty_environment_resolves_defaults() {
    let config = ConfigResolver::new(MapEnv::new(), FsSecrets).resolve().unwrap();

    assert!(config.domain.is_none());
    assert!(config.trusted_host_patterns.is_empty());
    assert!(config.database.is_none());
    assert_eq!(config.reverse_proxy.addresses, vec!["127.0.0.1"]);
    assert_eq!(config.reverse_proxy.trusted_header_mask, 10);
}

#[test]
fn test_serialized_output_shape() {
    let dir = common::secrets_dir(&[]);
    let config = ConfigResolver::new(docker_env(), FsSecrets)
        .with_secrets_dir(dir.path())
        .resolve()
        .unwrap();

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["database"]["driver"], "pgsql");
    assert_eq!(json["database"]["password_source"]["kind"], "environment");
    assert_eq!(json["reverse_proxy"]["enabled"], true);
    assert_eq!(json["reverse_proxy"]["trusted_headers"]["forwarded_for"], true);

    let toml = toml::to_string(&config).unwrap();
    assert!(toml.contains("trusted_header_mask = 10"));
}
