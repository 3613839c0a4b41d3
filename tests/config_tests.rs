//! Configuration parsing tests.

use emulator_core::TableKind;
use pinboard_emulator::{Config, DestinationConfig};
use std::io::Write;

fn config_from_yaml(yaml: &str) -> anyhow::Result<Config> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    Config::from_file(file.path())
}

const FULL_CONFIG: &str = r#"
database:
  host: db.example.com
  user: admin
  password: secret
  database: pinboard
destinations:
  - transport: rest_proxy
    endpoint: http://broker.example.com:8082
    names:
      pin: demo.pin
      geo: demo.geo
      user: demo.user
  - transport: api_gateway
    endpoint: https://gateway.example.com/dev
    names:
      pin: streaming-demo-pin
      geo: streaming-demo-geo
      user: streaming-demo-user
seed: 100
"#;

#[test]
fn test_parse_full_config() {
    let config = config_from_yaml(FULL_CONFIG).unwrap();

    assert_eq!(config.database.host, "db.example.com");
    assert_eq!(config.database.port, 3306); // default
    assert_eq!(config.database.database, "pinboard");
    assert_eq!(config.seed, Some(100));
    assert_eq!(config.destinations.len(), 2);

    match &config.destinations[0] {
        DestinationConfig::RestProxy { endpoint, names } => {
            assert_eq!(endpoint, "http://broker.example.com:8082");
            assert_eq!(names.for_kind(TableKind::Pin), "demo.pin");
            assert_eq!(names.for_kind(TableKind::Geo), "demo.geo");
            assert_eq!(names.for_kind(TableKind::User), "demo.user");
        }
        other => panic!("expected rest_proxy destination, got {other:?}"),
    }

    match &config.destinations[1] {
        DestinationConfig::ApiGateway {
            partition_key,
            names,
            ..
        } => {
            // Defaulted when absent from the file
            assert_eq!(partition_key, "partition-key");
            assert_eq!(names.for_kind(TableKind::User), "streaming-demo-user");
        }
        other => panic!("expected api_gateway destination, got {other:?}"),
    }
}

#[test]
fn test_explicit_partition_key() {
    let yaml = r#"
database:
  host: localhost
  port: 3307
  user: root
  password: root
  database: test
destinations:
  - transport: api_gateway
    endpoint: https://gateway.example.com/dev
    names: { pin: p, geo: g, user: u }
    partition_key: custom-key
"#;
    let config = config_from_yaml(yaml).unwrap();
    assert_eq!(config.database.port, 3307);
    assert_eq!(config.seed, None);
    match &config.destinations[0] {
        DestinationConfig::ApiGateway { partition_key, .. } => {
            assert_eq!(partition_key, "custom-key");
        }
        other => panic!("expected api_gateway destination, got {other:?}"),
    }
}

#[test]
fn test_config_without_destinations_is_rejected() {
    let yaml = r#"
database:
  host: localhost
  user: root
  password: root
  database: test
destinations: []
"#;
    let err = config_from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("at least one destination"));
}

#[test]
fn test_unknown_transport_is_rejected() {
    let yaml = r#"
database:
  host: localhost
  user: root
  password: root
  database: test
destinations:
  - transport: carrier_pigeon
    endpoint: http://localhost
    names: { pin: p, geo: g, user: u }
"#;
    assert!(config_from_yaml(yaml).is_err());
}
