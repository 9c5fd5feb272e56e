use crate::config::structs::configuration::Configuration;

#[test]
fn test_default_configuration_is_valid() {
    let config = Configuration::init();
    assert!(config.validate().is_ok());
    assert_eq!(config.tracker_config.announce_interval, 1800);
    assert_eq!(config.tracker_config.numwant_default, 75);
    assert_eq!(config.tracker_config.numwant_limit, 200);
    assert_eq!(config.tracker_config.conn_id_ttl, 120);
    assert_eq!(config.peer_db.shards, 1024);
    assert!(config.tracker_config.conn_id_validate);
}

#[test]
fn test_default_configuration_has_no_warnings() {
    assert!(Configuration::init().startup_warnings().is_empty());
}

#[test]
fn test_toml_round_trip() {
    let config = Configuration::init();
    let data = toml::to_string(&config).unwrap();
    let reloaded = Configuration::load(data.as_bytes()).unwrap();
    assert_eq!(reloaded.tracker_config.announce_interval, config.tracker_config.announce_interval);
    assert_eq!(reloaded.peer_db.shards, config.peer_db.shards);
    assert_eq!(reloaded.http_server.len(), 1);
    assert_eq!(reloaded.udp_server.len(), 1);
}

#[test]
fn test_shard_count_must_be_power_of_two() {
    let mut config = Configuration::init();
    config.peer_db.shards = 1000;
    assert!(config.validate().is_err());
    config.peer_db.shards = 0;
    assert!(config.validate().is_err());
    config.peer_db.shards = 256;
    assert!(config.validate().is_ok());
}

#[test]
fn test_disabled_validation_warns() {
    let mut config = Configuration::init();
    config.tracker_config.conn_id_validate = false;
    let warnings = config.startup_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("amplification"));
}

#[test]
fn test_short_peer_timeout_warns() {
    let mut config = Configuration::init();
    config.tracker_config.peers_timeout = 600;
    let warnings = config.startup_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("expire"));
}
