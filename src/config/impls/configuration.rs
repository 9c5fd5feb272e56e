use std::fs::File;
use std::io::Write;
use std::thread::available_parallelism;
use log::{error, info};
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::http_trackers_config::HttpTrackersConfig;
use crate::config::structs::peer_db_config::PeerDbConfig;
use crate::config::structs::tracker_config::TrackerConfig;
use crate::config::structs::udp_trackers_config::UdpTrackersConfig;

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            log_console_interval: 60,
            tracker_config: TrackerConfig {
                announce_interval: 1800,
                announce_interval_minimum: 900,
                peers_timeout: 3600,
                peers_cleanup_interval: 300,
                numwant_default: 75,
                numwant_limit: 200,
                conn_id_validate: true,
                conn_id_ttl: 120,
                conn_id_trim_interval: 60,
            },
            peer_db: PeerDbConfig {
                shards: 1024,
                snapshot_path: String::from("peers.snapshot"),
                snapshot_interval: 300,
            },
            http_server: vec![
                HttpTrackersConfig {
                    enabled: true,
                    bind_address: String::from("0.0.0.0:6969"),
                    threads: available_parallelism().unwrap().get() as u64,
                    keep_alive: 0,
                    request_timeout: 5,
                    disconnect_timeout: 7,
                }
            ],
            udp_server: vec![
                UdpTrackersConfig {
                    enabled: true,
                    bind_address: String::from("0.0.0.0:6969"),
                }
            ],
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(config) => {
                        config.validate()?;
                        Ok(config)
                    }
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(()) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e)),
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e)),
        }
    }

    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, ConfigurationError> {
        match Configuration::load_file(path) {
            Ok(config) => {
                info!("Configuration loaded from {path}");
                Ok(config)
            }
            Err(error) => {
                error!("No configuration could be loaded from {path}: {error}");
                if create {
                    let config = Configuration::init();
                    let data = toml::to_string(&config).map_err(ConfigurationError::SerializeError)?;
                    Configuration::save_file(path, data)?;
                    info!("Created default configuration at {path}");
                    Ok(config)
                } else {
                    Err(error)
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.peer_db.shards == 0 || !self.peer_db.shards.is_power_of_two() {
            return Err(ConfigurationError::InvalidValue(format!(
                "peer_db.shards must be a power of two, got {}",
                self.peer_db.shards
            )));
        }
        if self.tracker_config.announce_interval == 0 {
            return Err(ConfigurationError::InvalidValue(String::from("tracker_config.announce_interval must be non-zero")));
        }
        if self.tracker_config.numwant_limit == 0 {
            return Err(ConfigurationError::InvalidValue(String::from("tracker_config.numwant_limit must be non-zero")));
        }
        Ok(())
    }

    /// Non-fatal misconfigurations, logged as warnings at startup.
    pub fn startup_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.tracker_config.conn_id_validate {
            warnings.push(String::from(
                "UDP connection id validation is disabled. Do not expose this service to untrusted networks; it could be abused in UDP based amplification attacks."
            ));
        }
        if self.tracker_config.peers_timeout < self.tracker_config.announce_interval {
            warnings.push(String::from(
                "peers_timeout is shorter than announce_interval. Peers will expire from the database between announces."
            ));
        }
        warnings
    }
}
