use serde::{Deserialize, Serialize};
use crate::config::structs::http_trackers_config::HttpTrackersConfig;
use crate::config::structs::peer_db_config::PeerDbConfig;
use crate::config::structs::tracker_config::TrackerConfig;
use crate::config::structs::udp_trackers_config::UdpTrackersConfig;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Configuration {
    pub log_level: String,
    /// Interval in seconds for the console statistics dump. Zero disables it.
    pub log_console_interval: u64,
    pub tracker_config: TrackerConfig,
    pub peer_db: PeerDbConfig,
    pub http_server: Vec<HttpTrackersConfig>,
    pub udp_server: Vec<UdpTrackersConfig>,
}
