use crate::common::common::{current_time, QueryValues};
use crate::common::structs::custom_error::CustomError;
use crate::common::structs::number_of_bytes::NumberOfBytes;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::enums::announce_event::AnnounceEvent;
use crate::tracker::structs::announce_query_request::AnnounceQueryRequest;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::peer_id::PeerId;
use crate::tracker::structs::scrape_query_request::ScrapeQueryRequest;
use crate::tracker::structs::torrent_entry::TorrentEntry;
use crate::tracker::structs::torrent_peer::TorrentPeer;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::net::{IpAddr, SocketAddr};

impl TorrentTracker {
    /// Validates the raw announce query into an [`AnnounceQueryRequest`].
    ///
    /// `info_hash`, `peer_id`, `port`, `uploaded`, `downloaded` and `left`
    /// are required; everything else falls back to protocol defaults.
    /// `compact` defaults to on.
    pub fn validate_announce(&self, remote_addr: IpAddr, query: HashMap<String, QueryValues>) -> Result<AnnounceQueryRequest, CustomError> {
        #[inline]
        fn get_required_bytes<'a>(query: &'a HashMap<String, QueryValues>, field: &str, expected_len: Option<usize>) -> Result<&'a [u8], CustomError> {
            let value = query.get(field)
                .ok_or_else(|| CustomError::new(&format!("missing {field}")))?
                .first()
                .ok_or_else(|| CustomError::new(&format!("no {field} given")))?;
            if let Some(len) = expected_len {
                if value.len() != len {
                    return Err(CustomError::new(&format!("invalid {field} size")));
                }
            }
            Ok(value.as_slice())
        }

        #[inline]
        fn parse_integer<T: std::str::FromStr>(query: &HashMap<String, QueryValues>, field: &str) -> Result<T, CustomError> {
            let bytes = get_required_bytes(query, field, None)?;
            let str_value = std::str::from_utf8(bytes)
                .map_err(|_| CustomError::new(&format!("invalid {field}")))?;
            str_value.parse::<T>()
                .map_err(|_| CustomError::new(&format!("missing or invalid {field}")))
        }

        let config = &self.config.tracker_config;
        let info_hash = InfoHash::from(get_required_bytes(&query, "info_hash", Some(20))?);
        let peer_id = PeerId::from(get_required_bytes(&query, "peer_id", Some(20))?);
        let port_integer = parse_integer::<u16>(&query, "port")?;
        if port_integer == 0 {
            return Err(CustomError::new("invalid port"));
        }
        let uploaded_integer = parse_integer::<u64>(&query, "uploaded")?;
        let downloaded_integer = parse_integer::<u64>(&query, "downloaded")?;
        let left_integer = parse_integer::<u64>(&query, "left")?;
        let compact_bool = query.get("compact")
            .and_then(|v| v.first())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.parse::<u8>().ok())
            .map(|v| v == 1)
            .unwrap_or(true);
        let no_peer_id_bool = query.contains_key("no_peer_id");
        let event = query.get("event")
            .and_then(|v| v.first())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .map(AnnounceEvent::from_query_value)
            .unwrap_or(AnnounceEvent::None);
        let numwant_integer = query.get("numwant")
            .and_then(|v| v.first())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(|v| v.min(config.numwant_limit))
            .unwrap_or(config.numwant_default);
        // a client behind a gateway may announce a routable address for itself
        let effective_addr = query.get("ip")
            .and_then(|v| v.first())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.parse::<IpAddr>().ok())
            .unwrap_or(remote_addr);

        Ok(AnnounceQueryRequest {
            info_hash,
            peer_id,
            port: port_integer,
            uploaded: uploaded_integer,
            downloaded: downloaded_integer,
            left: left_integer,
            compact: compact_bool,
            no_peer_id: no_peer_id_bool,
            event,
            remote_addr: effective_addr,
            numwant: numwant_integer,
        })
    }

    /// Applies an announce to the peer database.
    ///
    /// `started`, `completed` and plain updates insert or refresh the
    /// record; `stopped` removes it. Returns the stored record and the
    /// swarm state after the mutation (an empty entry when the swarm was
    /// dropped).
    pub fn handle_announce(&self, announce_query: AnnounceQueryRequest) -> Result<(TorrentPeer, TorrentEntry), CustomError> {
        let torrent_peer = TorrentPeer {
            peer_id: announce_query.peer_id,
            peer_addr: SocketAddr::new(announce_query.remote_addr, announce_query.port),
            updated: current_time(),
            uploaded: NumberOfBytes(announce_query.uploaded as i64),
            downloaded: NumberOfBytes(announce_query.downloaded as i64),
            left: NumberOfBytes(announce_query.left as i64),
            event: announce_query.event,
        };

        match announce_query.event {
            AnnounceEvent::Stopped => {
                debug!("[HANDLE ANNOUNCE] Removing from infohash {} peerid {}", announce_query.info_hash, announce_query.peer_id);
                let torrent_entry = match self.remove_torrent_peer(announce_query.info_hash, announce_query.peer_id) {
                    (_, Some(remaining_torrent)) => remaining_torrent,
                    _ => TorrentEntry::new(),
                };
                Ok((torrent_peer, torrent_entry))
            }
            AnnounceEvent::Completed => {
                debug!("[HANDLE ANNOUNCE] Adding to infohash {} peerid {}", announce_query.info_hash, announce_query.peer_id);
                let (_, torrent_entry) = self.add_torrent_peer(
                    announce_query.info_hash,
                    announce_query.peer_id,
                    torrent_peer.clone(),
                );
                self.update_stats(StatsEvent::Completed, 1);
                Ok((torrent_peer, torrent_entry))
            }
            AnnounceEvent::Started | AnnounceEvent::None => {
                debug!("[HANDLE ANNOUNCE] Adding to infohash {} peerid {}", announce_query.info_hash, announce_query.peer_id);
                let (_, torrent_entry) = self.add_torrent_peer(
                    announce_query.info_hash,
                    announce_query.peer_id,
                    torrent_peer.clone(),
                );
                Ok((torrent_peer, torrent_entry))
            }
        }
    }

    pub fn validate_scrape(&self, query: HashMap<String, QueryValues>) -> Result<ScrapeQueryRequest, CustomError> {
        match query.get("info_hash") {
            None => Err(CustomError::new("missing info_hash")),
            Some(result) => {
                if result.is_empty() {
                    return Err(CustomError::new("no info_hash given"));
                }
                let mut info_hash_vec = Vec::with_capacity(result.len());
                for hash in result.iter() {
                    if hash.len() != 20 {
                        return Err(CustomError::new("an invalid info_hash was given"));
                    }
                    info_hash_vec.push(InfoHash::from(hash.as_slice()));
                }
                Ok(ScrapeQueryRequest { info_hash: info_hash_vec })
            }
        }
    }

    /// Resolves each scraped hash to its swarm, empty entries for unknown
    /// hashes, preserving request order in the sorted response map.
    pub fn handle_scrape(&self, scrape_query: ScrapeQueryRequest) -> BTreeMap<InfoHash, TorrentEntry> {
        scrape_query.info_hash.iter()
            .map(|&info_hash| {
                let entry = self.get_torrent(info_hash).unwrap_or_default();
                (info_hash, entry)
            })
            .collect()
    }
}
