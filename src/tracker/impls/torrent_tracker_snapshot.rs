use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::{info, warn};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use crate::common::structs::custom_error::CustomError;
use crate::common::structs::number_of_bytes::NumberOfBytes;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::enums::announce_event::AnnounceEvent;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::peer_id::PeerId;
use crate::tracker::structs::torrent_entry::{PeerMap, TorrentEntry};
use crate::tracker::structs::torrent_peer::TorrentPeer;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

const SNAPSHOT_MAGIC: &[u8; 4] = b"SWTK";
const SNAPSHOT_VERSION: u32 = 1;

impl TorrentTracker {
    /// Serializes the whole peer database to `path`.
    ///
    /// Shards are visited in index order and swarms in key order, so two
    /// snapshots of the same state are byte-identical. One shard read lock
    /// is held at a time; a snapshot is therefore consistent per shard, not
    /// globally, which is fine for a cache of soft state.
    pub fn save_snapshot(&self, path: &Path) -> Result<u64, std::io::Error> {
        let mut body: Vec<u8> = Vec::new();
        let mut torrent_count: u64 = 0;

        for shard in self.torrents_sharding.shards.iter() {
            let shard_read = shard.read();
            for (info_hash, torrent_entry) in shard_read.iter() {
                body.write_all(&info_hash.0)?;
                body.write_u32::<BigEndian>(torrent_entry.seeds.len() as u32)?;
                body.write_u32::<BigEndian>(torrent_entry.peers.len() as u32)?;
                for torrent_peer in torrent_entry.seeds.values() {
                    Self::write_peer(&mut body, torrent_peer)?;
                }
                for torrent_peer in torrent_entry.peers.values() {
                    Self::write_peer(&mut body, torrent_peer)?;
                }
                torrent_count += 1;
            }
        }

        let mut buffer: Vec<u8> = Vec::with_capacity(16 + body.len());
        buffer.write_all(SNAPSHOT_MAGIC)?;
        buffer.write_u32::<BigEndian>(SNAPSHOT_VERSION)?;
        buffer.write_u64::<BigEndian>(torrent_count)?;
        buffer.write_all(&body)?;

        std::fs::write(path, buffer)?;
        Ok(torrent_count)
    }

    fn write_peer(buffer: &mut Vec<u8>, torrent_peer: &TorrentPeer) -> Result<(), std::io::Error> {
        buffer.write_all(&torrent_peer.peer_id.0)?;
        match torrent_peer.peer_addr.ip() {
            IpAddr::V4(ip) => {
                buffer.write_u8(4)?;
                buffer.write_all(&ip.octets())?;
            }
            IpAddr::V6(ip) => {
                buffer.write_u8(6)?;
                buffer.write_all(&ip.octets())?;
            }
        }
        buffer.write_u16::<BigEndian>(torrent_peer.peer_addr.port())?;
        buffer.write_i64::<BigEndian>(torrent_peer.uploaded.0)?;
        buffer.write_i64::<BigEndian>(torrent_peer.downloaded.0)?;
        buffer.write_i64::<BigEndian>(torrent_peer.left.0)?;
        buffer.write_u64::<BigEndian>(torrent_peer.updated)?;
        buffer.write_u8(torrent_peer.event.to_i32() as u8)?;
        Ok(())
    }

    /// Restores the peer database from disk at startup.
    ///
    /// Of `<path>` and `<path>.tmp`, the one with the newer modification
    /// time is preferred; if it cannot be read or decoded the other is
    /// tried; if both fail the database starts empty. A corrupt snapshot
    /// never takes the process down.
    pub fn load_snapshot(&self) -> u64 {
        let path = PathBuf::from(&self.config.peer_db.snapshot_path);
        let tmp_path = Self::snapshot_tmp_path(&path);

        let mut candidates: Vec<(PathBuf, SystemTime)> = [path, tmp_path]
            .into_iter()
            .filter_map(|candidate| {
                let modified = std::fs::metadata(&candidate).and_then(|meta| meta.modified()).ok()?;
                Some((candidate, modified))
            })
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        for (candidate, _) in candidates {
            let data = match std::fs::read(&candidate) {
                Ok(data) => data,
                Err(error) => {
                    warn!("[SNAPSHOT] Could not read {}: {}", candidate.display(), error);
                    continue;
                }
            };
            match Self::decode_snapshot(&data) {
                Ok(torrents) => {
                    let loaded = torrents.len() as u64;
                    self.restore_torrents(torrents);
                    info!("[SNAPSHOT] Loaded {} torrents from {}", loaded, candidate.display());
                    return loaded;
                }
                Err(error) => {
                    warn!("[SNAPSHOT] Could not decode {}: {}", candidate.display(), error);
                }
            }
        }

        info!("[SNAPSHOT] No usable snapshot found, starting with an empty database");
        0
    }

    pub fn snapshot_tmp_path(path: &Path) -> PathBuf {
        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn decode_snapshot(data: &[u8]) -> Result<Vec<(InfoHash, TorrentEntry)>, CustomError> {
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic).map_err(|_| CustomError::new("truncated snapshot header"))?;
        if &magic != SNAPSHOT_MAGIC {
            return Err(CustomError::new("not a snapshot file"));
        }
        let version = cursor.read_u32::<BigEndian>().map_err(|_| CustomError::new("truncated snapshot header"))?;
        if version != SNAPSHOT_VERSION {
            return Err(CustomError::new(&format!("unsupported snapshot version {version}")));
        }

        let torrent_count = cursor.read_u64::<BigEndian>().map_err(|_| CustomError::new("truncated snapshot header"))?;
        let mut torrents = Vec::with_capacity(torrent_count.min(1_000_000) as usize);
        for _ in 0..torrent_count {
            let mut info_hash = [0u8; 20];
            cursor.read_exact(&mut info_hash).map_err(|_| CustomError::new("truncated torrent record"))?;
            let seeds_count = cursor.read_u32::<BigEndian>().map_err(|_| CustomError::new("truncated torrent record"))?;
            let peers_count = cursor.read_u32::<BigEndian>().map_err(|_| CustomError::new("truncated torrent record"))?;

            let mut torrent_entry = TorrentEntry::new();
            Self::read_peers(&mut cursor, seeds_count, &mut torrent_entry.seeds)?;
            Self::read_peers(&mut cursor, peers_count, &mut torrent_entry.peers)?;
            torrent_entry.updated = torrent_entry.seeds.values()
                .chain(torrent_entry.peers.values())
                .map(|torrent_peer| torrent_peer.updated)
                .max()
                .unwrap_or(torrent_entry.updated);
            torrents.push((InfoHash(info_hash), torrent_entry));
        }

        Ok(torrents)
    }

    fn read_peers(cursor: &mut Cursor<&[u8]>, count: u32, map: &mut PeerMap) -> Result<(), CustomError> {
        for _ in 0..count {
            let mut peer_id = [0u8; 20];
            cursor.read_exact(&mut peer_id).map_err(|_| CustomError::new("truncated peer record"))?;
            let family = cursor.read_u8().map_err(|_| CustomError::new("truncated peer record"))?;
            let ip = match family {
                4 => {
                    let mut octets = [0u8; 4];
                    cursor.read_exact(&mut octets).map_err(|_| CustomError::new("truncated peer record"))?;
                    IpAddr::V4(Ipv4Addr::from(octets))
                }
                6 => {
                    let mut octets = [0u8; 16];
                    cursor.read_exact(&mut octets).map_err(|_| CustomError::new("truncated peer record"))?;
                    IpAddr::V6(Ipv6Addr::from(octets))
                }
                _ => {
                    return Err(CustomError::new("invalid address family in peer record"));
                }
            };
            let port = cursor.read_u16::<BigEndian>().map_err(|_| CustomError::new("truncated peer record"))?;
            let uploaded = cursor.read_i64::<BigEndian>().map_err(|_| CustomError::new("truncated peer record"))?;
            let downloaded = cursor.read_i64::<BigEndian>().map_err(|_| CustomError::new("truncated peer record"))?;
            let left = cursor.read_i64::<BigEndian>().map_err(|_| CustomError::new("truncated peer record"))?;
            let updated = cursor.read_u64::<BigEndian>().map_err(|_| CustomError::new("truncated peer record"))?;
            let event = cursor.read_u8().map_err(|_| CustomError::new("truncated peer record"))?;

            let peer_id = PeerId(peer_id);
            map.insert(peer_id, TorrentPeer {
                peer_id,
                peer_addr: SocketAddr::new(ip, port),
                updated,
                uploaded: NumberOfBytes(uploaded),
                downloaded: NumberOfBytes(downloaded),
                left: NumberOfBytes(left),
                event: AnnounceEvent::from_i32(event as i32),
            });
        }
        Ok(())
    }

    fn restore_torrents(&self, torrents: Vec<(InfoHash, TorrentEntry)>) {
        let mut restore_map: BTreeMap<usize, Vec<(InfoHash, TorrentEntry)>> = BTreeMap::new();
        for (info_hash, torrent_entry) in torrents {
            let shard_index = self.torrents_sharding.shard_index(&info_hash);
            restore_map.entry(shard_index).or_default().push((info_hash, torrent_entry));
        }

        let (mut torrents_added, mut seeds_added, mut peers_added) = (0i64, 0i64, 0i64);
        for (shard_index, entries) in restore_map {
            let mut shard_write = self.torrents_sharding.shards[shard_index].write();
            for (info_hash, torrent_entry) in entries {
                seeds_added += torrent_entry.seeds.len() as i64;
                peers_added += torrent_entry.peers.len() as i64;
                match shard_write.insert(info_hash, torrent_entry) {
                    None => { torrents_added += 1; }
                    Some(previous) => {
                        seeds_added -= previous.seeds.len() as i64;
                        peers_added -= previous.peers.len() as i64;
                    }
                }
            }
        }

        self.update_stats(StatsEvent::Torrents, torrents_added);
        self.update_stats(StatsEvent::Seeds, seeds_added);
        self.update_stats(StatsEvent::Peers, peers_added);
    }
}
