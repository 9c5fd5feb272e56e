use crate::stats::enums::stats_event::StatsEvent;
use crate::stats::structs::stats::Stats;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use std::sync::atomic::{AtomicI64, Ordering};

impl TorrentTracker {
    pub fn get_stats(&self) -> Stats {
        Stats {
            started: self.stats.started.load(Ordering::Relaxed),
            torrents: self.stats.torrents.load(Ordering::Relaxed),
            seeds: self.stats.seeds.load(Ordering::Relaxed),
            peers: self.stats.peers.load(Ordering::Relaxed),
            completed: self.stats.completed.load(Ordering::Relaxed),
            tcp4_failure: self.stats.tcp4_failure.load(Ordering::Relaxed),
            tcp4_announces_handled: self.stats.tcp4_announces_handled.load(Ordering::Relaxed),
            tcp4_scrapes_handled: self.stats.tcp4_scrapes_handled.load(Ordering::Relaxed),
            tcp4_not_found: self.stats.tcp4_not_found.load(Ordering::Relaxed),
            tcp6_failure: self.stats.tcp6_failure.load(Ordering::Relaxed),
            tcp6_announces_handled: self.stats.tcp6_announces_handled.load(Ordering::Relaxed),
            tcp6_scrapes_handled: self.stats.tcp6_scrapes_handled.load(Ordering::Relaxed),
            tcp6_not_found: self.stats.tcp6_not_found.load(Ordering::Relaxed),
            udp4_bad_request: self.stats.udp4_bad_request.load(Ordering::Relaxed),
            udp4_invalid_request: self.stats.udp4_invalid_request.load(Ordering::Relaxed),
            udp4_connections_handled: self.stats.udp4_connections_handled.load(Ordering::Relaxed),
            udp4_announces_handled: self.stats.udp4_announces_handled.load(Ordering::Relaxed),
            udp4_scrapes_handled: self.stats.udp4_scrapes_handled.load(Ordering::Relaxed),
            udp6_bad_request: self.stats.udp6_bad_request.load(Ordering::Relaxed),
            udp6_invalid_request: self.stats.udp6_invalid_request.load(Ordering::Relaxed),
            udp6_connections_handled: self.stats.udp6_connections_handled.load(Ordering::Relaxed),
            udp6_announces_handled: self.stats.udp6_announces_handled.load(Ordering::Relaxed),
            udp6_scrapes_handled: self.stats.udp6_scrapes_handled.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub fn update_stats(&self, event: StatsEvent, value: i64) {
        self.counter_for(event).fetch_add(value, Ordering::SeqCst);
    }

    #[inline]
    pub fn set_stats(&self, event: StatsEvent, value: i64) {
        self.counter_for(event).store(value, Ordering::SeqCst);
    }

    fn counter_for(&self, event: StatsEvent) -> &AtomicI64 {
        match event {
            StatsEvent::Torrents => &self.stats.torrents,
            StatsEvent::Seeds => &self.stats.seeds,
            StatsEvent::Peers => &self.stats.peers,
            StatsEvent::Completed => &self.stats.completed,
            StatsEvent::Tcp4Failure => &self.stats.tcp4_failure,
            StatsEvent::Tcp4AnnouncesHandled => &self.stats.tcp4_announces_handled,
            StatsEvent::Tcp4ScrapesHandled => &self.stats.tcp4_scrapes_handled,
            StatsEvent::Tcp4NotFound => &self.stats.tcp4_not_found,
            StatsEvent::Tcp6Failure => &self.stats.tcp6_failure,
            StatsEvent::Tcp6AnnouncesHandled => &self.stats.tcp6_announces_handled,
            StatsEvent::Tcp6ScrapesHandled => &self.stats.tcp6_scrapes_handled,
            StatsEvent::Tcp6NotFound => &self.stats.tcp6_not_found,
            StatsEvent::Udp4BadRequest => &self.stats.udp4_bad_request,
            StatsEvent::Udp4InvalidRequest => &self.stats.udp4_invalid_request,
            StatsEvent::Udp4ConnectionsHandled => &self.stats.udp4_connections_handled,
            StatsEvent::Udp4AnnouncesHandled => &self.stats.udp4_announces_handled,
            StatsEvent::Udp4ScrapesHandled => &self.stats.udp4_scrapes_handled,
            StatsEvent::Udp6BadRequest => &self.stats.udp6_bad_request,
            StatsEvent::Udp6InvalidRequest => &self.stats.udp6_invalid_request,
            StatsEvent::Udp6ConnectionsHandled => &self.stats.udp6_connections_handled,
            StatsEvent::Udp6AnnouncesHandled => &self.stats.udp6_announces_handled,
            StatsEvent::Udp6ScrapesHandled => &self.stats.udp6_scrapes_handled,
        }
    }
}
