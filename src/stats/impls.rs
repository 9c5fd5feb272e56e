pub mod torrent_tracker;
