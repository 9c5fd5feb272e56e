use crate::tracker::structs::info_hash::InfoHash;

/// Parsed scrape request: one or more info hashes to report on.
#[derive(Clone, Debug)]
pub struct ScrapeQueryRequest {
    pub info_hash: Vec<InfoHash>,
}
