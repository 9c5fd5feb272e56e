use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum AnnounceEvent {
    Started,
    Stopped,
    Completed,
    None,
}
