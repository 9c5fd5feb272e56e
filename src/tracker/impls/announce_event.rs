use crate::tracker::enums::announce_event::AnnounceEvent;

impl AnnounceEvent {
    /// Wire mapping of the UDP announce `event` field.
    #[inline]
    pub fn from_i32(i: i32) -> Self {
        match i {
            1 => Self::Completed,
            2 => Self::Started,
            3 => Self::Stopped,
            _ => Self::None,
        }
    }

    #[inline]
    pub fn to_i32(&self) -> i32 {
        match self {
            AnnounceEvent::None => 0,
            AnnounceEvent::Completed => 1,
            AnnounceEvent::Started => 2,
            AnnounceEvent::Stopped => 3,
        }
    }

    /// Mapping of the HTTP announce `event` parameter. Unknown or absent
    /// values mean a plain status update.
    #[inline]
    pub fn from_query_value(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "started" => AnnounceEvent::Started,
            "stopped" => AnnounceEvent::Stopped,
            "completed" => AnnounceEvent::Completed,
            _ => AnnounceEvent::None,
        }
    }
}
