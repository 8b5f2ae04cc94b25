use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    Added,
    Exists,
    Removed,
    Missing,
}

/// Acknowledgement returned by the favorite add/remove endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteAck {
    pub status: FavoriteStatus,
}

impl FavoriteAck {
    pub fn new(status: FavoriteStatus) -> Self {
        Self { status }
    }
}
