use std::str::FromStr;

/// Optional booking policy. Every limit is off by default, so an unconfigured
/// manager accepts any valid range for a free room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Longest stay accepted by `create_reservation`, in nights.
    pub max_stay_nights: Option<i64>,
    /// Active (not cancelled) reservations one user may hold at once.
    pub max_active_per_user: Option<usize>,
}

impl EngineConfig {
    /// Read `INNKEEP_MAX_STAY_NIGHTS` and `INNKEEP_MAX_ACTIVE_PER_USER`.
    /// Missing or unparsable values leave the limit off.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_stay_nights: parse_opt(&lookup, "INNKEEP_MAX_STAY_NIGHTS"),
            max_active_per_user: parse_opt(&lookup, "INNKEEP_MAX_ACTIVE_PER_USER"),
        }
    }
}

fn parse_opt<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring unparsable {key}={raw:?}, limit stays off");
            None
        }
    }
}
