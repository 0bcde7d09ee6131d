use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("No spawn points available")]
    NoSpawnPointsAvailable,

    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Unknown player: {id}")]
    UnknownPlayer { id: u32 },
}

impl SpawnError {
    /// Whether the caller can sensibly retry after changing world state
    /// (registering spawn points, spawning the player).
    pub fn is_recoverable(&self) -> bool {
        match self {
            SpawnError::NoSpawnPointsAvailable => true,
            SpawnError::UnknownPlayer { .. } => true,
            SpawnError::InvalidConfiguration { .. } => false,
            SpawnError::ConfigParse(_) => false,
        }
    }
}
