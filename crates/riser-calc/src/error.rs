use riser_common::Category;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// No quality margin is configured for the requested signal type.
    #[error("no quality margin configured for signal type '{0}'")]
    UnknownSignalType(String),
    /// A required category has no candidates; the whole optimization aborts.
    #[error("no {category} available in catalogue (floor {floor})")]
    NoComponentsAvailable { floor: u32, category: Category },
}
