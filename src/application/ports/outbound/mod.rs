//! Outbound ports - Interfaces that the application requires from external systems

mod localization_port;
mod repository_port;
mod roll_port;

pub use localization_port::LocalizationPort;
pub use repository_port::{CharacterRepositoryPort, RepositoryError};
pub use roll_port::{RollError, RollEvaluatorPort, RollOutcome, RollRequest};

#[cfg(test)]
pub use repository_port::MockCharacterRepositoryPort;
#[cfg(test)]
pub use roll_port::MockRollEvaluatorPort;
