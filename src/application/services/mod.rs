//! Application services - Use case implementations
//!
//! Each service follows hexagonal architecture principles, accepting port
//! dependencies and returning domain entities or DTOs.

pub mod character_service;
pub mod condition_service;
mod error;
pub mod roll_service;

pub use character_service::{
    CharacterService, CharacterServiceImpl, CreateCharacterRequest, CreateItemRequest,
};
pub use condition_service::{ConditionService, ConditionServiceImpl};
pub use error::ServiceError;
pub use roll_service::{RollService, RollServiceImpl};
