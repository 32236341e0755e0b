//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::{
    CharacterRepositoryPort, LocalizationPort, RollEvaluatorPort,
};
use crate::application::services::{
    CharacterService, CharacterServiceImpl, ConditionService, ConditionServiceImpl, RollService,
    RollServiceImpl,
};
use crate::infrastructure::config::{AppConfig, StorageBackend};
use crate::infrastructure::dice_roller::RandomRollEvaluator;
use crate::infrastructure::localization::StaticLocalization;
use crate::infrastructure::persistence::{InMemoryCharacterRepository, SqliteCharacterRepository};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub character_service: Arc<dyn CharacterService>,
    pub condition_service: Arc<dyn ConditionService>,
    pub roll_service: Arc<dyn RollService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository: Arc<dyn CharacterRepositoryPort> = match config.storage {
            StorageBackend::Sqlite => Arc::new(
                SqliteCharacterRepository::connect(&config.database_url)
                    .await
                    .with_context(|| format!("Failed to open database {}", config.database_url))?,
            ),
            StorageBackend::Memory => Arc::new(InMemoryCharacterRepository::new()),
        };

        Ok(Self::with_adapters(
            config,
            repository,
            Arc::new(RandomRollEvaluator::new()),
            Arc::new(StaticLocalization::english()),
        ))
    }

    /// Wire the services over explicit adapters
    pub fn with_adapters(
        config: AppConfig,
        repository: Arc<dyn CharacterRepositoryPort>,
        roller: Arc<dyn RollEvaluatorPort>,
        localization: Arc<dyn LocalizationPort>,
    ) -> Self {
        let character_service =
            CharacterServiceImpl::new(repository.clone(), localization.clone());
        let condition_service = ConditionServiceImpl::new(repository.clone());
        let roll_service = RollServiceImpl::new(repository, roller, localization);

        Self {
            config,
            character_service: Arc::new(character_service),
            condition_service: Arc::new(condition_service),
            roll_service: Arc::new(roll_service),
        }
    }
}
