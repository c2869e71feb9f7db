use crate::impact::ImpactConfig;
use crate::stage::LifecycleStageKey;
use serde::{Deserialize, Serialize};

/// Total mapping from every lifecycle stage to its impact configuration.
///
/// Completeness is enforced by construction: the persisted format must
/// carry exactly these ten keys, never missing, never duplicated, and no
/// others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CycleStages {
    pub business_use_case_generation: ImpactConfig,
    pub data_handling: ImpactConfig,
    pub model_architecture_exploration: ImpactConfig,
    pub model_training: ImpactConfig,
    pub model_operation: ImpactConfig,
    pub model_end_of_life: ImpactConfig,
    pub material_extraction: ImpactConfig,
    pub hardware_manufacturing: ImpactConfig,
    pub hardware_transport: ImpactConfig,
    pub ai_system_installation: ImpactConfig,
}

impl CycleStages {
    pub fn get(&self, key: LifecycleStageKey) -> &ImpactConfig {
        match key {
            LifecycleStageKey::BusinessUseCaseGeneration => &self.business_use_case_generation,
            LifecycleStageKey::DataHandling => &self.data_handling,
            LifecycleStageKey::ModelArchitectureExploration => {
                &self.model_architecture_exploration
            }
            LifecycleStageKey::ModelTraining => &self.model_training,
            LifecycleStageKey::ModelOperation => &self.model_operation,
            LifecycleStageKey::ModelEndOfLife => &self.model_end_of_life,
            LifecycleStageKey::MaterialExtraction => &self.material_extraction,
            LifecycleStageKey::HardwareManufacturing => &self.hardware_manufacturing,
            LifecycleStageKey::HardwareTransport => &self.hardware_transport,
            LifecycleStageKey::AiSystemInstallation => &self.ai_system_installation,
        }
    }

    pub fn get_mut(&mut self, key: LifecycleStageKey) -> &mut ImpactConfig {
        match key {
            LifecycleStageKey::BusinessUseCaseGeneration => {
                &mut self.business_use_case_generation
            }
            LifecycleStageKey::DataHandling => &mut self.data_handling,
            LifecycleStageKey::ModelArchitectureExploration => {
                &mut self.model_architecture_exploration
            }
            LifecycleStageKey::ModelTraining => &mut self.model_training,
            LifecycleStageKey::ModelOperation => &mut self.model_operation,
            LifecycleStageKey::ModelEndOfLife => &mut self.model_end_of_life,
            LifecycleStageKey::MaterialExtraction => &mut self.material_extraction,
            LifecycleStageKey::HardwareManufacturing => &mut self.hardware_manufacturing,
            LifecycleStageKey::HardwareTransport => &mut self.hardware_transport,
            LifecycleStageKey::AiSystemInstallation => &mut self.ai_system_installation,
        }
    }

    /// Stage-by-stage mutation path used by the editing wizard.
    pub fn set(&mut self, key: LifecycleStageKey, config: ImpactConfig) {
        *self.get_mut(key) = config;
    }

    /// Iterates all ten stages in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (LifecycleStageKey, &ImpactConfig)> {
        LifecycleStageKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }
}

/// One AI service's lifecycle impact record: the sole interchange format
/// between the create/edit, visualize, compare and export functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AIServiceLifecycleImpact {
    pub service_id: String,
    pub name: String,
    pub description: String,
    pub cycle_stages: CycleStages,
}
