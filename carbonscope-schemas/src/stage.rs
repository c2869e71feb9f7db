use serde::{Deserialize, Serialize};

/// The ten phases of an AI service's life span. Software stages first,
/// hardware stages second; this declaration order is the canonical order
/// for iteration and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleStageKey {
    BusinessUseCaseGeneration,
    DataHandling,
    ModelArchitectureExploration,
    ModelTraining,
    ModelOperation,
    ModelEndOfLife,
    MaterialExtraction,
    HardwareManufacturing,
    HardwareTransport,
    AiSystemInstallation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    /// Operational impact: software stages.
    Software,
    /// Embodied impact: hardware stages.
    Hardware,
}

impl LifecycleStageKey {
    pub const SOFTWARE: [LifecycleStageKey; 6] = [
        LifecycleStageKey::BusinessUseCaseGeneration,
        LifecycleStageKey::DataHandling,
        LifecycleStageKey::ModelArchitectureExploration,
        LifecycleStageKey::ModelTraining,
        LifecycleStageKey::ModelOperation,
        LifecycleStageKey::ModelEndOfLife,
    ];

    pub const HARDWARE: [LifecycleStageKey; 4] = [
        LifecycleStageKey::MaterialExtraction,
        LifecycleStageKey::HardwareManufacturing,
        LifecycleStageKey::HardwareTransport,
        LifecycleStageKey::AiSystemInstallation,
    ];

    /// All ten stage keys in canonical order (software, then hardware).
    pub const ALL: [LifecycleStageKey; 10] = [
        LifecycleStageKey::BusinessUseCaseGeneration,
        LifecycleStageKey::DataHandling,
        LifecycleStageKey::ModelArchitectureExploration,
        LifecycleStageKey::ModelTraining,
        LifecycleStageKey::ModelOperation,
        LifecycleStageKey::ModelEndOfLife,
        LifecycleStageKey::MaterialExtraction,
        LifecycleStageKey::HardwareManufacturing,
        LifecycleStageKey::HardwareTransport,
        LifecycleStageKey::AiSystemInstallation,
    ];

    /// Every stage belongs to exactly one category.
    pub fn category(&self) -> StageCategory {
        match self {
            LifecycleStageKey::BusinessUseCaseGeneration
            | LifecycleStageKey::DataHandling
            | LifecycleStageKey::ModelArchitectureExploration
            | LifecycleStageKey::ModelTraining
            | LifecycleStageKey::ModelOperation
            | LifecycleStageKey::ModelEndOfLife => StageCategory::Software,
            LifecycleStageKey::MaterialExtraction
            | LifecycleStageKey::HardwareManufacturing
            | LifecycleStageKey::HardwareTransport
            | LifecycleStageKey::AiSystemInstallation => StageCategory::Hardware,
        }
    }

    /// The stage key as it appears in the persisted JSON format.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LifecycleStageKey::BusinessUseCaseGeneration => "businessUseCaseGeneration",
            LifecycleStageKey::DataHandling => "dataHandling",
            LifecycleStageKey::ModelArchitectureExploration => "modelArchitectureExploration",
            LifecycleStageKey::ModelTraining => "modelTraining",
            LifecycleStageKey::ModelOperation => "modelOperation",
            LifecycleStageKey::ModelEndOfLife => "modelEndOfLife",
            LifecycleStageKey::MaterialExtraction => "materialExtraction",
            LifecycleStageKey::HardwareManufacturing => "hardwareManufacturing",
            LifecycleStageKey::HardwareTransport => "hardwareTransport",
            LifecycleStageKey::AiSystemInstallation => "aiSystemInstallation",
        }
    }

    /// Human-readable label for reports and exported tables.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleStageKey::BusinessUseCaseGeneration => "Business Use Case Generation",
            LifecycleStageKey::DataHandling => "Data Handling",
            LifecycleStageKey::ModelArchitectureExploration => "Model Architecture Exploration",
            LifecycleStageKey::ModelTraining => "Model Training",
            LifecycleStageKey::ModelOperation => "Model Operation",
            LifecycleStageKey::ModelEndOfLife => "Model End of Life",
            LifecycleStageKey::MaterialExtraction => "Material Extraction",
            LifecycleStageKey::HardwareManufacturing => "Hardware Manufacturing",
            LifecycleStageKey::HardwareTransport => "Hardware Transport",
            LifecycleStageKey::AiSystemInstallation => "AI System Installation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_software_then_hardware() {
        let (software, hardware) = LifecycleStageKey::ALL.split_at(6);
        assert_eq!(software, &LifecycleStageKey::SOFTWARE[..]);
        assert_eq!(hardware, &LifecycleStageKey::HARDWARE[..]);
    }

    #[test]
    fn every_stage_has_exactly_one_category() {
        for key in LifecycleStageKey::SOFTWARE {
            assert_eq!(key.category(), StageCategory::Software);
        }
        for key in LifecycleStageKey::HARDWARE {
            assert_eq!(key.category(), StageCategory::Hardware);
        }
    }

    #[test]
    fn wire_name_matches_serde_representation() {
        for key in LifecycleStageKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.wire_name()));
        }
    }

    #[test]
    fn wire_names_are_unique() {
        let mut names: Vec<_> = LifecycleStageKey::ALL.iter().map(|k| k.wire_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10);
    }
}
