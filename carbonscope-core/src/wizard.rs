use crate::error::CarbonscopeError;
use carbonscope_schemas::{
    impact::ImpactConfig,
    service::{AIServiceLifecycleImpact, CycleStages},
    stage::LifecycleStageKey,
};

/// Steps of the record-editing wizard. The transition function is pure
/// and independent of any UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Entry,
    Metadata,
    HardwareStages,
    SoftwareStages,
    Export,
}

#[derive(Debug, Clone, Copy)]
pub struct WizardContext {
    /// When false, the hardware step is skipped in both directions.
    pub include_hardware: bool,
}

impl Default for WizardContext {
    fn default() -> Self {
        Self {
            include_hardware: true,
        }
    }
}

/// Advances the wizard one step. `Export` is terminal.
pub fn next(state: WizardState, ctx: &WizardContext) -> WizardState {
    match state {
        WizardState::Entry => WizardState::Metadata,
        WizardState::Metadata => {
            if ctx.include_hardware {
                WizardState::HardwareStages
            } else {
                WizardState::SoftwareStages
            }
        }
        WizardState::HardwareStages => WizardState::SoftwareStages,
        WizardState::SoftwareStages => WizardState::Export,
        WizardState::Export => WizardState::Export,
    }
}

/// Steps the wizard back. `Entry` is the floor.
pub fn back(state: WizardState, ctx: &WizardContext) -> WizardState {
    match state {
        WizardState::Entry => WizardState::Entry,
        WizardState::Metadata => WizardState::Entry,
        WizardState::HardwareStages => WizardState::Metadata,
        WizardState::SoftwareStages => {
            if ctx.include_hardware {
                WizardState::HardwareStages
            } else {
                WizardState::Metadata
            }
        }
        WizardState::Export => WizardState::SoftwareStages,
    }
}

/// A fluent builder for assembling a lifecycle impact record stage by
/// stage, the mutation path behind the editing wizard.
///
/// Unset stages default to `none` mode, so a built record always carries
/// all ten stage configs.
#[derive(Default)]
pub struct RecordDraft {
    service_id: String,
    name: String,
    description: String,
    cycle_stages: CycleStages,
}

impl RecordDraft {
    /// Creates a draft for the given service id.
    pub fn new(service_id: &str) -> Self {
        Self {
            service_id: service_id.to_string(),
            ..Self::default()
        }
    }

    /// Sets the display name of the service.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Sets the free-text description of the service.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Replaces the impact configuration of a single stage.
    pub fn with_stage(mut self, key: LifecycleStageKey, config: ImpactConfig) -> Self {
        self.cycle_stages.set(key, config);
        self
    }

    /// Consumes the draft and returns a complete record.
    ///
    /// # Errors
    ///
    /// Returns a `CarbonscopeError` if the service id is empty.
    pub fn build(self) -> Result<AIServiceLifecycleImpact, CarbonscopeError> {
        if self.service_id.trim().is_empty() {
            return Err(CarbonscopeError::MissingServiceId);
        }
        Ok(AIServiceLifecycleImpact {
            service_id: self.service_id,
            name: self.name,
            description: self.description,
            cycle_stages: self.cycle_stages,
        })
    }
}
