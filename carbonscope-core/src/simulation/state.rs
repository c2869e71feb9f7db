use carbonscope_schemas::stage::LifecycleStageKey;
use std::collections::HashMap;

/// Ephemeral per-session snapshot of simulated CO2 values.
///
/// Holds one entry per `dynamic`-mode stage of the active record and
/// nothing else. Never persisted; discarded when the record is unloaded
/// or replaced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DynamicValueState {
    pub values: HashMap<LifecycleStageKey, f64>,
}

impl DynamicValueState {
    /// The current simulated value for a stage, if that stage is tracked.
    pub fn value_for(&self, key: LifecycleStageKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
