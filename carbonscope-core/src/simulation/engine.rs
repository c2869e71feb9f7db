use super::state::DynamicValueState;
use carbonscope_schemas::impact::ImpactConfig;
use carbonscope_schemas::service::AIServiceLifecycleImpact;
use rand::Rng;
use std::time::Duration;

/// Recommended scheduler period between ticks. The scheduler itself is a
/// collaborator; the engine only defines the transition.
pub const TICK_INTERVAL: Duration = Duration::from_secs(5);

// Bounds of the random per-tick increment, in kg CO2e.
const MIN_TICK_DELTA: f64 = 0.05;
const MAX_TICK_DELTA: f64 = 0.5;

/// Pure tick transition: every tracked stage grows by a random positive
/// delta, so simulated values are monotonically increasing. Returns a new
/// snapshot; the input is never patched in place.
pub fn advance(state: &DynamicValueState, rng: &mut impl Rng) -> DynamicValueState {
    let values = state
        .values
        .iter()
        .map(|(&key, &value)| (key, value + rng.gen_range(MIN_TICK_DELTA..MAX_TICK_DELTA)))
        .collect();
    DynamicValueState { values }
}

/// Owns the binding between the active record and its simulated values.
///
/// The stub value provider for `dynamic` stages: the configured
/// `httpApiUrl` is never called, values are simulated tick by tick.
/// Binding a new record fully replaces the previous state, so a tick
/// scheduled for an earlier record can never write into a newer one.
#[derive(Debug, Default)]
pub struct DynamicSimulation {
    bound_service_id: Option<String>,
    state: DynamicValueState,
    ticks: u64,
}

impl DynamicSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `record` the active record and resets every tracked value to
    /// zero. Only `dynamic`-mode stages get an entry.
    pub fn bind(&mut self, record: &AIServiceLifecycleImpact) {
        let values = record
            .cycle_stages
            .iter()
            .filter(|(_, config)| matches!(config, ImpactConfig::Dynamic { .. }))
            .map(|(key, _)| (key, 0.0))
            .collect();
        self.bound_service_id = Some(record.service_id.clone());
        self.state = DynamicValueState { values };
        self.ticks = 0;
    }

    /// Drops the active record and its state.
    pub fn clear(&mut self) {
        self.bound_service_id = None;
        self.state = DynamicValueState::default();
        self.ticks = 0;
    }

    /// Applies one atomic tick and returns the new snapshot.
    pub fn tick(&mut self, rng: &mut impl Rng) -> &DynamicValueState {
        self.state = advance(&self.state, rng);
        self.ticks += 1;
        &self.state
    }

    pub fn state(&self) -> &DynamicValueState {
        &self.state
    }

    pub fn bound_service_id(&self) -> Option<&str> {
        self.bound_service_id.as_deref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonscope_schemas::service::CycleStages;
    use carbonscope_schemas::stage::LifecycleStageKey;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record_with_dynamic_stage(service_id: &str, key: LifecycleStageKey) -> AIServiceLifecycleImpact {
        let mut cycle_stages = CycleStages::default();
        cycle_stages.set(
            key,
            ImpactConfig::Dynamic {
                http_api_url: "https://api.example.com/co2".to_string(),
                token: "s3cret".to_string(),
            },
        );
        AIServiceLifecycleImpact {
            service_id: service_id.to_string(),
            name: service_id.to_string(),
            description: String::new(),
            cycle_stages,
        }
    }

    #[test]
    fn bind_tracks_only_dynamic_stages_at_zero() {
        let mut simulation = DynamicSimulation::new();
        simulation.bind(&record_with_dynamic_stage("svc-1", LifecycleStageKey::ModelOperation));

        assert_eq!(simulation.bound_service_id(), Some("svc-1"));
        assert_eq!(simulation.state().values.len(), 1);
        assert_eq!(
            simulation.state().value_for(LifecycleStageKey::ModelOperation),
            Some(0.0)
        );
    }

    #[test]
    fn ticks_are_monotonically_increasing() {
        let mut simulation = DynamicSimulation::new();
        simulation.bind(&record_with_dynamic_stage("svc-1", LifecycleStageKey::ModelOperation));
        let mut rng = StdRng::seed_from_u64(7);

        let mut previous = 0.0;
        for _ in 0..20 {
            simulation.tick(&mut rng);
            let current = simulation
                .state()
                .value_for(LifecycleStageKey::ModelOperation)
                .unwrap();
            assert!(current > previous);
            previous = current;
        }
        assert_eq!(simulation.ticks(), 20);
    }

    #[test]
    fn advance_is_deterministic_under_a_seeded_rng() {
        let state = DynamicValueState {
            values: [(LifecycleStageKey::ModelOperation, 1.0)].into_iter().collect(),
        };
        let a = advance(&state, &mut StdRng::seed_from_u64(42));
        let b = advance(&state, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        // the input snapshot is untouched
        assert_eq!(state.value_for(LifecycleStageKey::ModelOperation), Some(1.0));
    }

    #[test]
    fn rebinding_discards_all_previous_state() {
        let mut simulation = DynamicSimulation::new();
        let mut rng = StdRng::seed_from_u64(7);

        simulation.bind(&record_with_dynamic_stage("svc-1", LifecycleStageKey::ModelOperation));
        for _ in 0..5 {
            simulation.tick(&mut rng);
        }

        // replacing the record must not leak svc-1 values into svc-2 state
        simulation.bind(&record_with_dynamic_stage("svc-2", LifecycleStageKey::ModelTraining));
        assert_eq!(simulation.bound_service_id(), Some("svc-2"));
        assert_eq!(simulation.ticks(), 0);
        assert_eq!(
            simulation.state().value_for(LifecycleStageKey::ModelOperation),
            None
        );
        assert_eq!(
            simulation.state().value_for(LifecycleStageKey::ModelTraining),
            Some(0.0)
        );
    }

    #[test]
    fn clear_stops_tracking() {
        let mut simulation = DynamicSimulation::new();
        simulation.bind(&record_with_dynamic_stage("svc-1", LifecycleStageKey::ModelOperation));
        simulation.clear();
        assert_eq!(simulation.bound_service_id(), None);
        assert!(simulation.state().is_empty());
    }
}
