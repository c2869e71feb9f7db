use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::Serialize;
use std::fmt;

/// How a single lifecycle stage's CO2 value is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculationMode {
    None,
    Approximation,
    Dynamic,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::None => "none",
            CalculationMode::Approximation => "approximation",
            CalculationMode::Dynamic => "dynamic",
        }
    }
}

/// Per-stage impact configuration, discriminated on the wire by
/// `impactCalculationMode`.
///
/// A `dynamic` stage carries no numeric value of its own: the number is
/// produced by the value simulation at evaluation time and is never part
/// of the persisted record.
#[derive(Clone, PartialEq, Serialize, Default)]
#[serde(tag = "impactCalculationMode", rename_all = "camelCase")]
pub enum ImpactConfig {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    Approximation { co2_eq_in_kg: f64 },
    #[serde(rename_all = "camelCase")]
    Dynamic { http_api_url: String, token: String },
}

impl ImpactConfig {
    pub fn mode(&self) -> CalculationMode {
        match self {
            ImpactConfig::None => CalculationMode::None,
            ImpactConfig::Approximation { .. } => CalculationMode::Approximation,
            ImpactConfig::Dynamic { .. } => CalculationMode::Dynamic,
        }
    }
}

// The token is a credential: keep it out of debug output and log lines.
impl fmt::Debug for ImpactConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactConfig::None => f.write_str("None"),
            ImpactConfig::Approximation { co2_eq_in_kg } => f
                .debug_struct("Approximation")
                .field("co2_eq_in_kg", co2_eq_in_kg)
                .finish(),
            ImpactConfig::Dynamic { http_api_url, .. } => f
                .debug_struct("Dynamic")
                .field("http_api_url", http_api_url)
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Strict intermediate form for deserialization.
///
/// Serde's `deny_unknown_fields` does not compose with internally tagged
/// enums, so stage configs are read into this flat struct first and the
/// mode-specific field rules are checked by hand.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawImpactConfig {
    impact_calculation_mode: CalculationMode,
    co2_eq_in_kg: Option<f64>,
    http_api_url: Option<String>,
    token: Option<String>,
}

impl<'de> Deserialize<'de> for ImpactConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawImpactConfig::deserialize(deserializer)?;

        fn reject_field<E: DeError>(mode: CalculationMode, field: &str) -> E {
            E::custom(format!(
                "field `{}` is not allowed when impactCalculationMode is `{}`",
                field,
                mode.as_str()
            ))
        }
        fn require_field<E: DeError, T>(
            value: Option<T>,
            mode: CalculationMode,
            field: &str,
        ) -> Result<T, E> {
            value.ok_or_else(|| {
                E::custom(format!(
                    "field `{}` is required when impactCalculationMode is `{}`",
                    field,
                    mode.as_str()
                ))
            })
        }

        let mode = raw.impact_calculation_mode;
        match mode {
            CalculationMode::None => {
                if raw.co2_eq_in_kg.is_some() {
                    return Err(reject_field(mode, "co2EqInKg"));
                }
                if raw.http_api_url.is_some() {
                    return Err(reject_field(mode, "httpApiUrl"));
                }
                if raw.token.is_some() {
                    return Err(reject_field(mode, "token"));
                }
                Ok(ImpactConfig::None)
            }
            CalculationMode::Approximation => {
                if raw.http_api_url.is_some() {
                    return Err(reject_field(mode, "httpApiUrl"));
                }
                if raw.token.is_some() {
                    return Err(reject_field(mode, "token"));
                }
                let co2_eq_in_kg = require_field(raw.co2_eq_in_kg, mode, "co2EqInKg")?;
                Ok(ImpactConfig::Approximation { co2_eq_in_kg })
            }
            CalculationMode::Dynamic => {
                if raw.co2_eq_in_kg.is_some() {
                    return Err(reject_field(mode, "co2EqInKg"));
                }
                let http_api_url = require_field(raw.http_api_url, mode, "httpApiUrl")?;
                let token = require_field(raw.token, mode, "token")?;
                Ok(ImpactConfig::Dynamic { http_api_url, token })
            }
        }
    }
}
