use serde::{Deserialize, Deserializer, Serialize};

/// One caller-supplied wheel entry, before probabilities are resolved.
///
/// Deserializes from `{ "label": .., "value": .., "chance"?: .. }`. Numeric
/// and boolean values are accepted and kept in their textual form, since the
/// value is an opaque result identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorInput {
    pub label: String,
    #[serde(deserialize_with = "value_as_string")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance: Option<f64>,
}

impl SectorInput {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            chance: None,
        }
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = Some(chance);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn value_as_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawValue::deserialize(de)? {
        RawValue::Text(s) => s,
        RawValue::Int(i) => i.to_string(),
        RawValue::Float(f) => f.to_string(),
        RawValue::Bool(b) => b.to_string(),
    })
}

/// A wheel sector with its resolved probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Ordinal position; also fixes the angular position on the wheel.
    pub index: usize,
    pub label: String,
    pub value: String,
    /// Explicit weight as declared by the caller, if any.
    pub weight: Option<f64>,
    pub probability: f64,
}

/// Resolve per-sector probabilities.
///
/// Explicit weights are kept as-is. Whatever mass is left below 1 is split
/// evenly across the sectors without a weight. Weights that add up to more
/// than 1 are not renormalized; the remainder pool just clamps to 0.
pub fn resolve_sectors(items: &[SectorInput]) -> Vec<Sector> {
    let total_fixed: f64 = items.iter().filter_map(|it| it.chance).sum();
    let unweighted = items.iter().filter(|it| it.chance.is_none()).count();
    let remaining = (1.0 - total_fixed).max(0.0);
    let default_chance = if unweighted > 0 {
        remaining / unweighted as f64
    } else {
        0.0
    };

    items
        .iter()
        .enumerate()
        .map(|(index, it)| Sector {
            index,
            label: it.label.clone(),
            value: it.value.clone(),
            weight: it.chance,
            probability: it.chance.unwrap_or(default_chance),
        })
        .collect()
}

/// True when at least one sector declared an explicit weight.
#[inline]
pub fn has_explicit_weights(sectors: &[Sector]) -> bool {
    sectors.iter().any(|s| s.weight.is_some())
}
