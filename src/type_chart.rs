//! Type effectiveness lookup shared read-only by every battle.

use crate::errors::{ConstructionError, ConstructionResult};
use schema::ElementType;
use std::collections::HashMap;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::warn;

/// Raw configuration shape: attacking type name -> defending type name -> multiplier.
pub type TypeTable = HashMap<String, HashMap<String, f64>>;

const ALLOWED_MULTIPLIERS: [f64; 4] = [0.0, 0.5, 1.0, 2.0];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeChart {
    chart: HashMap<(ElementType, ElementType), f64>,
}

impl TypeChart {
    /// A chart with no entries; every lookup is neutral.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The canonical 18x18 chart.
    pub fn standard() -> Self {
        let mut chart = HashMap::with_capacity(ElementType::COUNT * ElementType::COUNT);
        for attacking in ElementType::iter() {
            for defending in ElementType::iter() {
                chart.insert(
                    (attacking, defending),
                    ElementType::type_effectiveness(attacking, defending),
                );
            }
        }
        Self { chart }
    }

    /// Build a chart from a configuration table. Type names are matched
    /// case-insensitively; names outside the closed type set are skipped.
    pub fn from_table(table: &TypeTable) -> ConstructionResult<Self> {
        let mut chart = HashMap::new();

        for (attacking_name, row) in table {
            let Ok(attacking) = ElementType::from_str(attacking_name) else {
                warn!(type_name = %attacking_name, "skipping unknown attacking type in type chart");
                continue;
            };

            for (defending_name, &value) in row {
                let Ok(defending) = ElementType::from_str(defending_name) else {
                    warn!(type_name = %defending_name, "skipping unknown defending type in type chart");
                    continue;
                };

                if !ALLOWED_MULTIPLIERS.contains(&value) {
                    return Err(ConstructionError::InvalidMultiplier {
                        attacking: attacking_name.clone(),
                        defending: defending_name.clone(),
                        value,
                    });
                }

                chart.insert((attacking, defending), value);
            }
        }

        Ok(Self { chart })
    }

    /// Parse a JSON table (`{"fire": {"grass": 2.0, ...}, ...}`).
    pub fn from_json_str(json: &str) -> ConstructionResult<Self> {
        let table: TypeTable = serde_json::from_str(json)
            .map_err(|e| ConstructionError::MalformedData(e.to_string()))?;
        Self::from_table(&table)
    }

    pub fn multiplier(&self, attacking: ElementType, defending: ElementType) -> f64 {
        self.chart
            .get(&(attacking, defending))
            .copied()
            .unwrap_or(1.0)
    }

    /// Lookup by type name. Unknown names resolve to neutral.
    pub fn multiplier_by_name(&self, attacking: &str, defending: &str) -> f64 {
        match (
            ElementType::from_str(attacking),
            ElementType::from_str(defending),
        ) {
            (Ok(attacking), Ok(defending)) => self.multiplier(attacking, defending),
            _ => 1.0,
        }
    }

    /// Product of the per-type multipliers against every defending type.
    pub fn combined_multiplier(&self, attacking: ElementType, defending: &[ElementType]) -> f64 {
        defending
            .iter()
            .map(|&defending_type| self.multiplier(attacking, defending_type))
            .product()
    }

    pub fn len(&self) -> usize {
        self.chart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chart.is_empty()
    }
}
