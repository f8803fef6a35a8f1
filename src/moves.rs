use crate::errors::{ConstructionError, ConstructionResult};
use schema::{ElementType, MoveTemplate};
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_MOVE_POWER: u16 = 40;
const DEFAULT_TYPED_MOVE_POWER: u16 = 50;

/// An attack definition. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MoveTemplate", into = "MoveTemplate")]
pub struct Move {
    name: String,
    move_type: ElementType,
    power: u16,
    accuracy: u8,
}

impl Move {
    /// Create a move, rejecting an empty name or an accuracy above 100.
    pub fn new(
        name: impl Into<String>,
        move_type: ElementType,
        power: u16,
        accuracy: u8,
    ) -> ConstructionResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        if accuracy > 100 {
            return Err(ConstructionError::InvalidAccuracy(accuracy));
        }

        Ok(Self {
            name,
            move_type,
            power,
            accuracy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn move_type(&self) -> ElementType {
        self.move_type
    }

    pub fn power(&self) -> u16 {
        self.power
    }

    /// Hit chance as a percentage.
    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    /// Tackle plus, for non-normal creatures, a move of the primary type.
    pub fn default_moveset(primary_type: Option<ElementType>) -> Vec<Move> {
        let mut moves = vec![Move {
            name: "Tackle".to_string(),
            move_type: ElementType::Normal,
            power: DEFAULT_MOVE_POWER,
            accuracy: 100,
        }];

        if let Some(element) = primary_type.filter(|t| *t != ElementType::Normal) {
            moves.push(Move {
                name: format!("{} Attack", element.title()),
                move_type: element,
                power: DEFAULT_TYPED_MOVE_POWER,
                accuracy: 100,
            });
        }

        moves
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, power {}, accuracy {})",
            self.name, self.move_type, self.power, self.accuracy
        )
    }
}

impl TryFrom<MoveTemplate> for Move {
    type Error = ConstructionError;

    fn try_from(template: MoveTemplate) -> Result<Self, Self::Error> {
        Move::new(
            template.name,
            template.move_type,
            template.power,
            template.accuracy,
        )
    }
}

impl From<Move> for MoveTemplate {
    fn from(move_: Move) -> Self {
        MoveTemplate {
            name: move_.name,
            move_type: move_.move_type,
            power: move_.power,
            accuracy: move_.accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_move() {
        let thunderbolt = Move::new("Thunderbolt", ElementType::Electric, 90, 100).unwrap();
        assert_eq!(thunderbolt.name(), "Thunderbolt");
        assert_eq!(thunderbolt.move_type(), ElementType::Electric);
        assert_eq!(thunderbolt.power(), 90);
        assert_eq!(thunderbolt.accuracy(), 100);
    }

    #[test]
    fn test_accuracy_bounds() {
        assert!(Move::new("Sure Miss", ElementType::Normal, 10, 0).is_ok());
        assert!(Move::new("Sure Hit", ElementType::Normal, 10, 100).is_ok());
        assert_eq!(
            Move::new("Wild Swing", ElementType::Normal, 10, 101),
            Err(ConstructionError::InvalidAccuracy(101))
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            Move::new("", ElementType::Fire, 40, 100),
            Err(ConstructionError::EmptyName)
        );
        assert_eq!(
            Move::new("   ", ElementType::Fire, 40, 100),
            Err(ConstructionError::EmptyName)
        );
    }

    #[test]
    fn test_default_moveset() {
        let normal = Move::default_moveset(Some(ElementType::Normal));
        assert_eq!(normal.len(), 1);
        assert_eq!(normal[0].name(), "Tackle");

        let fire = Move::default_moveset(Some(ElementType::Fire));
        assert_eq!(fire.len(), 2);
        assert_eq!(fire[1].name(), "Fire Attack");
        assert_eq!(fire[1].move_type(), ElementType::Fire);
        assert_eq!(fire[1].power(), 50);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Move = serde_json::from_str(
            r#"{"name": "Ember", "move_type": "fire", "power": 40, "accuracy": 100}"#,
        )
        .unwrap();
        assert_eq!(ok.name(), "Ember");

        let defaulted: Move =
            serde_json::from_str(r#"{"name": "Ember", "move_type": "fire", "power": 40}"#)
                .unwrap();
        assert_eq!(defaulted.accuracy(), 100);

        let bad: Result<Move, _> = serde_json::from_str(
            r#"{"name": "Ember", "move_type": "fire", "power": 40, "accuracy": 150}"#,
        );
        assert!(bad.is_err());
    }
}
