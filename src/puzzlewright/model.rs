//! # Domain Model: Puzzle Documents
//!
//! This module defines the core data structures: [`Puzzle`], [`PuzzleStep`],
//! and [`Outcome`]. A puzzle document is one puzzle, its step list (or
//! checklist), and exactly one outcome.
//!
//! ## Identity
//!
//! Ids are v4 UUIDs rendered to strings, assigned once at creation and never
//! regenerated afterwards. A puzzle's id is also its key in the document
//! store. Step ids are only required to be unique within their owning
//! puzzle; the validation pass reports collisions but nothing here prevents
//! a host from writing one.
//!
//! ## Wire Format
//!
//! The serde renames on these structs are a stable contract: exported JSON
//! uses `puzzleID`, `puzzleName`, `logicType`, `steps`, `checklistItems`,
//! and `outcome` (and the corresponding nested names) and must keep doing so
//! across versions, since exported files round-trip back in through
//! [`crate::codec`]. Enums serialize as their variant names. Fields absent
//! from incoming JSON fall back to the documented defaults rather than
//! failing the decode.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Selects which collection of a [`Puzzle`] is authoritative.
///
/// The other collection may be non-empty but is ignored (and not validated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicType {
    StepBased,
    Checklist,
}

impl Default for LogicType {
    fn default() -> Self {
        Self::StepBased
    }
}

/// What kind of interactable a step expects to be satisfied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractableType {
    Trigger,
    Key,
    Clue,
}

impl Default for InteractableType {
    fn default() -> Self {
        Self::Trigger
    }
}

fn default_true() -> bool {
    true
}

/// One entry in a step-based puzzle. Owned by its puzzle; no independent
/// lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleStep {
    #[serde(rename = "stepID", default)]
    pub id: String,

    #[serde(rename = "stepDescription", default)]
    pub description: String,

    /// External item/clue reference. Opaque to this library; may be empty.
    #[serde(rename = "requiredObjectID", default)]
    pub required_object_id: String,

    /// External interactable reference. Opaque; may be empty.
    #[serde(rename = "interactableID", default)]
    pub interactable_id: String,

    #[serde(rename = "expectedType", default)]
    pub expected_type: InteractableType,

    /// If false, the step must be satisfied before the outcome can occur
    /// (enforced by the game runtime, not here).
    #[serde(rename = "isOptional", default)]
    pub is_optional: bool,

    /// If false, the step may complete in any order relative to siblings.
    #[serde(rename = "requiresSequence", default = "default_true")]
    pub requires_sequence: bool,
}

impl PuzzleStep {
    /// A fresh step with a generated unique id and default field values.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: String::new(),
            required_object_id: String::new(),
            interactable_id: String::new(),
            expected_type: InteractableType::default(),
            is_optional: false,
            requires_sequence: true,
        }
    }
}

impl Default for PuzzleStep {
    fn default() -> Self {
        Self::new()
    }
}

/// The single result of solving a puzzle. Exactly one per puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(rename = "outcomeID", default)]
    pub id: String,

    #[serde(rename = "outcomeName", default)]
    pub name: String,

    #[serde(rename = "outcomeDescription", default)]
    pub description: String,

    #[serde(rename = "unlocksPath", default)]
    pub unlocks_path: bool,

    /// Door/path that gets enabled. Meaningful only if `unlocks_path`.
    #[serde(rename = "pathIDToUnlock", default)]
    pub path_id_to_unlock: String,

    #[serde(rename = "givesReward", default)]
    pub gives_reward: bool,

    /// Reward item reference. Meaningful only if `gives_reward`.
    #[serde(rename = "rewardItemID", default)]
    pub reward_item_id: String,

    /// Whether this outcome finishes the puzzle.
    #[serde(rename = "endsPuzzle", default = "default_true")]
    pub ends_puzzle: bool,
}

impl Outcome {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            description: String::new(),
            unlocks_path: false,
            path_id_to_unlock: String::new(),
            gives_reward: false,
            reward_item_id: String::new(),
            ends_puzzle: true,
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    #[serde(rename = "puzzleID", default)]
    pub id: String,

    #[serde(rename = "puzzleName", default)]
    pub name: String,

    #[serde(rename = "logicType", default)]
    pub logic_type: LogicType,

    /// Ordered; meaningful only when `logic_type == StepBased`.
    #[serde(default)]
    pub steps: Vec<PuzzleStep>,

    /// Ordered; meaningful only when `logic_type == Checklist`.
    #[serde(rename = "checklistItems", default)]
    pub checklist_items: Vec<String>,

    #[serde(default = "Outcome::new")]
    pub outcome: Outcome,
}

impl Puzzle {
    /// A fresh step-based puzzle with a generated id and a default outcome.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            logic_type: LogicType::StepBased,
            steps: Vec::new(),
            checklist_items: Vec::new(),
            outcome: Outcome::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_puzzle_defaults() {
        let puzzle = Puzzle::new("Cellar Door");
        assert!(!puzzle.id.is_empty());
        assert_eq!(puzzle.name, "Cellar Door");
        assert_eq!(puzzle.logic_type, LogicType::StepBased);
        assert!(puzzle.steps.is_empty());
        assert!(puzzle.checklist_items.is_empty());
        assert!(!puzzle.outcome.id.is_empty());
        assert!(puzzle.outcome.ends_puzzle);
    }

    #[test]
    fn test_new_step_defaults() {
        let step = PuzzleStep::new();
        assert!(!step.id.is_empty());
        assert!(step.description.is_empty());
        assert_eq!(step.expected_type, InteractableType::Trigger);
        assert!(!step.is_optional);
        assert!(step.requires_sequence);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PuzzleStep::new();
        let b = PuzzleStep::new();
        assert_ne!(a.id, b.id);

        let p = Puzzle::new("A");
        let q = Puzzle::new("A");
        assert_ne!(p.id, q.id);
    }

    #[test]
    fn test_wire_field_names() {
        let puzzle = Puzzle::new("Wire");
        let json = serde_json::to_string(&puzzle).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("puzzleID").is_some());
        assert!(value.get("puzzleName").is_some());
        assert!(value.get("logicType").is_some());
        assert!(value.get("steps").is_some());
        assert!(value.get("checklistItems").is_some());
        assert!(value.get("outcome").is_some());
        // Rust field spellings must not leak into the wire format
        assert!(value.get("id").is_none());
        assert!(value.get("logic_type").is_none());
    }

    #[test]
    fn test_enum_variants_serialize_as_strings() {
        let json = serde_json::to_string(&LogicType::Checklist).unwrap();
        assert_eq!(json, "\"Checklist\"");
        let json = serde_json::to_string(&InteractableType::Clue).unwrap();
        assert_eq!(json, "\"Clue\"");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        // Sparse document, as an older exporter might have written it
        let json = r#"{
            "puzzleID": "p-1",
            "puzzleName": "Sparse",
            "logicType": "StepBased",
            "steps": [{ "stepID": "s-1" }]
        }"#;

        let puzzle: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.steps.len(), 1);
        assert!(puzzle.steps[0].requires_sequence);
        assert!(!puzzle.steps[0].is_optional);
        assert_eq!(puzzle.steps[0].expected_type, InteractableType::Trigger);
        assert!(puzzle.outcome.ends_puzzle);
        assert!(puzzle.checklist_items.is_empty());
    }

    #[test]
    fn test_step_serialization_roundtrip() {
        let mut step = PuzzleStep::new();
        step.description = "Pull the lever".to_string();
        step.required_object_id = "item-lever".to_string();
        step.interactable_id = "int-042".to_string();
        step.expected_type = InteractableType::Key;
        step.is_optional = true;
        step.requires_sequence = false;

        let json = serde_json::to_string(&step).unwrap();
        let loaded: PuzzleStep = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, step);
    }
}
