//! The JSON codec for puzzle documents.
//!
//! [`encode`] and [`decode`] are the single wire format used everywhere a
//! puzzle leaves memory: file-store document bodies, exports, and imports.
//! The field names are pinned by the serde renames in [`crate::model`] and
//! must stay stable so previously exported files keep importing.
//!
//! [`decode_into`] exists for the import path: other components may hold a
//! reference to the same logical puzzle, so import overwrites the fields of
//! the existing document rather than handing back a new one. The input is
//! parsed completely before the target is touched, so a malformed document
//! never leaves a half-overwritten puzzle behind.

use crate::error::Result;
use crate::model::Puzzle;

/// Serialize a puzzle to pretty-printed JSON.
pub fn encode(puzzle: &Puzzle) -> Result<String> {
    Ok(serde_json::to_string_pretty(puzzle)?)
}

/// Parse a puzzle from JSON text.
pub fn decode(json: &str) -> Result<Puzzle> {
    Ok(serde_json::from_str(json)?)
}

/// Parse JSON text and overwrite `puzzle`'s fields in place.
pub fn decode_into(json: &str, puzzle: &mut Puzzle) -> Result<()> {
    let parsed: Puzzle = serde_json::from_str(json)?;
    *puzzle = parsed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use crate::model::{InteractableType, LogicType, PuzzleStep};

    fn populated_puzzle() -> Puzzle {
        let mut puzzle = Puzzle::new("Boiler Room");

        let mut full = PuzzleStep::new();
        full.description = "Vent the pressure".to_string();
        full.required_object_id = "item-wrench".to_string();
        full.interactable_id = "int-valve".to_string();
        full.expected_type = InteractableType::Key;
        full.is_optional = true;
        full.requires_sequence = false;
        puzzle.steps.push(full);

        // One step with every optional field left empty
        puzzle.steps.push(PuzzleStep::new());

        puzzle.checklist_items.push("Check the gauge".to_string());

        puzzle.outcome.name = "Pressure released".to_string();
        puzzle.outcome.description = "The door to the furnace opens".to_string();
        puzzle.outcome.unlocks_path = true;
        puzzle.outcome.path_id_to_unlock = "path-furnace".to_string();
        puzzle.outcome.gives_reward = true;
        puzzle.outcome.reward_item_id = "item-medal".to_string();
        puzzle.outcome.ends_puzzle = false;

        puzzle
    }

    #[test]
    fn test_roundtrip_is_lossless() {
        let original = populated_puzzle();
        let json = encode(&original).unwrap();
        let decoded = decode(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_is_pretty_printed() {
        let json = encode(&Puzzle::new("Pretty")).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  \"puzzleID\""));
    }

    #[test]
    fn test_decode_into_overwrites_every_field() {
        let source = populated_puzzle();
        let json = encode(&source).unwrap();

        let mut target = Puzzle::new("Placeholder");
        target.logic_type = LogicType::Checklist;
        target.checklist_items.push("stale".to_string());

        decode_into(&json, &mut target).unwrap();
        assert_eq!(target, source);
    }

    #[test]
    fn test_decode_into_leaves_target_unchanged_on_error() {
        let mut target = populated_puzzle();
        let before = target.clone();

        let err = decode_into("{ not json", &mut target).unwrap_err();
        assert!(matches!(err, PuzzleError::Decode(_)));
        assert_eq!(target, before);
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(
            decode("[1, 2").unwrap_err(),
            PuzzleError::Decode(_)
        ));
    }

    #[test]
    fn test_nested_wire_field_names() {
        let json = encode(&populated_puzzle()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let step = &value["steps"][0];
        for key in [
            "stepID",
            "stepDescription",
            "requiredObjectID",
            "interactableID",
            "expectedType",
            "isOptional",
            "requiresSequence",
        ] {
            assert!(step.get(key).is_some(), "missing step field {}", key);
        }

        let outcome = &value["outcome"];
        for key in [
            "outcomeID",
            "outcomeName",
            "outcomeDescription",
            "unlocksPath",
            "pathIDToUnlock",
            "givesReward",
            "rewardItemID",
            "endsPuzzle",
        ] {
            assert!(outcome.get(key).is_some(), "missing outcome field {}", key);
        }
    }
}
