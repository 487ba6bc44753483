//! Pure validation pass over a puzzle document.
//!
//! Produces human-readable defect messages in discovery order, without
//! deduplication. Defects are advisory: nothing here stops a host from
//! saving a puzzle that fails validation.

use crate::model::{LogicType, Puzzle};
use std::collections::HashSet;

/// Check a puzzle for authoring defects.
///
/// Rules:
/// - empty puzzle id or name
/// - for step-based puzzles, per step (1-based position): empty step id, or
///   a step id already used earlier in the list. The first occurrence of a
///   duplicated id is not flagged, only the later ones.
///
/// Outcome fields and checklist items are currently unchecked. The pass has
/// no side effects; calling it twice on an unchanged puzzle yields
/// identical output.
pub fn validate(puzzle: &Puzzle) -> Vec<String> {
    let mut defects = Vec::new();

    if puzzle.id.is_empty() {
        defects.push("Puzzle ID is empty.".to_string());
    }

    if puzzle.name.is_empty() {
        defects.push("Puzzle Name is empty.".to_string());
    }

    if puzzle.logic_type == LogicType::StepBased {
        let mut seen = HashSet::new();
        for (i, step) in puzzle.steps.iter().enumerate() {
            if step.id.is_empty() {
                defects.push(format!("Step {} has an empty Step ID.", i + 1));
            } else if !seen.insert(step.id.as_str()) {
                defects.push(format!("Step {} has a duplicate Step ID.", i + 1));
            }
        }
    }

    defects
}
