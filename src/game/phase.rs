//! Interaction phase state machine.
//!
//! ```text
//! Selection --own--> MultiSelection --own (toggle)--> MultiSelection
//!     ^                    |   \--last deselected--> Selection
//!     |                    \--non-own--> Attack --non-own--> Attack (retarget)
//!     \---- attack executed / selection cleared ----/
//! ```
//!
//! `GameOver` and `LevelComplete` are terminal for the level; every click
//! is ignored there.

use serde::Serialize;

use crate::game::PlanetId;

/// Interaction phase of the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Nothing selected.
    #[default]
    Selection,
    /// One or more own planets selected.
    MultiSelection,
    /// Sources selected and a target chosen.
    Attack,
    /// An AI is the only player left.
    GameOver,
    /// The human is the only player left.
    LevelComplete,
}

impl Phase {
    /// Check whether the level has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::LevelComplete)
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEffect {
    /// Nothing changed.
    Ignored,
    /// An own planet joined the selection.
    Selected,
    /// An own planet left the selection.
    Deselected,
    /// A target was chosen.
    Targeted,
}

/// The human's selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    phase: Phase,
    selected: Vec<PlanetId>,
    target: Option<PlanetId>,
}

impl Interaction {
    /// Start in `Selection` with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Selected source planets in click order.
    #[must_use]
    pub fn selected(&self) -> &[PlanetId] {
        &self.selected
    }

    /// Chosen target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<PlanetId> {
        self.target
    }

    /// Apply a click on `planet`. `own` says whether the clicker owns it.
    pub fn click(&mut self, planet: PlanetId, own: bool) -> ClickEffect {
        match (self.phase, own) {
            (Phase::Selection, true) => {
                self.selected = vec![planet];
                self.phase = Phase::MultiSelection;
                ClickEffect::Selected
            }
            (Phase::MultiSelection, true) => {
                if let Some(pos) = self.selected.iter().position(|&id| id == planet) {
                    self.selected.remove(pos);
                    if self.selected.is_empty() {
                        self.phase = Phase::Selection;
                    }
                    ClickEffect::Deselected
                } else {
                    self.selected.push(planet);
                    ClickEffect::Selected
                }
            }
            (Phase::MultiSelection | Phase::Attack, false) if !self.selected.is_empty() => {
                self.target = Some(planet);
                self.phase = Phase::Attack;
                ClickEffect::Targeted
            }
            _ => ClickEffect::Ignored,
        }
    }

    /// Drop the selection and target. Has no effect once the level ended.
    pub fn clear(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.selected.clear();
        self.target = None;
        self.phase = Phase::Selection;
    }

    /// The pending attack order, if a target is chosen.
    #[must_use]
    pub fn order(&self) -> Option<(&[PlanetId], PlanetId)> {
        match (self.phase, self.target) {
            (Phase::Attack, Some(target)) => Some((&self.selected, target)),
            _ => None,
        }
    }

    /// Enter a terminal phase, discarding any selection.
    pub fn finish(&mut self, level_complete: bool) {
        self.selected.clear();
        self.target = None;
        self.phase = if level_complete {
            Phase::LevelComplete
        } else {
            Phase::GameOver
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_toggle_and_back() {
        let mut ui = Interaction::new();
        assert_eq!(ui.click(3, true), ClickEffect::Selected);
        assert_eq!(ui.phase(), Phase::MultiSelection);
        assert_eq!(ui.click(5, true), ClickEffect::Selected);
        assert_eq!(ui.selected(), &[3, 5]);

        assert_eq!(ui.click(3, true), ClickEffect::Deselected);
        assert_eq!(ui.phase(), Phase::MultiSelection);
        assert_eq!(ui.click(5, true), ClickEffect::Deselected);
        assert_eq!(ui.phase(), Phase::Selection);
        assert!(ui.selected().is_empty());
    }

    #[test]
    fn test_non_own_without_selection_is_ignored() {
        let mut ui = Interaction::new();
        assert_eq!(ui.click(2, false), ClickEffect::Ignored);
        assert_eq!(ui.phase(), Phase::Selection);
        assert_eq!(ui.target(), None);
    }

    #[test]
    fn test_target_and_retarget() {
        let mut ui = Interaction::new();
        ui.click(0, true);
        assert_eq!(ui.click(4, false), ClickEffect::Targeted);
        assert_eq!(ui.phase(), Phase::Attack);
        assert_eq!(ui.click(6, false), ClickEffect::Targeted);
        assert_eq!(ui.target(), Some(6));

        // Own planets are ignored once a target is chosen
        assert_eq!(ui.click(1, true), ClickEffect::Ignored);
        assert_eq!(ui.selected(), &[0]);
    }

    #[test]
    fn test_order_needs_target() {
        let mut ui = Interaction::new();
        ui.click(0, true);
        ui.click(1, true);
        assert_eq!(ui.order(), None);
        ui.click(7, false);

        let expected: &[PlanetId] = &[0, 1];
        assert_eq!(ui.order(), Some((expected, 7)));
    }

    #[test]
    fn test_clear() {
        let mut ui = Interaction::new();
        ui.click(0, true);
        ui.click(7, false);
        ui.clear();
        assert_eq!(ui, Interaction::new());
    }

    #[test]
    fn test_terminal_phases_ignore_input() {
        let mut ui = Interaction::new();
        ui.click(0, true);
        ui.finish(true);
        assert_eq!(ui.phase(), Phase::LevelComplete);
        assert!(ui.selected().is_empty());

        assert_eq!(ui.click(0, true), ClickEffect::Ignored);
        ui.clear();
        assert_eq!(ui.phase(), Phase::LevelComplete);
        assert!(ui.phase().is_terminal());
    }
}
