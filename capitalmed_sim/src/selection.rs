// Click-to-select building highlighting.
//
// At most one building is selected at a time. Clicking a building selects
// it, clicking the selected building again deselects it, and clicking a
// different building moves the selection. Ids not in the catalog are ignored.
// Selection is independent of navigation, except that starting a navigation
// clears it (handled by `CampusState`).

use crate::catalog::Catalog;
use crate::types::BuildingId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<BuildingId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<BuildingId> {
        self.selected
    }

    pub fn is_selected(&self, id: BuildingId) -> bool {
        self.selected == Some(id)
    }

    /// Toggle selection of `id`. Returns `true` if the selection changed.
    pub fn click(&mut self, id: BuildingId, catalog: &Catalog) -> bool {
        if catalog.find_building(id).is_none() {
            return false;
        }
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        true
    }

    /// Clear the selection. Returns `true` if something was selected.
    pub fn close(&mut self) -> bool {
        self.selected.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_b_after_a_leaves_only_b() {
        let catalog = Catalog::capitalmed();
        let mut sel = Selection::new();
        assert!(sel.click(BuildingId(3), &catalog));
        assert!(sel.click(BuildingId(9), &catalog));
        assert_eq!(sel.selected(), Some(BuildingId(9)));
        assert!(!sel.is_selected(BuildingId(3)));
    }

    #[test]
    fn clicking_again_deselects() {
        let catalog = Catalog::capitalmed();
        let mut sel = Selection::new();
        sel.click(BuildingId(3), &catalog);
        sel.click(BuildingId(3), &catalog);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let catalog = Catalog::capitalmed();
        let mut sel = Selection::new();
        sel.click(BuildingId(3), &catalog);
        assert!(!sel.click(BuildingId(404), &catalog));
        assert_eq!(sel.selected(), Some(BuildingId(3)));
    }

    #[test]
    fn close_clears() {
        let catalog = Catalog::capitalmed();
        let mut sel = Selection::new();
        assert!(!sel.close());
        sel.click(BuildingId(1), &catalog);
        assert!(sel.close());
        assert_eq!(sel.selected(), None);
    }
}
