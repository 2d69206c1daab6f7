//! Reorder Engine
//!
//! Keeps the component rows of a process ordered by weight and computes the
//! weight to submit after a drag-and-drop move. A moved row takes the
//! midpoint between its new neighbors, so no other row is renumbered.
//!
//! The list is a transient, optimistic copy: the backend stays authoritative
//! and the view is reloaded after every submitted step.

use leptos_dragdrop::DropTarget;

use crate::models::{ComponentRow, Weight};

/// Weight change produced by a move, as sent to `editstep`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reweight {
    pub old_weight: Weight,
    pub new_weight: Weight,
}

/// Component rows in ascending weight order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedRowList {
    rows: Vec<ComponentRow>,
}

impl OrderedRowList {
    /// Build from a backend snapshot. Rows are sorted by weight; equal
    /// weights keep their snapshot order.
    pub fn from_snapshot(mut rows: Vec<ComponentRow>) -> Self {
        rows.sort_by(|a, b| a.weight.0.total_cmp(&b.weight.0));
        Self { rows }
    }

    pub fn rows(&self) -> &[ComponentRow] {
        &self.rows
    }

    pub fn weights(&self) -> Vec<Weight> {
        self.rows.iter().map(|r| r.weight).collect()
    }

    /// Index of the first row carrying `weight`
    pub fn position(&self, weight: Weight) -> Option<usize> {
        self.rows.iter().position(|r| r.weight == weight)
    }

    /// True when weights are strictly increasing
    pub fn is_strictly_ordered(&self) -> bool {
        self.rows.windows(2).all(|pair| pair[0].weight < pair[1].weight)
    }

    /// Move the row `dragged` after `target` (or to the front) and give it a
    /// new weight between its new neighbors.
    ///
    /// Returns `None` when nothing moves: unknown rows, dropping a row on
    /// itself, or dropping it where it already is.
    pub fn move_row(&mut self, dragged: Weight, target: DropTarget<Weight>) -> Option<Reweight> {
        let from = self.position(dragged)?;

        let to = match target {
            DropTarget::Front => 0,
            DropTarget::After(anchor) => {
                if anchor == dragged {
                    return None;
                }
                let anchor_index = self.position(anchor)?;
                // Index after removal of the dragged row
                if anchor_index < from { anchor_index + 1 } else { anchor_index }
            }
        };

        if to == from {
            return None;
        }

        let row = self.rows.remove(from);
        self.rows.insert(to, row);

        let new_weight = self.midpoint_weight(to);
        self.rows[to].weight = new_weight;

        Some(Reweight {
            old_weight: dragged,
            new_weight,
        })
    }

    /// Midpoint weight for the row at `index`, from its current neighbors.
    ///
    /// Without a previous neighbor the row's own (old) weight is the floor;
    /// without a next neighbor the ceiling is one above the floor. When the
    /// floor equals the ceiling the result duplicates that weight.
    fn midpoint_weight(&self, index: usize) -> Weight {
        let own = self.rows[index].weight.0;
        let low = index
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(|r| r.weight.0)
            .unwrap_or(own);
        let high = self
            .rows
            .get(index + 1)
            .map(|r| r.weight.0)
            .unwrap_or(low + 1.0);

        let weight = low + (high - low) / 2.0;
        if !(low < weight && weight < high) {
            tracing::warn!(low, high, weight, "[REORDER] recomputed weight is not between its neighbors");
        }
        Weight(weight)
    }

    /// Weight for a row appended after the last one
    pub fn next_insert_weight(&self) -> Weight {
        match self.rows.last() {
            Some(last) => Weight(last.weight.0 + 1.0),
            None => Weight(1.0),
        }
    }

    /// Append a row, assigning it the next weight. Returns that weight.
    pub fn insert(&mut self, mut row: ComponentRow) -> Weight {
        let weight = self.next_insert_weight();
        row.weight = weight;
        self.rows.push(row);
        weight
    }

    /// Remove the row carrying `weight`. Other weights are left untouched.
    pub fn delete(&mut self, weight: Weight) -> Option<ComponentRow> {
        let index = self.position(weight)?;
        Some(self.rows.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(weight: f64, name: &str) -> ComponentRow {
        ComponentRow {
            weight: Weight(weight),
            uid: None,
            name: name.to_string(),
            category: "saas".to_string(),
        }
    }

    fn list(weights: &[f64]) -> OrderedRowList {
        OrderedRowList::from_snapshot(
            weights.iter().enumerate().map(|(i, w)| row(*w, &format!("C{}", i))).collect(),
        )
    }

    fn values(list: &OrderedRowList) -> Vec<f64> {
        list.weights().into_iter().map(Weight::value).collect()
    }

    #[test]
    fn test_snapshot_is_sorted_by_weight() {
        let l = OrderedRowList::from_snapshot(vec![row(3.0, "c"), row(1.0, "a"), row(2.0, "b")]);
        let names: Vec<_> = l.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(l.is_strictly_ordered());
    }

    #[test]
    fn test_move_down_takes_midpoint() {
        let mut l = list(&[1.0, 2.0, 3.0, 4.0]);
        let change = l.move_row(Weight(1.0), DropTarget::After(Weight(3.0))).unwrap();
        assert_eq!(change.old_weight, Weight(1.0));
        assert_eq!(change.new_weight, Weight(3.5));
        assert_eq!(values(&l), vec![2.0, 3.0, 3.5, 4.0]);
        assert!(l.is_strictly_ordered());
    }

    #[test]
    fn test_move_up_takes_midpoint() {
        let mut l = list(&[1.0, 2.0, 3.0, 4.0]);
        let change = l.move_row(Weight(4.0), DropTarget::After(Weight(1.0))).unwrap();
        assert_eq!(change.new_weight, Weight(1.5));
        assert_eq!(values(&l), vec![1.0, 1.5, 2.0, 3.0]);
    }

    #[test]
    fn test_move_to_end_uses_ceiling_one_above_previous() {
        let mut l = list(&[1.0, 2.0, 3.0]);
        let change = l.move_row(Weight(1.0), DropTarget::After(Weight(3.0))).unwrap();
        // low = 3, high = 3 + 1
        assert_eq!(change.new_weight, Weight(3.5));
        assert_eq!(values(&l), vec![2.0, 3.0, 3.5]);
        assert!(l.is_strictly_ordered());
    }

    #[test]
    fn test_moves_keep_order_between_neighbors() {
        let mut l = list(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let moves = [(5.0, 1.0), (1.0, 3.0), (2.0, 4.0)];
        for (dragged, anchor) in moves {
            l.move_row(Weight(dragged), DropTarget::After(Weight(anchor))).unwrap();
            assert!(l.is_strictly_ordered(), "order broken: {:?}", values(&l));
        }
    }

    #[test]
    fn test_only_the_moved_row_changes_weight() {
        let mut l = list(&[1.0, 2.0, 3.0, 4.0]);
        l.move_row(Weight(2.0), DropTarget::After(Weight(4.0))).unwrap();
        let untouched: Vec<_> = l.rows().iter().filter(|r| r.name != "C1").map(|r| r.weight.0).collect();
        assert_eq!(untouched, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_move_to_front_lands_between_old_weight_and_first() {
        // No previous neighbor: low falls back to the row's own old weight.
        let mut l = list(&[1.0, 3.0]);
        let change = l.move_row(Weight(3.0), DropTarget::Front).unwrap();
        assert_eq!(change.new_weight, Weight(2.0));
        assert_eq!(values(&l), vec![2.0, 1.0]);
        assert!(!l.is_strictly_ordered());
    }

    #[test]
    fn test_front_move_can_duplicate_an_untouched_weight() {
        // low = 3 (own weight), high = 1 (new next neighbor) -> 2, which
        // the row that stayed in place already carries
        let mut l = list(&[1.0, 2.0, 3.0]);
        let change = l.move_row(Weight(3.0), DropTarget::Front).unwrap();
        assert_eq!(change.old_weight, Weight(3.0));
        assert_eq!(change.new_weight, Weight(2.0));
        assert_eq!(values(&l), vec![2.0, 1.0, 2.0]);
        assert!(!l.is_strictly_ordered());
    }

    #[test]
    fn test_equal_neighbors_duplicate_weight() {
        // A snapshot that already holds a duplicate: low == high, so the
        // moved row lands on that same weight.
        let mut l = list(&[1.0, 3.0, 3.0]);
        let change = l.move_row(Weight(1.0), DropTarget::After(Weight(3.0))).unwrap();
        assert_eq!(change.new_weight, Weight(3.0));
        assert_eq!(values(&l), vec![3.0, 3.0, 3.0]);
        assert!(!l.is_strictly_ordered());
    }

    #[test]
    fn test_drop_in_place_is_noop() {
        let mut l = list(&[1.0, 2.0, 3.0]);
        assert_eq!(l.move_row(Weight(2.0), DropTarget::After(Weight(2.0))), None);
        assert_eq!(l.move_row(Weight(2.0), DropTarget::After(Weight(1.0))), None);
        assert_eq!(l.move_row(Weight(1.0), DropTarget::Front), None);
        assert_eq!(values(&l), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_unknown_rows_are_ignored() {
        let mut l = list(&[1.0, 2.0]);
        assert_eq!(l.move_row(Weight(9.0), DropTarget::Front), None);
        assert_eq!(l.move_row(Weight(1.0), DropTarget::After(Weight(9.0))), None);
        assert_eq!(values(&l), vec![1.0, 2.0]);
    }

    #[test]
    fn test_insert_into_empty_list_uses_one() {
        let mut l = OrderedRowList::default();
        assert_eq!(l.insert(row(0.0, "first")), Weight(1.0));
        assert_eq!(values(&l), vec![1.0]);
    }

    #[test]
    fn test_insert_appends_last_plus_one() {
        let mut l = list(&[1.0, 2.5]);
        assert_eq!(l.next_insert_weight(), Weight(3.5));
        assert_eq!(l.insert(row(0.0, "new")), Weight(3.5));
        assert_eq!(l.rows().last().map(|r| r.name.as_str()), Some("new"));
        assert!(l.is_strictly_ordered());
    }

    #[test]
    fn test_delete_removes_exactly_one_row() {
        let mut l = list(&[1.0, 1.5, 2.0, 3.0]);
        let removed = l.delete(Weight(1.5)).unwrap();
        assert_eq!(removed.name, "C1");
        assert_eq!(values(&l), vec![1.0, 2.0, 3.0]);
        assert_eq!(l.delete(Weight(1.5)), None);
        assert_eq!(l.rows().len(), 3);
    }

    /// Strictly increasing weights in half steps
    fn ordered_weights() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(1u32..20, 2..12).prop_map(|steps| {
            steps
                .iter()
                .scan(0.0, |acc, step| {
                    *acc += f64::from(*step) / 2.0;
                    Some(*acc)
                })
                .collect()
        })
    }

    proptest! {
        /// Dropping a row after any other row keeps strict order and only
        /// reweights the dragged row
        #[test]
        fn prop_move_after_keeps_order(
            weights in ordered_weights(),
            dragged in any::<prop::sample::Index>(),
            anchor in any::<prop::sample::Index>(),
        ) {
            let dragged = weights[dragged.index(weights.len())];
            let anchor = weights[anchor.index(weights.len())];
            let before = list(&weights);
            let mut l = before.clone();

            match l.move_row(Weight(dragged), DropTarget::After(Weight(anchor))) {
                Some(change) => {
                    prop_assert!(l.is_strictly_ordered(), "order broken: {:?}", values(&l));
                    prop_assert_eq!(change.old_weight, Weight(dragged));
                    for r in l.rows() {
                        let original = before.rows().iter().find(|b| b.name == r.name).unwrap();
                        if original.weight != Weight(dragged) {
                            prop_assert_eq!(r.weight, original.weight);
                        }
                    }
                }
                None => prop_assert_eq!(l, before),
            }
        }
    }
}
