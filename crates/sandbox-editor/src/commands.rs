//! Undo/Redo history.
//!
//! Every recorded design mutation is an `Edit` that carries enough to
//! replay it in either direction. One user action is one edit; a clear-all
//! is a single edit holding every removed component. Recording a new edit
//! drops the redo stack, and the undo stack keeps at most `max_depth`
//! entries, oldest dropped first.
//!
//! Edits are applied through [`Design`], so the cost ledger follows every
//! undo and redo.

use sandbox_core::{ComponentId, Design, PlacedComponent};

#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Place {
        component: PlacedComponent,
    },
    Remove {
        /// Stacking index the component held.
        index: usize,
        component: PlacedComponent,
    },
    Clear {
        /// Bottom-to-top.
        components: Vec<PlacedComponent>,
    },
    Move {
        id: ComponentId,
        from: (i32, i32),
        to: (i32, i32),
    },
    Rotate {
        id: ComponentId,
        from: i32,
        to: i32,
    },
}

impl Edit {
    pub fn description(&self) -> String {
        match self {
            Edit::Place { component } => format!("place {}", component.kind),
            Edit::Remove { component, .. } => format!("remove {}", component.kind),
            Edit::Clear { components } => format!("clear {} components", components.len()),
            Edit::Move { id, .. } => format!("move {id}"),
            Edit::Rotate { id, .. } => format!("rotate {id}"),
        }
    }

    fn revert(&self, design: &mut Design) {
        match self {
            Edit::Place { component } => {
                design.remove(component.id);
            }
            Edit::Remove { index, component } => {
                design.restore(*index, component.clone());
            }
            Edit::Clear { components } => {
                for (index, c) in components.iter().enumerate() {
                    design.restore(index, c.clone());
                }
            }
            Edit::Move { id, from, .. } => {
                design.move_to(*id, from.0 as f64, from.1 as f64);
            }
            Edit::Rotate { id, from, .. } => {
                design.set_rotation(*id, *from);
            }
        }
    }

    fn reapply(&self, design: &mut Design) {
        match self {
            Edit::Place { component } => {
                design.restore(design.len(), component.clone());
            }
            Edit::Remove { component, .. } => {
                design.remove(component.id);
            }
            Edit::Clear { .. } => {
                design.clear();
            }
            Edit::Move { id, to, .. } => {
                design.move_to(*id, to.0 as f64, to.1 as f64);
            }
            Edit::Rotate { id, to, .. } => {
                design.set_rotation(*id, *to);
            }
        }
    }
}

/// Manages undo/redo stacks.
pub struct CommandStack {
    undo_stack: Vec<Edit>,
    redo_stack: Vec<Edit>,
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(256)),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record an edit that has already been applied.
    pub fn record(&mut self, edit: Edit) {
        if self.max_depth == 0 {
            return;
        }
        self.undo_stack.push(edit);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Revert the most recent edit. Returns it, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self, design: &mut Design) -> Option<Edit> {
        let edit = self.undo_stack.pop()?;
        edit.revert(design);
        log::debug!("undo: {}", edit.description());
        self.redo_stack.push(edit.clone());
        Some(edit)
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self, design: &mut Design) -> Option<Edit> {
        let edit = self.redo_stack.pop()?;
        edit.reapply(design);
        log::debug!("redo: {}", edit.description());
        self.undo_stack.push(edit.clone());
        Some(edit)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn undo_redo_place() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(100);
        let wall = design.place("wall", 0.0, 0.0);
        stack.record(Edit::Place { component: wall.clone() });

        let undone = stack.undo(&mut design).unwrap();
        assert_eq!(undone.description(), "place wall");
        assert!(design.is_empty());
        assert_eq!(design.ledger().structural, 0);

        stack.redo(&mut design);
        assert_eq!(design.components(), &[wall]);
        assert_eq!(design.ledger().structural, 500);
    }

    #[test]
    fn undo_remove_restores_stacking() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(100);
        let a = design.place("flooring", 0.0, 0.0);
        let b = design.place("window", 0.0, 0.0);
        let (index, removed) = design.remove(a.id).unwrap();
        stack.record(Edit::Remove { index, component: removed });

        stack.undo(&mut design);
        let ids: Vec<_> = design.components().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn undo_clear_restores_everything() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(100);
        design.place("wall", 0.0, 0.0);
        design.place("door", 200.0, 0.0);
        let before = design.components().to_vec();
        let ledger = *design.ledger();
        let removed = design.clear();
        stack.record(Edit::Clear { components: removed });

        stack.undo(&mut design);
        assert_eq!(design.components(), before.as_slice());
        assert_eq!(*design.ledger(), ledger);

        stack.redo(&mut design);
        assert!(design.is_empty());
        assert!(design.ledger().is_zero());
    }

    #[test]
    fn redo_clears_on_new_action() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(100);
        let a = design.place("beam", 0.0, 0.0);
        stack.record(Edit::Place { component: a });
        stack.undo(&mut design);
        assert!(stack.can_redo());

        let b = design.place("beam", 100.0, 0.0);
        stack.record(Edit::Place { component: b });
        assert!(!stack.can_redo());
    }

    #[test]
    fn max_depth_trims_oldest() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(3);
        for i in 0..5 {
            let c = design.place("lighting", i as f64 * 40.0, 0.0);
            stack.record(Edit::Place { component: c });
        }
        assert_eq!(stack.depth(), 3);
        while stack.undo(&mut design).is_some() {}
        assert_eq!(design.len(), 2);
    }

    #[test]
    fn zero_depth_records_nothing() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(0);
        let c = design.place("sofa", 0.0, 0.0);
        stack.record(Edit::Place { component: c });
        assert!(!stack.can_undo());
    }

    #[test]
    fn move_and_rotate_round_trip() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(10);
        let t = design.place("table", 0.0, 0.0);
        let from = design.move_to(t.id, 100.0, 40.0).unwrap();
        stack.record(Edit::Move { id: t.id, from, to: (100, 40) });
        let old = design.rotate(t.id, 90).unwrap();
        stack.record(Edit::Rotate { id: t.id, from: old, to: 90 });

        stack.undo(&mut design);
        stack.undo(&mut design);
        let c = design.get(t.id).unwrap();
        assert_eq!((c.x, c.y, c.rotation), (0, 0, 0));

        stack.redo(&mut design);
        stack.redo(&mut design);
        let c = design.get(t.id).unwrap();
        assert_eq!((c.x, c.y, c.rotation), (100, 40, 90));
    }

    #[test]
    fn empty_stacks_return_none() {
        let mut design = Design::default();
        let mut stack = CommandStack::new(10);
        assert!(stack.undo(&mut design).is_none());
        assert!(stack.redo(&mut design).is_none());
    }
}
