//! Refraction media

use octray_core::base::Float;
use octray_core::primitive::ArcPrimitive;
use std::sync::Arc;

/// The stack of transmissive primitives the current ray path is inside.
/// Empty means air with refraction index 1. Entering a primitive pushes it;
/// exiting removes its topmost occurrence. Removal keeps the stack correct
/// for overlapping (not strictly nested) volumes, where the primitive being
/// left is not necessarily on top.
#[derive(Default)]
pub struct MediumStack {
    stack: Vec<ArcPrimitive>,
}

/// Refraction index of empty space.
const AIR_INDEX: Float = 1.0;

impl MediumStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the path is in air.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Refraction index of the medium the path is currently inside.
    pub fn current_index(&self) -> Float {
        self.stack
            .last()
            .map_or(AIR_INDEX, |p| p.material().index)
    }

    /// Records the path entering a primitive. Returns the transition with
    /// the indices on both sides of the boundary.
    ///
    /// * `prim` - The primitive being entered.
    pub fn enter(&mut self, prim: ArcPrimitive) -> MediumTransition {
        let from_index = self.current_index();
        let into_index = prim.material().index;
        self.stack.push(prim);
        MediumTransition {
            from_index,
            into_index,
            undo: UndoOp::Pop,
        }
    }

    /// Records the path exiting a primitive: its topmost occurrence is
    /// removed, remembering the position so the transition can be undone
    /// exactly. A primitive that was never entered (the ray started inside
    /// it) leaves the stack untouched.
    ///
    /// * `prim` - The primitive being exited.
    pub fn exit(&mut self, prim: &ArcPrimitive) -> MediumTransition {
        let pos = self
            .stack
            .iter()
            .rposition(|entry| Arc::ptr_eq(entry, prim));

        match pos {
            Some(index) => {
                let removed = self.stack.remove(index);
                MediumTransition {
                    from_index: removed.material().index,
                    into_index: self.current_index(),
                    undo: UndoOp::Reinsert {
                        index,
                        prim: removed,
                    },
                }
            }
            None => MediumTransition {
                from_index: prim.material().index,
                into_index: self.current_index(),
                undo: UndoOp::None,
            },
        }
    }
}

/// A medium boundary crossing. Holds the refraction indices on both sides
/// and how to restore the stack once the refracted subtree returns, so a
/// sibling reflection ray sees the stack it started with.
pub struct MediumTransition {
    /// Refraction index of the medium being left.
    pub from_index: Float,

    /// Refraction index of the medium being entered.
    pub into_index: Float,

    undo: UndoOp,
}

enum UndoOp {
    Pop,
    Reinsert { index: usize, prim: ArcPrimitive },
    None,
}

impl MediumTransition {
    /// Ratio of refraction indices, leaving medium over entered medium.
    pub fn ratio(&self) -> Float {
        self.from_index / self.into_index
    }

    /// Restores the stack to its state before the transition.
    ///
    /// * `stack` - The stack the transition was taken on.
    pub fn undo(self, stack: &mut MediumStack) {
        match self.undo {
            UndoOp::Pop => {
                stack.stack.pop();
            }
            UndoOp::Reinsert { index, prim } => {
                stack.stack.insert(index, prim);
            }
            UndoOp::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octray_core::geometry::Point3f;
    use octray_core::material::Material;
    use octray_shapes::Sphere;

    fn glass(index: Float) -> ArcPrimitive {
        let material = Material {
            index,
            ..Material::default()
        };
        Arc::new(Sphere::new(Point3f::zero(), 1.0, Arc::new(material)))
    }

    #[test]
    fn enter_exit_balance() {
        let outer = glass(1.5);
        let mut stack = MediumStack::new();

        let enter = stack.enter(outer.clone());
        assert_eq!(enter.from_index, 1.0);
        assert_eq!(enter.into_index, 1.5);
        assert_eq!(stack.current_index(), 1.5);

        let exit = stack.exit(&outer);
        assert_eq!(exit.from_index, 1.5);
        assert_eq!(exit.into_index, 1.0);
        assert!(stack.is_empty());

        exit.undo(&mut stack);
        assert_eq!(stack.current_index(), 1.5);
        enter.undo(&mut stack);
        assert!(stack.is_empty());
    }

    #[test]
    fn nested_media() {
        let outer = glass(1.5);
        let inner = glass(1.33);
        let mut stack = MediumStack::new();

        stack.enter(outer.clone());
        let t = stack.enter(inner.clone());
        assert_eq!(t.from_index, 1.5);
        assert_eq!(t.into_index, 1.33);

        // Leaving the inner volume lands back in the outer one.
        let t = stack.exit(&inner);
        assert_eq!(t.from_index, 1.33);
        assert_eq!(t.into_index, 1.5);
    }

    #[test]
    fn overlapping_exit_reinserts_at_position() {
        let a = glass(1.5);
        let b = glass(1.33);
        let mut stack = MediumStack::new();

        stack.enter(a.clone());
        stack.enter(b.clone());

        // Exit `a` while still inside `b`: removal happens below the top.
        let t = stack.exit(&a);
        assert_eq!(t.from_index, 1.5);
        assert_eq!(t.into_index, 1.33);
        assert_eq!(stack.current_index(), 1.33);

        t.undo(&mut stack);
        // `a` is back under `b`.
        let t = stack.exit(&b);
        assert_eq!(t.into_index, 1.5);
    }

    #[test]
    fn exit_without_enter_is_harmless() {
        let a = glass(1.5);
        let mut stack = MediumStack::new();

        let t = stack.exit(&a);
        assert_eq!(t.from_index, 1.5);
        assert_eq!(t.into_index, 1.0);
        assert!(stack.is_empty());
        t.undo(&mut stack);
        assert!(stack.is_empty());
    }
}
