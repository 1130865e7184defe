//! Transform hierarchy
//!
//! Transforms live in an arena and refer to their parent by index.
//! Owners (cameras, lights, mesh instances) hold a `TransformId`; game
//! logic mutates the records in place and the renderer only reads them.

use crate::math::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Handle to a transform stored in a `TransformArena`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformId(pub usize);

/// Local position/rotation/scale plus an optional parent link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Parent transform (None = root)
    #[serde(default)]
    pub parent: Option<TransformId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale, parent: None }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    pub fn with_parent(mut self, parent: TransformId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Local TRS matrix, ignoring the parent
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::trs(self.position, self.rotation, self.scale)
    }
}

/// Storage for every transform in a scene
#[derive(Debug, Clone, Default)]
pub struct TransformArena {
    slots: Vec<Option<Transform>>,
}

impl TransformArena {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a transform and return its handle (reuses freed slots)
    pub fn insert(&mut self, transform: Transform) -> TransformId {
        if let Some(idx) = self.slots.iter().position(|s| s.is_none()) {
            self.slots[idx] = Some(transform);
            return TransformId(idx);
        }
        self.slots.push(Some(transform));
        TransformId(self.slots.len() - 1)
    }

    pub fn get(&self, id: TransformId) -> Option<&Transform> {
        self.slots.get(id.0).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: TransformId) -> Option<&mut Transform> {
        self.slots.get_mut(id.0).and_then(|s| s.as_mut())
    }

    /// Number of live transforms
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_parent(&mut self, child: TransformId, parent: Option<TransformId>) {
        if let Some(t) = self.get_mut(child) {
            t.parent = parent;
        }
    }

    /// Remove a transform. Its children become roots.
    pub fn remove(&mut self, id: TransformId) -> Option<Transform> {
        let removed = self.slots.get_mut(id.0)?.take()?;
        for t in self.slots.iter_mut().flatten() {
            if t.parent == Some(id) {
                t.parent = None;
            }
        }
        Some(removed)
    }

    /// Children of a transform
    pub fn children(&self, parent: TransformId) -> Vec<TransformId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.as_ref().map_or(false, |t| t.parent == Some(parent)))
            .map(|(i, _)| TransformId(i))
            .collect()
    }

    /// `parent.global * local`, composed up to the root.
    /// Missing transforms yield identity. The walk is bounded by the arena
    /// size so a cyclic chain terminates instead of recursing forever.
    pub fn global_matrix(&self, id: TransformId) -> Mat4 {
        let mut result = Mat4::IDENTITY;
        let mut current = Some(id);
        let mut steps = 0;

        while let Some(cur) = current {
            let Some(t) = self.get(cur) else { break };
            result = t.local_matrix() * result;
            current = t.parent;
            steps += 1;
            if steps > self.slots.len() {
                break;
            }
        }

        result
    }

    pub fn global_position(&self, id: TransformId) -> Vec3 {
        self.global_matrix(id).extract_translation()
    }

    pub fn global_rotation(&self, id: TransformId) -> Quat {
        self.global_matrix(id).extract_rotation()
    }

    pub fn global_scale(&self, id: TransformId) -> Vec3 {
        self.global_matrix(id).extract_scale()
    }

    pub fn global_forward(&self, id: TransformId) -> Vec3 {
        self.global_matrix(id).extract_axis_z().normalize()
    }

    pub fn global_backward(&self, id: TransformId) -> Vec3 {
        -self.global_forward(id)
    }

    pub fn global_right(&self, id: TransformId) -> Vec3 {
        self.global_matrix(id).extract_axis_x().normalize()
    }

    pub fn global_left(&self, id: TransformId) -> Vec3 {
        -self.global_right(id)
    }

    pub fn global_up(&self, id: TransformId) -> Vec3 {
        self.global_matrix(id).extract_axis_y().normalize()
    }

    pub fn global_down(&self, id: TransformId) -> Vec3 {
        -self.global_up(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn sample() -> Transform {
        Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_euler(0.5, 0.2, -0.3),
            Vec3::new(1.0, 2.0, 0.5),
        )
    }

    #[test]
    fn test_root_global_is_trs() {
        let mut arena = TransformArena::new();
        let t = sample();
        let id = arena.insert(t);
        let expected = Mat4::trs(t.position, t.rotation, t.scale);
        assert!(arena.global_matrix(id).approx_eq(&expected, 1e-6));
    }

    #[test]
    fn test_child_composes_parent() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(sample());
        let child_local = Transform::new(
            Vec3::new(0.0, 1.0, 0.0),
            Quat::from_euler(-0.1, 0.0, 0.4),
            Vec3::ONE,
        );
        let child = arena.insert(child_local.with_parent(parent));

        let expected = arena.global_matrix(parent) * child_local.local_matrix();
        assert!(arena.global_matrix(child).approx_eq(&expected, 1e-5));
    }

    #[test]
    fn test_global_position_respects_parent() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(Transform::new(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_euler(FRAC_PI_2, 0.0, 0.0),
            Vec3::ONE,
        ));
        let child = arena.insert(Transform::from_position(Vec3::new(0.0, 0.0, 1.0)).with_parent(parent));
        let p = arena.global_position(child);
        assert!(p.approx_eq(Vec3::new(11.0, 0.0, 0.0), 1e-5), "{:?}", p);
        assert!(arena.global_forward(child).approx_eq(Vec3::RIGHT, 1e-5));
    }

    #[test]
    fn test_directions_default() {
        let mut arena = TransformArena::new();
        let id = arena.insert(Transform::default());
        assert!(arena.global_forward(id).approx_eq(Vec3::FORWARD, 1e-6));
        assert!(arena.global_backward(id).approx_eq(-Vec3::FORWARD, 1e-6));
        assert!(arena.global_up(id).approx_eq(Vec3::UP, 1e-6));
        assert!(arena.global_left(id).approx_eq(-Vec3::RIGHT, 1e-6));
    }

    #[test]
    fn test_remove_reroots_children() {
        let mut arena = TransformArena::new();
        let parent = arena.insert(Transform::from_position(Vec3::new(5.0, 0.0, 0.0)));
        let child = arena.insert(Transform::default().with_parent(parent));
        assert_eq!(arena.children(parent), vec![child]);

        arena.remove(parent);
        assert_eq!(arena.get(child).and_then(|t| t.parent), None);
        assert!(arena.global_position(child).approx_eq(Vec3::ZERO, 1e-6));
        assert_eq!(arena.len(), 1);

        // Freed slot is reused
        let again = arena.insert(Transform::default());
        assert_eq!(again, parent);
    }

    #[test]
    fn test_missing_id_is_identity() {
        let arena = TransformArena::new();
        assert_eq!(arena.global_matrix(TransformId(3)), Mat4::IDENTITY);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut arena = TransformArena::new();
        let a = arena.insert(Transform::default());
        let b = arena.insert(Transform::default().with_parent(a));
        arena.set_parent(a, Some(b));
        let _ = arena.global_matrix(a);
    }
}
