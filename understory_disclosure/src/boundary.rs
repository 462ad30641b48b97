// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containment tests for outside-click detection.
//!
//! A disclosure decides whether a click is "outside" by asking its boundary
//! whether the click target is contained. The crate does not assume what a
//! target is: it can be a node identifier in a scene tree, a pointer position,
//! or anything the host resolves clicks to.
//!
//! - Closures `Fn(&T) -> bool` are boundaries.
//! - [`AncestorBoundary`] gives DOM-style `contains` over any [`ParentLookup`]:
//!   a root contains itself and all of its descendants.
//! - With the `kurbo` feature, `Rect`, `RoundedRect`, `Circle`, and `Ellipse`
//!   contain `kurbo::Point`s.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use understory_disclosure::{AncestorBoundary, Boundary};
//!
//! // child -> parent
//! let parents = BTreeMap::from([(2_u32, 1_u32), (3, 2), (5, 4)]);
//! let dropdown = AncestorBoundary::new(1, &parents);
//!
//! assert!(dropdown.contains(&1));
//! assert!(dropdown.contains(&3));
//! assert!(!dropdown.contains(&5));
//! ```

use alloc::collections::BTreeMap;

/// Answers whether a click target lies inside a disclosure.
pub trait Boundary<T> {
    /// Returns `true` if `target` is inside this boundary.
    fn contains(&self, target: &T) -> bool;
}

impl<T, F> Boundary<T> for F
where
    F: Fn(&T) -> bool,
{
    fn contains(&self, target: &T) -> bool {
        self(target)
    }
}

/// Parent lookup for tree-shaped targets.
///
/// Hosts can implement this over a scene tree, an ECS parent component, or a
/// plain map from child to parent.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` for a root or unknown node.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, L> ParentLookup<K> for &L
where
    L: ParentLookup<K> + ?Sized,
{
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

impl<K> ParentLookup<K> for BTreeMap<K, K>
where
    K: Ord + Clone,
{
    fn parent_of(&self, node: &K) -> Option<K> {
        self.get(node).cloned()
    }
}

#[cfg(feature = "hashbrown")]
impl<K, S> ParentLookup<K> for hashbrown::HashMap<K, K, S>
where
    K: Eq + core::hash::Hash + Clone,
    S: core::hash::BuildHasher,
{
    fn parent_of(&self, node: &K) -> Option<K> {
        self.get(node).cloned()
    }
}

/// A boundary rooted at one node of a tree.
///
/// Contains the root itself and every node whose ancestor chain reaches it.
/// Malformed lookups with parent cycles never loop: a cycle that does not pass
/// through the root reports "not contained".
#[derive(Clone, Debug)]
pub struct AncestorBoundary<K, L> {
    root: K,
    lookup: L,
}

impl<K, L> AncestorBoundary<K, L> {
    /// Creates a boundary rooted at `root`.
    pub const fn new(root: K, lookup: L) -> Self {
        Self { root, lookup }
    }

    /// Returns the root node.
    pub const fn root(&self) -> &K {
        &self.root
    }
}

impl<K, L> Boundary<K> for AncestorBoundary<K, L>
where
    K: PartialEq + Clone,
    L: ParentLookup<K>,
{
    fn contains(&self, target: &K) -> bool {
        if *target == self.root {
            return true;
        }
        // Tortoise/hare walk so a cyclic lookup terminates without allocating.
        let mut slow = target.clone();
        let mut fast = target.clone();
        loop {
            for _ in 0..2 {
                match self.lookup.parent_of(&fast) {
                    Some(parent) if parent == self.root => return true,
                    Some(parent) => fast = parent,
                    None => return false,
                }
            }
            match self.lookup.parent_of(&slow) {
                Some(parent) => slow = parent,
                None => return false,
            }
            if slow == fast {
                return false;
            }
        }
    }
}

#[cfg(feature = "kurbo")]
mod shapes {
    use kurbo::{Circle, Ellipse, Point, Rect, RoundedRect, Shape};

    use super::Boundary;

    macro_rules! shape_boundary {
        ($($ty:ty),*) => {
            $(
                impl Boundary<Point> for $ty {
                    fn contains(&self, target: &Point) -> bool {
                        Shape::contains(self, *target)
                    }
                }
            )*
        };
    }

    shape_boundary!(Rect, RoundedRect, Circle, Ellipse);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> BTreeMap<u32, u32> {
        // 1 -> 2 -> 3, 1 -> 4, 10 -> 11
        BTreeMap::from([(2, 1), (3, 2), (4, 1), (11, 10)])
    }

    #[test]
    fn root_contains_itself_and_descendants() {
        let parents = tree();
        let boundary = AncestorBoundary::new(1, &parents);
        assert!(boundary.contains(&1));
        assert!(boundary.contains(&2));
        assert!(boundary.contains(&3));
        assert!(boundary.contains(&4));
    }

    #[test]
    fn unrelated_and_ancestor_nodes_are_outside() {
        let parents = tree();
        let boundary = AncestorBoundary::new(2, &parents);
        assert!(boundary.contains(&3));
        assert!(!boundary.contains(&1));
        assert!(!boundary.contains(&4));
        assert!(!boundary.contains(&11));
        assert!(!boundary.contains(&99));
    }

    #[test]
    fn parent_cycle_terminates() {
        let parents = BTreeMap::from([(5_u32, 6_u32), (6, 7), (7, 5)]);
        let boundary = AncestorBoundary::new(1, &parents);
        assert!(!boundary.contains(&5));

        let boundary = AncestorBoundary::new(7, &parents);
        assert!(boundary.contains(&5));
    }

    #[test]
    fn closures_are_boundaries() {
        let even = |n: &u32| n % 2 == 0;
        assert!(Boundary::contains(&even, &4_u32));
        assert!(!Boundary::contains(&even, &3_u32));
    }

    #[cfg(feature = "kurbo")]
    #[test]
    fn rect_contains_points() {
        use kurbo::{Point, Rect};
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(Boundary::contains(&rect, &Point::new(10.0, 10.0)));
        assert!(!Boundary::contains(&rect, &Point::new(150.0, 10.0)));
    }

    #[cfg(feature = "hashbrown")]
    #[test]
    fn hashbrown_map_is_a_parent_lookup() {
        let mut parents = hashbrown::HashMap::new();
        parents.insert(2_u32, 1_u32);
        parents.insert(3, 2);
        let boundary = AncestorBoundary::new(1, &parents);
        assert!(boundary.contains(&3));
        assert!(!boundary.contains(&9));
    }
}
