use bitflags::bitflags;
use std::collections::{HashMap, HashSet};

bitflags! {
    /// Which orthogonal neighbours share a tile's type.
    /// A flag set has no order, so equal neighbourhoods always compare equal.
    #[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash)]
    pub struct Neighbors: u8 {
        /// `(1, 0)`
        const RIGHT = 0b0001;
        /// `(-1, 0)`
        const LEFT  = 0b0010;
        /// `(0, 1)`, grid y grows downwards
        const DOWN  = 0b0100;
        /// `(0, -1)`
        const UP    = 0b1000;
    }
}

impl Neighbors {
    /// Flag paired with the grid offset it checks.
    pub const OFFSETS: [(Neighbors, (i32, i32)); 4] = [
        (Neighbors::RIGHT, (1, 0)),
        (Neighbors::LEFT, (-1, 0)),
        (Neighbors::UP, (0, -1)),
        (Neighbors::DOWN, (0, 1)),
    ];
}

const AUTOTILE_VARIANTS: [(Neighbors, usize); 9] = [
    (Neighbors::RIGHT.union(Neighbors::DOWN), 0),
    (Neighbors::RIGHT.union(Neighbors::DOWN).union(Neighbors::LEFT), 1),
    (Neighbors::LEFT.union(Neighbors::DOWN), 2),
    (Neighbors::LEFT.union(Neighbors::UP).union(Neighbors::DOWN), 3),
    (Neighbors::LEFT.union(Neighbors::UP), 4),
    (Neighbors::LEFT.union(Neighbors::UP).union(Neighbors::RIGHT), 5),
    (Neighbors::RIGHT.union(Neighbors::UP), 6),
    (Neighbors::RIGHT.union(Neighbors::UP).union(Neighbors::DOWN), 7),
    (Neighbors::all(), 8),
];

const AUTOTILE_KINDS: [&str; 2] = ["grass", "stone"];
const PHYSICS_KINDS: [&str; 2] = ["grass", "stone"];

/// Which tile types autotile, which collide, and the variant each
/// neighbourhood maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct AutotileRules {
    variants: HashMap<Neighbors, usize>,
    autotile_kinds: HashSet<String>,
    solid_kinds: HashSet<String>,
}

impl Default for AutotileRules {
    fn default() -> Self {
        AutotileRules {
            variants: AUTOTILE_VARIANTS.into_iter().collect(),
            autotile_kinds: AUTOTILE_KINDS.iter().map(|k| k.to_string()).collect(),
            solid_kinds: PHYSICS_KINDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl AutotileRules {
    /// Variant for a neighbourhood, `None` when the table has no entry.
    #[inline]
    pub fn variant_for(&self, neighbors: Neighbors) -> Option<usize> {
        self.variants.get(&neighbors).copied()
    }

    /// Does `kind` get its variant picked by [`Tilemap::autotile`](crate::Tilemap::autotile)?
    #[inline]
    pub fn is_autotiled(&self, kind: &str) -> bool {
        self.autotile_kinds.contains(kind)
    }

    /// Does `kind` take part in collision?
    #[inline]
    pub fn is_solid(&self, kind: &str) -> bool {
        self.solid_kinds.contains(kind)
    }

    /// Adds a type to the autotiled set.
    pub fn with_autotile_kind(mut self, kind: impl Into<String>) -> Self {
        self.autotile_kinds.insert(kind.into());
        self
    }

    /// Adds a type to the solid set.
    pub fn with_solid_kind(mut self, kind: impl Into<String>) -> Self {
        self.solid_kinds.insert(kind.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_surround_is_variant_8() {
        let rules = AutotileRules::default();
        assert_eq!(rules.variant_for(Neighbors::all()), Some(8));
    }

    #[test]
    fn lookup_ignores_insertion_order() {
        let rules = AutotileRules::default();
        let a = Neighbors::UP | Neighbors::RIGHT;
        let b = Neighbors::RIGHT | Neighbors::UP;
        assert_eq!(rules.variant_for(a), Some(6));
        assert_eq!(rules.variant_for(a), rules.variant_for(b));
    }

    #[test]
    fn unlisted_neighbourhoods_have_no_variant() {
        let rules = AutotileRules::default();
        for n in [
            Neighbors::empty(),
            Neighbors::RIGHT,
            Neighbors::UP,
            Neighbors::LEFT | Neighbors::RIGHT,
            Neighbors::UP | Neighbors::DOWN,
        ] {
            assert_eq!(rules.variant_for(n), None, "{n:?}");
        }
    }

    #[test]
    fn every_variant_appears_once() {
        let mut seen: Vec<usize> = AUTOTILE_VARIANTS.iter().map(|(_, v)| *v).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn only_terrain_is_solid_and_autotiled() {
        let rules = AutotileRules::default();
        for kind in ["grass", "stone"] {
            assert!(rules.is_solid(kind));
            assert!(rules.is_autotiled(kind));
        }
        for kind in ["decor", "large_decor", "spawners"] {
            assert!(!rules.is_solid(kind));
            assert!(!rules.is_autotiled(kind));
        }
    }

    #[test]
    fn extra_kinds_can_be_registered() {
        let rules = AutotileRules::default()
            .with_solid_kind("ice")
            .with_autotile_kind("ice");
        assert!(rules.is_solid("ice"));
        assert!(rules.is_autotiled("ice"));
    }
}
