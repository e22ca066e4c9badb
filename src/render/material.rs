// render/material.rs

/// Material identity for 2D drawables. Kept as a small Copy value so it can
/// key the batch-group map directly; two elements share a draw call exactly
/// when their materials compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    pub texture: u32,
    pub tint: [u8; 4],
    pub flags: MaterialFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialFlags(u32);

impl MaterialFlags {
    pub const NONE: Self = Self(0);
    pub const ALPHA_BLEND: Self = Self(1 << 0);
    pub const ADDITIVE: Self = Self(1 << 1);
    pub const GRAYSCALE: Self = Self(1 << 2);

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for MaterialFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for MaterialFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Material {
    pub fn new(texture: u32) -> Self {
        Self {
            texture,
            tint: [255, 255, 255, 255],
            flags: MaterialFlags::NONE,
        }
    }

    pub fn with_tint(mut self, tint: [u8; 4]) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_alpha(mut self) -> Self {
        self.flags |= MaterialFlags::ALPHA_BLEND;
        self
    }

    pub fn with_additive(mut self) -> Self {
        self.flags |= MaterialFlags::ADDITIVE;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_materials_hash_to_same_key() {
        use std::collections::HashMap;
        let a = Material::new(3).with_alpha();
        let b = Material::new(3).with_alpha();
        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
    }

    #[test]
    fn flag_composition() {
        let mut flags = MaterialFlags::NONE;
        flags |= MaterialFlags::ALPHA_BLEND;
        flags.insert(MaterialFlags::GRAYSCALE);
        assert!(flags.contains(MaterialFlags::ALPHA_BLEND));
        assert!(flags.contains(MaterialFlags::GRAYSCALE));
        assert!(!flags.contains(MaterialFlags::ADDITIVE));
    }
}
