use glam::{Affine2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    pub fn from_trs(t: Vec2, r: f32, s: Vec2) -> Self {
        Self {
            translation: t,
            rotation: r,
            scale: s,
        }
    }

    pub fn from_translation(t: Vec2) -> Self {
        Self {
            translation: t,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let m = Transform::default().matrix();
        assert!(m.abs_diff_eq(Affine2::IDENTITY, 1e-6));
    }

    #[test]
    fn translate_then_scale_ok() {
        let tr = Transform::from_trs(Vec2::new(1.0, 2.0), 0.0, Vec2::splat(2.0));
        let p = tr.matrix().transform_point2(Vec2::new(1.0, 0.0));
        // Scale happens about origin, then translation
        // (1,0) -> (2,0) -> (3,2)
        assert!(p.abs_diff_eq(Vec2::new(3.0, 2.0), 1e-6));
    }

    #[test]
    fn rotation_quarter_turn() {
        let tr = Transform::from_trs(Vec2::ZERO, std::f32::consts::FRAC_PI_2, Vec2::ONE);
        let p = tr.matrix().transform_point2(Vec2::new(1.0, 0.0));
        assert!(p.abs_diff_eq(Vec2::new(0.0, 1.0), 1e-5));
    }
}
