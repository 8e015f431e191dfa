//! Surface material description.

use rtt_math::Vec3;

/// Linear RGB color. Radiance math never uses an alpha channel.
pub type Color = Vec3;

/// Base reflectance of gold at normal incidence.
pub const GOLD_RF0: Color = Color::new(1.0, 0.71, 0.29);

/// Base reflectance of copper at normal incidence.
pub const COPPER_RF0: Color = Color::new(0.96, 0.64, 0.54);

/// How a surface responds to light.
///
/// `diffuse` and `rf0` are per-channel colors. Conductors have no diffuse
/// response at all; their appearance comes entirely from the Fresnel term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse reflectance (albedo)
    pub diffuse: Color,

    /// Fresnel reflectance at normal incidence (F0)
    pub rf0: Color,

    /// Emitted color, scaled by `power`
    pub emissive: Color,

    /// Emission power
    pub power: f32,

    /// Pure conductor: no diffuse term
    pub is_conductor: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::splat(0.8),
            rf0: Color::splat(0.005),
            emissive: Color::ZERO,
            power: 0.0,
            is_conductor: false,
        }
    }
}

impl Material {
    /// A dielectric surface with the given albedo and base reflectance.
    pub fn diffuse(diffuse: Color, rf0: Color) -> Self {
        Self {
            diffuse,
            rf0,
            ..Default::default()
        }
    }

    /// A pure conductor (metal) with the given base reflectance.
    pub fn conductor(rf0: Color) -> Self {
        Self {
            diffuse: Color::ZERO,
            rf0,
            is_conductor: true,
            ..Default::default()
        }
    }

    /// A purely emissive surface: no diffuse and no specular response.
    pub fn emitter(emissive: Color, power: f32) -> Self {
        Self {
            diffuse: Color::ZERO,
            rf0: Color::ZERO,
            emissive,
            power,
            is_conductor: false,
        }
    }

    /// Radiance emitted by the surface itself.
    #[inline]
    pub fn emission(&self) -> Color {
        self.emissive * self.power
    }

    pub fn is_emissive(&self) -> bool {
        self.power > 0.0 && self.emissive.max_element() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductor_has_no_diffuse() {
        let gold = Material::conductor(GOLD_RF0);
        assert!(gold.is_conductor);
        assert_eq!(gold.diffuse, Color::ZERO);
        assert_eq!(gold.rf0, GOLD_RF0);
        assert!(!gold.is_emissive());
    }

    #[test]
    fn test_emitter() {
        let light = Material::emitter(Color::ONE, 100.0);
        assert!(light.is_emissive());
        assert_eq!(light.emission(), Color::splat(100.0));
        assert_eq!(light.rf0, Color::ZERO);
    }

    #[test]
    fn test_default_is_grey_dielectric() {
        let m = Material::default();
        assert!(!m.is_conductor);
        assert!(!m.is_emissive());
        assert_eq!(m.emission(), Color::ZERO);
    }
}
