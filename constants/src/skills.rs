use bevy::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeShape {
    Sphere { radius: f32, sectors: u32, stacks: u32 },
    Cube { size: f32 },
    Icosahedron { radius: f32 },
    Tetrahedron { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillBadge {
    pub skill: &'static str,
    pub shape: BadgeShape,
    pub colour: [u8; 3],
}

pub const SKILL_BADGES: &[SkillBadge] = &[
    SkillBadge {
        skill: "python",
        shape: BadgeShape::Sphere {
            radius: 0.8,
            sectors: 12,
            stacks: 8,
        },
        colour: [0x37, 0x76, 0xab],
    },
    SkillBadge {
        skill: "javascript",
        shape: BadgeShape::Cube { size: 1.0 },
        colour: [0xf7, 0xdf, 0x1e],
    },
    SkillBadge {
        skill: "web",
        shape: BadgeShape::Icosahedron { radius: 0.8 },
        colour: [0xe3, 0x4f, 0x26],
    },
];

pub const DEFAULT_BADGE: SkillBadge = SkillBadge {
    skill: "",
    shape: BadgeShape::Tetrahedron { radius: 1.0 },
    colour: [0x93, 0x33, 0xea],
};

pub fn badge_for(skill: &str) -> &'static SkillBadge {
    SKILL_BADGES
        .iter()
        .find(|b| b.skill == skill)
        .unwrap_or(&DEFAULT_BADGE)
}

/// Continuous badge spin, radians per second around each axis.
pub const BADGE_SPIN: Vec3 = Vec3::new(0.6, 1.2, 0.0);

/// Hero model idle motion.
pub const HERO_SPIN: Vec3 = Vec3::new(0.0, 0.3, 0.0);
pub const HERO_BOB_AMPLITUDE: f32 = 0.1;
pub const HERO_BOB_FREQUENCY: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_skill_gets_purple_tetrahedron() {
        let badge = badge_for("cobol");
        assert_eq!(badge.shape, BadgeShape::Tetrahedron { radius: 1.0 });
        assert_eq!(badge.colour, [0x93, 0x33, 0xea]);
    }

    #[test]
    fn javascript_is_a_yellow_cube() {
        let badge = badge_for("javascript");
        assert_eq!(badge.shape, BadgeShape::Cube { size: 1.0 });
        assert_eq!(badge.colour, [0xf7, 0xdf, 0x1e]);
    }
}
