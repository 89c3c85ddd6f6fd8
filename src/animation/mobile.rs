use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Number of instances in the mobile assembly.
pub const INSTANCE_COUNT: usize = 24;

/// Rotation angles (radians) of the three mobile tiers.
///
/// Advanced by a fixed step per generated frame, not by elapsed time, so
/// playback speed follows the frame rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationPhase {
    /// Rotation shared by the whole hanging assembly.
    pub main: f32,
    /// Additional rotation of the first tier.
    pub tier1: f32,
    /// Additional rotation of the second tier.
    pub tier2: f32,
}

impl AnimationPhase {
    /// Per-frame increments.
    pub const STEP: Self = Self {
        main: 0.003,
        tier1: 0.005,
        tier2: 0.007,
    };

    /// Advance every angle by one [`STEP`](Self::STEP).
    pub fn advance(&mut self) {
        self.main += Self::STEP.main;
        self.tier1 += Self::STEP.tier1;
        self.tier2 += Self::STEP.tier2;
    }

    /// Cumulative first-tier rotation.
    #[must_use]
    pub fn tier1_rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(self.tier1) * Mat4::from_rotation_y(self.main)
    }

    /// Cumulative second-tier rotation (first tier, then its own spin).
    #[must_use]
    pub fn tier2_rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(self.tier2) * self.tier1_rotation()
    }
}

/// One instance as uploaded to the per-instance vertex stream.
///
/// 68 bytes: a column-major model transform followed by the texture
/// selector.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    /// Model transform, column-major.
    pub transform: [[f32; 4]; 4],
    /// Which secondary texture to blend with the base texture (0, 1 or 2).
    pub selector: f32,
}

impl InstanceRecord {
    /// Pack a transform and selector.
    #[must_use]
    pub fn new(transform: Mat4, selector: f32) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            selector,
        }
    }

    /// The model transform as a matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform)
    }
}

/// Which hierarchy rotation a part inherits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    /// Fixed ceiling plate.
    Base,
    First,
    Second,
}

/// A rigid part: box scale, offset in its tier's frame, and selector.
struct Part {
    scale: Vec3,
    offset: Vec3,
    tier: Tier,
    selector: f32,
}

const fn part(scale: Vec3, offset: Vec3, tier: Tier, selector: f32) -> Part {
    Part {
        scale,
        offset,
        tier,
        selector,
    }
}

const CUBE: Vec3 = Vec3::splat(0.6);

/// The mobile, in draw order.
const ASSEMBLY: [Part; INSTANCE_COUNT] = [
    part(Vec3::new(1.6, 0.1, 1.6), Vec3::new(0.0, 4.8, 0.0), Tier::Base, 0.0),
    // First tier: pole, crossed arms, four hanging cubes.
    part(Vec3::new(0.1, 1.0, 0.1), Vec3::new(0.0, 3.65, 0.0), Tier::First, 1.0),
    part(Vec3::new(3.6, 0.1, 0.1), Vec3::new(0.0, 2.6, 0.0), Tier::First, 1.0),
    part(Vec3::new(0.1, 0.1, 3.6), Vec3::new(0.0, 2.6, 0.0), Tier::First, 1.0),
    part(CUBE, Vec3::new(3.0, 2.0, 0.0), Tier::First, 0.0),
    part(CUBE, Vec3::new(-3.0, 2.0, 0.0), Tier::First, 1.0),
    part(CUBE, Vec3::new(0.0, 2.0, 3.0), Tier::First, 2.0),
    part(CUBE, Vec3::new(0.0, 2.0, -3.0), Tier::First, 0.0),
    // Second tier: connectors, arms, eight cubes around the square.
    part(Vec3::new(0.1, 0.85, 0.1), Vec3::new(0.0, 0.85, 3.0), Tier::Second, 1.0),
    part(Vec3::new(0.1, 0.85, 0.1), Vec3::new(0.0, 0.85, -3.0), Tier::Second, 1.0),
    part(Vec3::new(0.1, 0.85, 0.1), Vec3::new(3.0, 0.85, 0.0), Tier::Second, 1.0),
    part(Vec3::new(0.1, 0.85, 0.1), Vec3::new(-3.0, 0.85, 0.0), Tier::Second, 1.0),
    part(Vec3::new(2.0, 0.1, 0.1), Vec3::new(0.0, 0.2, 3.0), Tier::Second, 1.0),
    part(Vec3::new(2.0, 0.1, 0.1), Vec3::new(0.0, 0.2, -3.0), Tier::Second, 1.0),
    part(Vec3::new(0.1, 0.1, 2.0), Vec3::new(3.0, 0.2, 0.0), Tier::Second, 1.0),
    part(Vec3::new(0.1, 0.1, 2.0), Vec3::new(-3.0, 0.2, 0.0), Tier::Second, 1.0),
    part(CUBE, Vec3::new(1.0, -0.4, 3.0), Tier::Second, 0.0),
    part(CUBE, Vec3::new(-1.0, -0.4, 3.0), Tier::Second, 1.0),
    part(CUBE, Vec3::new(1.0, -0.4, -3.0), Tier::Second, 2.0),
    part(CUBE, Vec3::new(-1.0, -0.4, -3.0), Tier::Second, 0.0),
    part(CUBE, Vec3::new(3.0, -0.4, 1.0), Tier::Second, 1.0),
    part(CUBE, Vec3::new(3.0, -0.4, -1.0), Tier::Second, 2.0),
    part(CUBE, Vec3::new(-3.0, -0.4, 1.0), Tier::Second, 0.0),
    part(CUBE, Vec3::new(-3.0, -0.4, -1.0), Tier::Second, 1.0),
];

/// Produces the animated mobile's instance transforms.
///
/// Parents pass rotation, not translation, to their children: each part's
/// local box transform (scale, then offset) is followed by the cumulative
/// rotation of its tier.
#[derive(Debug, Clone, Default)]
pub struct InstanceTransformGenerator {
    phase: AnimationPhase,
}

impl InstanceTransformGenerator {
    /// Start with all tiers at zero rotation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Advance one step and emit the frame's instances.
    pub fn next_frame(&mut self) -> [InstanceRecord; INSTANCE_COUNT] {
        self.phase.advance();
        Self::records_at(&self.phase)
    }

    /// Emit the instances for a given phase without advancing.
    #[must_use]
    pub fn records_at(phase: &AnimationPhase) -> [InstanceRecord; INSTANCE_COUNT] {
        let r1 = phase.tier1_rotation();
        let r2 = phase.tier2_rotation();
        std::array::from_fn(|i| {
            let p = &ASSEMBLY[i];
            let local = Mat4::from_translation(p.offset) * Mat4::from_scale(p.scale);
            let parent = match p.tier {
                Tier::Base => Mat4::IDENTITY,
                Tier::First => r1,
                Tier::Second => r2,
            };
            InstanceRecord::new(parent * local, p.selector)
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn record_is_68_bytes() {
        assert_eq!(size_of::<InstanceRecord>(), 68);
    }

    #[test]
    fn always_emits_24_records() {
        let phases = [
            AnimationPhase::default(),
            AnimationPhase {
                main: 1.0e6,
                tier1: -3.0,
                tier2: f32::MAX,
            },
        ];
        for phase in &phases {
            assert_eq!(
                InstanceTransformGenerator::records_at(phase).len(),
                INSTANCE_COUNT
            );
        }
    }

    #[test]
    fn first_call_advances_phase_and_emits_base_plate() {
        let mut generator = InstanceTransformGenerator::new();
        let records = generator.next_frame();

        let phase = generator.phase();
        assert!((phase.main - 0.003).abs() < 1e-7);
        assert!((phase.tier1 - 0.005).abs() < 1e-7);
        assert!((phase.tier2 - 0.007).abs() < 1e-7);

        let expected = Mat4::from_translation(Vec3::new(0.0, 4.8, 0.0))
            * Mat4::from_scale(Vec3::new(1.6, 0.1, 1.6));
        assert!(records[0].matrix().abs_diff_eq(expected, 1e-6));
        assert_eq!(records[0].selector, 0.0);
    }

    #[test]
    fn tier2_cube_inherits_both_rotations() {
        let phase = AnimationPhase {
            main: 0.4,
            tier1: 0.9,
            tier2: 1.3,
        };
        let records = InstanceTransformGenerator::records_at(&phase);
        // First second-tier cube: offset (1, -0.4, 3).
        let cube = records[16].matrix();

        // Scale 0.6, translate, then rotate about Y by the summed tier angles.
        let point = Vec3::new(0.5, 0.5, 0.5);
        let local = point * 0.6 + Vec3::new(1.0, -0.4, 3.0);
        let angle = phase.main + phase.tier1 + phase.tier2;
        let expected = glam::Quat::from_rotation_y(angle) * local;

        let got = cube * Vec4::new(point.x, point.y, point.z, 1.0);
        assert!(got.truncate().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn children_do_not_inherit_translation() {
        let records =
            InstanceTransformGenerator::records_at(&AnimationPhase::default());
        // At zero phase every part sits at its own offset.
        let origin = records[4].matrix() * Vec4::W;
        assert!(origin.truncate().abs_diff_eq(Vec3::new(3.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn base_plate_never_rotates() {
        let a = InstanceTransformGenerator::records_at(&AnimationPhase::default());
        let b = InstanceTransformGenerator::records_at(&AnimationPhase {
            main: 2.0,
            tier1: 1.0,
            tier2: 0.5,
        });
        assert_eq!(a[0], b[0]);
        assert_ne!(a[1], b[1]);
    }

    #[test]
    fn selectors_follow_draw_order() {
        let records =
            InstanceTransformGenerator::records_at(&AnimationPhase::default());
        let selectors: Vec<f32> = records.iter().map(|r| r.selector).collect();
        assert_eq!(&selectors[4..8], &[0.0, 1.0, 2.0, 0.0]);
        for (i, s) in selectors[16..].iter().enumerate() {
            assert_eq!(*s, (i % 3) as f32);
        }
        assert!(selectors[1..4].iter().all(|&s| s == 1.0));
        assert!(selectors[8..16].iter().all(|&s| s == 1.0));
    }

    #[test]
    fn identical_phase_reproduces_output() {
        let phase = AnimationPhase {
            main: 0.123,
            tier1: 4.56,
            tier2: 7.89,
        };
        assert_eq!(
            InstanceTransformGenerator::records_at(&phase),
            InstanceTransformGenerator::records_at(&phase)
        );
    }
}
