//! Procedural animation of the instanced mobile.
//!
//! [`InstanceTransformGenerator`] owns the [`AnimationPhase`] and emits the
//! fixed 24-part assembly each frame, ready for upload to the instance
//! buffer.

/// Mobile assembly, phase state and instance records.
pub mod mobile;

pub use mobile::{
    AnimationPhase, InstanceRecord, InstanceTransformGenerator, INSTANCE_COUNT,
};
