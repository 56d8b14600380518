//! Formatting utilities

use glam::Vec3;
use keyrig_anim::{EulerDegrees, SampleMode, UpAxis};

/// Format a vector with three decimals per component
pub fn format_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

/// Format Euler angles in degrees
pub fn format_euler(r: EulerDegrees) -> String {
    format!("({:.1}°, {:.1}°, {:.1}°)", r.x, r.y, r.z)
}

pub fn format_sample_mode(mode: SampleMode) -> &'static str {
    match mode {
        SampleMode::Lerp => "lerp",
        SampleMode::Held => "held",
    }
}

pub fn format_up_axis(axis: UpAxis) -> &'static str {
    match axis {
        UpAxis::ZUp => "z-up",
        UpAxis::YUp => "y-up",
    }
}
