use crate::visibility::frames::LookAngles;

/// A satellite counts as visible only when strictly above the threshold.
pub fn is_visible(look: &LookAngles, min_elevation_deg: f64) -> bool {
    look.elevation_deg > min_elevation_deg
}
