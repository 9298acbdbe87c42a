//! Canvas sizing and device detection

use crate::settings::InputProfile;
use crate::sim::Field;

/// Width / height of the play field
pub const FIELD_ASPECT: f32 = 4.0 / 3.0;
/// Share of the window height the field may use (the rest is for controls)
pub const FIELD_HEIGHT_SHARE: f32 = 0.6;

const MOBILE_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Whether a user agent string looks like a phone or tablet
pub fn is_mobile(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_TOKENS.iter().any(|token| ua.contains(token))
}

/// Input profile for a user agent
pub fn profile_for(user_agent: &str) -> InputProfile {
    if is_mobile(user_agent) {
        InputProfile::Touch
    } else {
        InputProfile::Desktop
    }
}

/// Largest 4:3 field that fits the container width and the height budget.
///
/// Both sides are floored to whole pixels so the simulation bounds match the
/// integer canvas size.
pub fn fit_field(container_width: f32, window_height: f32) -> Field {
    let max_height = window_height * FIELD_HEIGHT_SHARE;
    let mut width = container_width;
    let mut height = width / FIELD_ASPECT;

    if height > max_height {
        height = max_height;
        width = height * FIELD_ASPECT;
    }

    Field::new(width.floor(), height.floor())
}
