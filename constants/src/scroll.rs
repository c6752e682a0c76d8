/// Intersection thresholds the visibility observer reports at.
pub const VISIBILITY_THRESHOLDS: [f64; 6] = [0.0, 0.1, 0.25, 0.5, 0.75, 1.0];

/// Shrinks the observed root slightly at the bottom so sections trigger a little earlier.
pub const VISIBILITY_ROOT_MARGIN: &str = "0px 0px -5% 0px";

/// Elements the visibility observer tracks.
pub const OBSERVED_SELECTOR: &str = ".timeline-item, .skill-item, .hero";

pub const TIMELINE_VISIBLE_RATIO: f32 = 0.1;
pub const TIMELINE_OPACITY_GAIN: f32 = 1.5;

pub const SKILL_VISIBLE_RATIO: f32 = 0.4;
pub const SKILL_SCALE_GAIN: f32 = 1.2;

/// Hero 3D container slides this far (px) while the hero leaves the screen.
pub const HERO_PARALLAX_TRAVEL_PX: f32 = 100.0;

/// Hero background offset per pixel scrolled.
pub const PARALLAX_RATE: f32 = -0.5;

/// Radians of model rotation per pixel scrolled.
pub const SCROLL_ROTATION_FACTOR: f32 = 0.01;

/// Fraction of the viewport height, from the top, used as the nav probe point.
pub const NAV_PROBE_FRACTION: f32 = 1.0 / 3.0;

/// Time a clicked nav link stays pinned before scrolling may move the highlight again.
pub const NAV_CLICK_COOLDOWN_SECS: f64 = 2.0;

pub const NAV_LINK_SELECTOR: &str = ".nav-links a[href^=\"#\"]";
pub const NAV_ACTIVE_CLASS: &str = "active";

/// How long an `animate-*` pulse class stays on an element.
pub const PULSE_DURATION_SECS: f32 = 1.0;

pub const VISIBLE_CLASS: &str = "visible";
pub const LOADED_CLASS: &str = "loaded";
