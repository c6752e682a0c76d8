/// Journey background anchors, in scroll order: education, work, current.
pub const JOURNEY_ANCHORS: [[u8; 3]; 3] = [
    [25, 35, 80], // #192350
    [80, 25, 50], // #501932
    [25, 80, 70], // #195046
];

/// Page background outside the journey section (#0f172a).
pub const DEFAULT_BACKGROUND: [u8; 3] = [0x0f, 0x17, 0x2a];

/// CSS variable the page stylesheet reads its background from.
pub const BACKGROUND_CSS_VARIABLE: &str = "--bg-color";

/// How far (CSS px) before and after the journey section the colour blend extends.
pub const JOURNEY_MARGIN_PX: f32 = 300.0;

/// Inline style of the scroll progress bar created at start-up.
pub const PROGRESS_BAR_STYLE: &str = "position: fixed; top: 0; left: 0; width: 0%; height: 3px; \
     background: linear-gradient(90deg, #3b82f6, #10b981, #f59e0b); \
     z-index: 1000; transition: width 0.1s ease;";

pub const PROGRESS_BAR_CLASS: &str = "scroll-progress";
