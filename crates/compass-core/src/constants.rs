//! Layout and estimation constants shared by the estimator and the dial.

// ============================================================================
// Orientation estimation
// ============================================================================

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Below this fraction of g² the device is treated as being in free fall.
pub const FREE_FALL_GRAVITY_FRACTION: f32 = 0.01;

/// Minimum norm of the horizontal field (E × A) for a usable rotation matrix.
pub const MIN_HORIZONTAL_FIELD_NORM: f32 = 0.1;

// ============================================================================
// Dial layout
// ============================================================================

/// Gap between the surface edge and the outer dial circle.
pub const DIAL_MARGIN_PX: i32 = 2;

/// Extra space added to the text height to get the heading ring width.
pub const RING_TEXT_MARGIN_PX: f32 = 4.0;

/// String whose rendered width is used as the label text height.
pub const TEXT_HEIGHT_PROBE: &str = "yY";

/// Size used when the host leaves the view size unspecified.
pub const DEFAULT_VIEW_SIZE_PX: u32 = 200;

/// Alpha applied to the marker color.
pub const MARKER_ALPHA: u8 = 200;

// ============================================================================
// Horizon and pitch ladder
// ============================================================================

/// Pitch is folded into `[-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG]`.
pub const PITCH_LIMIT_DEG: f32 = 90.0;

/// Pitch degrees covered by one inner radius.
pub const PITCH_DEGREES_PER_INNER_RADIUS: f32 = 45.0;

/// Spacing of pitch ladder rungs.
pub const PITCH_LADDER_STEP_DEG: i32 = 10;

/// Pitch ladder rung half-width as a fraction of the dial radius (radius / 3).
pub const PITCH_RUNG_RADIUS_DIVISOR: i32 = 3;

/// Horizon bar half-width as a fraction of the dial radius (radius / 2).
pub const HORIZON_BAR_RADIUS_DIVISOR: i32 = 2;

/// Roll pointer chevron half-width.
pub const ROLL_POINTER_HALF_WIDTH_PX: f32 = 3.0;

/// Roll pointer tip offset below the inner circle top.
pub const ROLL_POINTER_TIP_PX: f32 = 10.0;

/// Roll pointer tail offset below the inner circle top.
pub const ROLL_POINTER_TAIL_PX: f32 = 14.0;

/// Gap between the roll readout baseline and one text height.
pub const ROLL_TEXT_GAP_PX: f32 = 2.0;

// ============================================================================
// Roll scale
// ============================================================================

/// Roll is folded into `[-ROLL_LIMIT_DEG, ROLL_LIMIT_DEG]`.
pub const ROLL_LIMIT_DEG: f32 = 180.0;

/// Angular spacing of roll scale marks.
pub const ROLL_SCALE_STEP_DEG: i32 = 10;

/// Roll scale marks at multiples of this get a numeric label.
pub const ROLL_LABEL_EVERY_DEG: i32 = 30;

/// Length of unlabeled roll scale ticks.
pub const ROLL_TICK_LENGTH_PX: f32 = 5.0;

// ============================================================================
// Heading ring
// ============================================================================

/// Angular width of one compass sector.
pub const HEADING_INCREMENT_DEG: f64 = 22.5;

/// Length of heading ticks drawn between labels.
pub const HEADING_TICK_LENGTH_PX: f32 = 3.0;

/// Baseline gap between a ring edge and its labels.
pub const LABEL_BASELINE_GAP_PX: f32 = 1.0;
