/// Default pen color for a stroke.
pub const DEFAULT_PEN_COLOR: &str = "black";

/// Default dot size. Zero means "use the midpoint of min/max width".
pub const DEFAULT_DOT_SIZE: f64 = 0.0;

/// Default minimum line width.
pub const DEFAULT_MIN_WIDTH: f64 = 0.5;

/// Default maximum line width.
pub const DEFAULT_MAX_WIDTH: f64 = 2.5;

/// Default low-pass weight applied to the newest velocity sample.
pub const DEFAULT_VELOCITY_FILTER_WEIGHT: f64 = 0.7;

/// Default composite operation, carried through for the consuming renderer.
pub const DEFAULT_COMPOSITE_OPERATION: &str = "source-over";

/// Pressure assigned to points that do not report one.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// Maximum number of points held by the fitting window.
pub const WINDOW_CAPACITY: usize = 4;

/// Multiplier from internal width units to the SVG stroke-width attribute.
pub const STROKE_WIDTH_SCALE: f64 = 2.25;

/// Media type prefix of the encoded output.
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";
