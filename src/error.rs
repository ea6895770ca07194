//! Error types for layout, configuration and row loading.

/// Errors surfaced by a layout pass or by configuration setters.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The tree source broke the traversal contract.
    #[error("tree source protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// A configuration value was rejected before any layout ran.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

/// Ways a tree source can fall out of step with the layout queue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolViolation {
    /// The source ran dry while rectangles were still waiting for a node.
    #[error("source exhausted at depth {depth} with {pending} rectangle(s) still pending")]
    SourceExhausted { depth: usize, pending: usize },

    /// The source kept yielding after every rectangle had been consumed.
    #[error("source yielded {extra} node(s) after the layout queue drained")]
    UnconsumedNodes { extra: usize },

    /// Labels, weights and values of one node disagree in length.
    #[error("misaligned node at depth {depth}: {labels} labels, {weights} weights, {values} values")]
    MisalignedFrame {
        depth: usize,
        labels: usize,
        weights: usize,
        values: usize,
    },

    /// A weight was negative, NaN or infinite.
    #[error("invalid weight {value} at depth {depth}, index {index}")]
    InvalidWeight { depth: usize, index: usize, value: f64 },
}

/// Configuration values rejected at assignment time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown style '{0}' (expected 'classic' or 'clustered')")]
    UnknownStyle(String),

    #[error("render depth {requested} exceeds the source's max depth {max}")]
    RenderDepthOutOfRange { requested: usize, max: usize },

    #[error("line height {value} for depth {depth} must be finite and non-negative")]
    InvalidLineHeight { depth: usize, value: f64 },

    #[error("padding {0} must be finite and non-negative")]
    InvalidPadding(f64),

    #[error("frame margin {0} must be finite and non-negative")]
    InvalidFrameMargin(f64),

    #[error("color range [{low}, {high}] must be finite with low < high")]
    InvalidColorRange { low: f64, high: f64 },
}

/// Errors produced while parsing tabular pivot rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("line {line}: expected 3 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: empty group path")]
    EmptyPath { line: usize },

    #[error("line {line}: cannot parse {field} '{text}'")]
    Number {
        line: usize,
        field: &'static str,
        text: String,
    },

    #[error("line {line}: weight {value} must be finite and non-negative")]
    NegativeWeight { line: usize, value: f64 },
}
