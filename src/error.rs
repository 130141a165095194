use thiserror::Error;

/// Coordinate axis, used to report which side of the data collapsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Everything that can stop a diagram from being built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
    #[error("point set is empty")]
    EmptyInput,
    #[error("point table must start with an `x,y` header")]
    MissingHeader,
    #[error("malformed row on line {line}: {content:?}")]
    MalformedRow { line: usize, content: String },
    #[error("all points share a single {axis} value; the diagram needs a spread on both axes")]
    DegenerateBounds { axis: Axis },
    #[error("point #{index} at ({x}, {y}) has no Voronoi cell inside the canvas")]
    UnresolvedCell { index: usize, x: f64, y: f64 },
}

impl DiagramError {
    /// Problems with the user supplied point table.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DiagramError::EmptyInput
                | DiagramError::MissingHeader
                | DiagramError::MalformedRow { .. }
                | DiagramError::DegenerateBounds { .. }
        )
    }

    /// A real point could not be matched to a cell after clipping.
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, DiagramError::UnresolvedCell { .. })
    }
}
