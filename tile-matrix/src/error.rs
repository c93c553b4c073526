//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Error types

use thiserror::Error;

/// Result type alias using TileMatrixError.
pub type Result<T> = std::result::Result<T, TileMatrixError>;

/// Error category
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ErrorKind {
    /// Malformed, missing or out-of-domain input
    InvalidArgument,
    /// A computed tile matrix dimension exceeds the integer range
    ArithmeticOverflow,
}

#[derive(PartialEq, Clone, Debug, Error)]
pub enum TileMatrixError {
    #[error("Tile matrix width must be greater than 0, got {0}")]
    InvalidWidth(i32),

    #[error("Tile matrix height must be greater than 0, got {0}")]
    InvalidHeight(i32),

    #[error("Minimum zoom level must be at least 0, got {0}")]
    NegativeMinimumZoomLevel(i32),

    #[error("Maximum zoom level must be at least 0, got {0}")]
    NegativeMaximumZoomLevel(i32),

    #[error("Minimum zoom level {minimum} must be less than the maximum zoom level {maximum}")]
    ZoomLevelOrder { minimum: i32, maximum: i32 },

    #[error("Tile origin may not be absent")]
    MissingOrigin,

    #[error("Initial width {initial_width} at maximum zoom level {maximum_zoom_level} overflows tile numbering")]
    WidthOverflow {
        initial_width: i32,
        maximum_zoom_level: i32,
    },

    #[error("Initial height {initial_height} at maximum zoom level {maximum_zoom_level} overflows tile numbering")]
    HeightOverflow {
        initial_height: i32,
        maximum_zoom_level: i32,
    },

    #[error("Zoom level {zoom_level} must be in the range [{minimum}, {maximum}]")]
    ZoomLevelOutOfRange {
        zoom_level: i32,
        minimum: i32,
        maximum: i32,
    },

    #[error("Tile ({column}, {row}) is outside the {width}x{height} tile matrix")]
    TileOutOfRange {
        column: i32,
        row: i32,
        width: i32,
        height: i32,
    },

    #[error("Coordinate reference system {actual} does not match {expected}")]
    CrsMismatch { expected: String, actual: String },

    #[error("Coordinate ({x}, {y}) is outside of the bounds")]
    CoordinateOutOfBounds { x: f64, y: f64 },

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid coordinate reference system: {0}")]
    InvalidCrs(String),

    #[error("Unsupported coordinate reference system {0}")]
    UnsupportedCrs(String),

    #[error("Unexpected tile origin '{0}'")]
    UnknownOrigin(String),
}

impl TileMatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TileMatrixError::WidthOverflow { .. } | TileMatrixError::HeightOverflow { .. } => {
                ErrorKind::ArithmeticOverflow
            }
            _ => ErrorKind::InvalidArgument,
        }
    }
}
