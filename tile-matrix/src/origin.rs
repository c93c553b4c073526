//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile matrix origins

use crate::dimensions::{TileCoordinate, TileMatrixDimensions};
use crate::error::TileMatrixError;
use std::fmt;
use std::str::FromStr;

/// Corner of the tile matrix numbered (0, 0)
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum TileOrigin {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl TileOrigin {
    pub const ALL: [TileOrigin; 4] = [
        TileOrigin::UpperLeft,
        TileOrigin::UpperRight,
        TileOrigin::LowerLeft,
        TileOrigin::LowerRight,
    ];

    /// Direction of increasing column numbers (+1: eastward, -1: westward)
    pub const fn delta_x(self) -> i32 {
        match self {
            TileOrigin::UpperLeft | TileOrigin::LowerLeft => 1,
            TileOrigin::UpperRight | TileOrigin::LowerRight => -1,
        }
    }

    /// Direction of increasing row numbers (+1: northward, -1: southward)
    pub const fn delta_y(self) -> i32 {
        match self {
            TileOrigin::LowerLeft | TileOrigin::LowerRight => 1,
            TileOrigin::UpperLeft | TileOrigin::UpperRight => -1,
        }
    }

    /// Express a tile coordinate numbered from this corner in the numbering of `to`.
    ///
    /// Coordinates outside of `dimensions` are not rejected, they are flipped like any other.
    pub fn transform(
        self,
        to: TileOrigin,
        coordinate: TileCoordinate,
        dimensions: TileMatrixDimensions,
    ) -> TileCoordinate {
        TileCoordinate {
            column: self.transform_horizontal(to, coordinate.column, dimensions.width()),
            row: self.transform_vertical(to, coordinate.row, dimensions.height()),
        }
    }

    /// Transform a column in a matrix `width` tiles wide
    pub fn transform_horizontal(self, to: TileOrigin, column: i32, width: i32) -> i32 {
        flip(self.delta_x() * to.delta_x() < 0, column, width)
    }

    /// Transform a row in a matrix `height` tiles high
    pub fn transform_vertical(self, to: TileOrigin, row: i32, height: i32) -> i32 {
        flip(self.delta_y() * to.delta_y() < 0, row, height)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            TileOrigin::UpperLeft => "UpperLeft",
            TileOrigin::UpperRight => "UpperRight",
            TileOrigin::LowerLeft => "LowerLeft",
            TileOrigin::LowerRight => "LowerRight",
        }
    }
}

fn flip(flipped: bool, index: i32, dimension: i32) -> i32 {
    if flipped {
        dimension.wrapping_sub(1).wrapping_sub(index)
    } else {
        index
    }
}

impl FromStr for TileOrigin {
    type Err = TileMatrixError;

    fn from_str(val: &str) -> Result<TileOrigin, TileMatrixError> {
        match val {
            "UpperLeft" | "TopLeft" => Ok(TileOrigin::UpperLeft),
            "UpperRight" | "TopRight" => Ok(TileOrigin::UpperRight),
            "LowerLeft" | "BottomLeft" => Ok(TileOrigin::LowerLeft),
            "LowerRight" | "BottomRight" => Ok(TileOrigin::LowerRight),
            _ => Err(TileMatrixError::UnknownOrigin(val.to_string())),
        }
    }
}

impl fmt::Display for TileOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
