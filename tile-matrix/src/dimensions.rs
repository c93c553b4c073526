//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile matrix dimensions

use crate::error::{Result, TileMatrixError};

/// Number of columns and rows of the tile matrix at one zoom level
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct TileMatrixDimensions {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl TileMatrixDimensions {
    pub fn new(width: i32, height: i32) -> Result<TileMatrixDimensions> {
        if width <= 0 {
            return Err(TileMatrixError::InvalidWidth(width));
        }
        if height <= 0 {
            return Err(TileMatrixError::InvalidHeight(height));
        }
        Ok(TileMatrixDimensions { width, height })
    }
    /// Number of columns
    pub fn width(&self) -> i32 {
        self.width
    }
    /// Number of rows
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= 0 && column < self.width && row >= 0 && row < self.height
    }
    pub fn contains_tile(&self, tile: TileCoordinate) -> bool {
        self.contains(tile.column, tile.row)
    }
}

/// Column and row of a tile, numbered from the origin of its tile matrix
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct TileCoordinate {
    pub column: i32,
    pub row: i32,
}

impl TileCoordinate {
    pub fn new(column: i32, row: i32) -> TileCoordinate {
        TileCoordinate { column, row }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let dimensions = TileMatrixDimensions::new(77, 12).unwrap();
        assert_eq!(dimensions.width(), 77);
        assert_eq!(dimensions.height(), 12);

        assert_eq!(
            TileMatrixDimensions::new(0, 10),
            Err(TileMatrixError::InvalidWidth(0))
        );
        assert_eq!(
            TileMatrixDimensions::new(10, 0),
            Err(TileMatrixError::InvalidHeight(0))
        );
        assert_eq!(
            TileMatrixDimensions::new(-3, -1),
            Err(TileMatrixError::InvalidWidth(-3))
        );
    }

    #[test]
    fn test_contains() {
        let (w, h) = (77, 12);
        let dimensions = TileMatrixDimensions::new(w, h).unwrap();

        assert!(dimensions.contains(0, 0));
        assert!(dimensions.contains(w - 1, h - 1));
        assert!(dimensions.contains(w / 2, h / 2));
        assert!(dimensions.contains_tile(TileCoordinate::new(w - 1, 0)));

        assert!(!dimensions.contains(-1, 0));
        assert!(!dimensions.contains(0, -1));
        assert!(!dimensions.contains(w, 0));
        assert!(!dimensions.contains(0, h));
        assert!(!dimensions.contains(w, h - 1));
        assert!(!dimensions.contains(w - 1, h));
        assert!(!dimensions.contains(i32::MIN, i32::MAX));
    }
}
