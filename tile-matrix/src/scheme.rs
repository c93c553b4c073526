//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile schemes

use crate::dimensions::{TileCoordinate, TileMatrixDimensions};
use crate::error::{Result, TileMatrixError};
use crate::origin::TileOrigin;
use std::ops::RangeInclusive;

/// Mapping of zoom levels to tile matrix dimensions
pub trait TileScheme: Send + Sync {
    /// Tile matrix dimensions at `zoom_level`
    fn dimensions(&self, zoom_level: i32) -> Result<TileMatrixDimensions>;
    /// Corner of tile (0, 0)
    fn origin(&self) -> TileOrigin;
    fn minimum_zoom_level(&self) -> i32;
    fn maximum_zoom_level(&self) -> i32;

    fn zoom_levels(&self) -> RangeInclusive<i32> {
        self.minimum_zoom_level()..=self.maximum_zoom_level()
    }
    fn contains_zoom_level(&self, zoom_level: i32) -> bool {
        self.zoom_levels().contains(&zoom_level)
    }
}

/// Tile scheme doubling width and height with every zoom level
#[derive(Clone, Debug)]
pub struct ZoomTimesTwo {
    minimum_zoom_level: i32,
    maximum_zoom_level: i32,
    origin: TileOrigin,
    /// Dimensions for each zoom level, starting at the minimum zoom level
    zoom_level_dimensions: Vec<TileMatrixDimensions>,
}

impl ZoomTimesTwo {
    /// Tile scheme with `initial_width` x `initial_height` tiles at `minimum_zoom_level`.
    ///
    /// All zoom levels are calculated in advance, so a scheme which would overflow
    /// tile numbering at its maximum zoom level is rejected here.
    pub fn new(
        minimum_zoom_level: i32,
        maximum_zoom_level: i32,
        initial_width: i32,
        initial_height: i32,
        origin: impl Into<Option<TileOrigin>>,
    ) -> Result<ZoomTimesTwo> {
        if initial_width < 1 {
            return Err(TileMatrixError::InvalidWidth(initial_width));
        }
        if initial_height < 1 {
            return Err(TileMatrixError::InvalidHeight(initial_height));
        }
        if minimum_zoom_level < 0 {
            return Err(TileMatrixError::NegativeMinimumZoomLevel(minimum_zoom_level));
        }
        if maximum_zoom_level < 0 {
            return Err(TileMatrixError::NegativeMaximumZoomLevel(maximum_zoom_level));
        }
        if minimum_zoom_level >= maximum_zoom_level {
            return Err(TileMatrixError::ZoomLevelOrder {
                minimum: minimum_zoom_level,
                maximum: maximum_zoom_level,
            });
        }
        let origin = origin.into().ok_or(TileMatrixError::MissingOrigin)?;
        if overflows(initial_width, maximum_zoom_level) {
            return Err(TileMatrixError::WidthOverflow {
                initial_width,
                maximum_zoom_level,
            });
        }
        if overflows(initial_height, maximum_zoom_level) {
            return Err(TileMatrixError::HeightOverflow {
                initial_height,
                maximum_zoom_level,
            });
        }
        Ok(ZoomTimesTwo::precompute(
            minimum_zoom_level,
            maximum_zoom_level,
            initial_width,
            initial_height,
            origin,
        ))
    }

    /// Web Mercator (XYZ) scheme: one tile at zoom level 0
    pub fn web_mercator() -> ZoomTimesTwo {
        ZoomTimesTwo::precompute(0, 22, 1, 1, TileOrigin::UpperLeft)
    }

    /// TMS scheme: one tile at zoom level 0, numbered from the lower left corner
    pub fn tms() -> ZoomTimesTwo {
        ZoomTimesTwo::precompute(0, 22, 1, 1, TileOrigin::LowerLeft)
    }

    /// Geodetic scheme: two tiles side by side at zoom level 0
    pub fn global_geodetic() -> ZoomTimesTwo {
        ZoomTimesTwo::precompute(0, 21, 2, 1, TileOrigin::UpperLeft)
    }

    // Arguments must have been validated
    fn precompute(
        minimum_zoom_level: i32,
        maximum_zoom_level: i32,
        initial_width: i32,
        initial_height: i32,
        origin: TileOrigin,
    ) -> ZoomTimesTwo {
        let zoom_level_dimensions = (0..=maximum_zoom_level - minimum_zoom_level)
            .map(|level| TileMatrixDimensions {
                width: initial_width << level,
                height: initial_height << level,
            })
            .collect();
        ZoomTimesTwo {
            minimum_zoom_level,
            maximum_zoom_level,
            origin,
            zoom_level_dimensions,
        }
    }

    /// Dimensions at the minimum zoom level
    pub fn initial_dimensions(&self) -> TileMatrixDimensions {
        self.zoom_level_dimensions[0]
    }
}

/// `initial * 2^maximum_zoom_level` exceeds the tile numbering range
fn overflows(initial: i32, maximum_zoom_level: i32) -> bool {
    if maximum_zoom_level >= 31 {
        return true;
    }
    (i64::from(initial) << maximum_zoom_level) > i64::from(i32::MAX)
}

impl TileScheme for ZoomTimesTwo {
    fn dimensions(&self, zoom_level: i32) -> Result<TileMatrixDimensions> {
        if !self.contains_zoom_level(zoom_level) {
            return Err(TileMatrixError::ZoomLevelOutOfRange {
                zoom_level,
                minimum: self.minimum_zoom_level,
                maximum: self.maximum_zoom_level,
            });
        }
        Ok(self.zoom_level_dimensions[(zoom_level - self.minimum_zoom_level) as usize])
    }
    fn origin(&self) -> TileOrigin {
        self.origin
    }
    fn minimum_zoom_level(&self) -> i32 {
        self.minimum_zoom_level
    }
    fn maximum_zoom_level(&self) -> i32 {
        self.maximum_zoom_level
    }
}

/// Tile address with zoom level and origin
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct AbsoluteTileCoordinate {
    pub column: i32,
    pub row: i32,
    pub zoom_level: i32,
    pub origin: TileOrigin,
}

impl AbsoluteTileCoordinate {
    pub fn new(column: i32, row: i32, zoom_level: i32, origin: TileOrigin) -> Self {
        AbsoluteTileCoordinate {
            column,
            row,
            zoom_level,
            origin,
        }
    }
    pub fn tile(&self) -> TileCoordinate {
        TileCoordinate::new(self.column, self.row)
    }
    /// Same tile numbered from corner `to`, using the matrix size of `scheme` at this zoom level
    pub fn transform(
        &self,
        to: TileOrigin,
        scheme: &dyn TileScheme,
    ) -> Result<AbsoluteTileCoordinate> {
        let dimensions = scheme.dimensions(self.zoom_level)?;
        let tile = self.origin.transform(to, self.tile(), dimensions);
        Ok(AbsoluteTileCoordinate::new(
            tile.column,
            tile.row,
            self.zoom_level,
            to,
        ))
    }
}
