//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Conversion between CRS coordinates and tile coordinates

use crate::crs::{Coordinate, CrsBounds, CrsCoordinate, Extent};
use crate::dimensions::{TileCoordinate, TileMatrixDimensions};
use crate::error::{Result, TileMatrixError};
use crate::origin::TileOrigin;

/// Width and height of a single tile in CRS units
pub fn tile_size(extent: &Extent, dimensions: TileMatrixDimensions) -> (f64, f64) {
    (
        extent.width() / dimensions.width() as f64,
        extent.height() / dimensions.height() as f64,
    )
}

pub(crate) fn check_extent(extent: &Extent) -> Result<()> {
    extent.validate()?;
    if extent.width() <= 0.0 || extent.height() <= 0.0 {
        return Err(TileMatrixError::InvalidBounds(format!(
            "{} has no area",
            extent
        )));
    }
    Ok(())
}

/// Tolerance in tile units for a distance to count as lying on a tile boundary
const EPSILON: f64 = 0.0000001;

/// Number of whole tiles in `distance`, snapped onto a boundary within `EPSILON`
fn cell_index(distance: f64, size: f64) -> i32 {
    let cells = distance / size;
    let nearest = cells.round();
    if (cells - nearest).abs() < EPSILON {
        nearest as i32
    } else {
        cells.floor() as i32
    }
}

/// Tile of `point`, measured from the corner of `extent` at `origin` and clamped to the matrix
pub(crate) fn tile_index(
    point: Coordinate,
    extent: &Extent,
    dimensions: TileMatrixDimensions,
    origin: TileOrigin,
) -> TileCoordinate {
    let corner = extent.corner(origin);
    let (tile_width, tile_height) = tile_size(extent, dimensions);
    let column = cell_index((point.x - corner.x).abs(), tile_width);
    let row = cell_index((point.y - corner.y).abs(), tile_height);
    TileCoordinate {
        column: column.max(0).min(dimensions.width() - 1),
        row: row.max(0).min(dimensions.height() - 1),
    }
}

/// Offset `columns`/`rows` tiles from the corner of `extent` at `origin`
fn tile_corner(
    columns: i32,
    rows: i32,
    extent: &Extent,
    dimensions: TileMatrixDimensions,
    origin: TileOrigin,
) -> Coordinate {
    let corner = extent.corner(origin);
    let (tile_width, tile_height) = tile_size(extent, dimensions);
    Coordinate::new(
        corner.x + (origin.delta_x() * columns) as f64 * tile_width,
        corner.y + (origin.delta_y() * rows) as f64 * tile_height,
    )
}

fn check_tile(tile: TileCoordinate, dimensions: TileMatrixDimensions) -> Result<()> {
    if !dimensions.contains_tile(tile) {
        return Err(TileMatrixError::TileOutOfRange {
            column: tile.column,
            row: tile.row,
            width: dimensions.width(),
            height: dimensions.height(),
        });
    }
    Ok(())
}

/// Tile containing `coordinate`, numbered from `origin`.
///
/// The tile index along each axis is the distance from the extent corner at `origin`
/// divided by the tile size, floored. For coordinates inside a tile this is the same as
/// numbering from the upper left corner and transforming to `origin`. A coordinate on a
/// tile boundary belongs to the tile whose origin-facing edge it touches. Distances
/// within a ten-millionth of a tile from a boundary count as on the boundary, so the
/// corners returned by [`tile_to_crs`] map back to their own tile.
pub fn crs_to_tile(
    coordinate: &CrsCoordinate,
    bounds: &CrsBounds,
    dimensions: TileMatrixDimensions,
    origin: TileOrigin,
) -> Result<TileCoordinate> {
    if coordinate.crs != bounds.crs {
        return Err(TileMatrixError::CrsMismatch {
            expected: bounds.crs.to_string(),
            actual: coordinate.crs.to_string(),
        });
    }
    let extent = &bounds.extent;
    check_extent(extent)?;
    let point = coordinate.coordinate();
    if !extent.contains_for_origin(point, origin) {
        return Err(TileMatrixError::CoordinateOutOfBounds {
            x: point.x,
            y: point.y,
        });
    }
    Ok(tile_index(point, extent, dimensions, origin))
}

/// Corner of `tile` facing `origin`, e.g. the upper left corner for `TileOrigin::UpperLeft`.
pub fn tile_to_crs(
    tile: TileCoordinate,
    bounds: &CrsBounds,
    dimensions: TileMatrixDimensions,
    origin: TileOrigin,
) -> Result<CrsCoordinate> {
    check_tile(tile, dimensions)?;
    let extent = &bounds.extent;
    check_extent(extent)?;
    let corner = tile_corner(tile.column, tile.row, extent, dimensions, origin);
    Ok(CrsCoordinate::new(corner.x, corner.y, bounds.crs.clone()))
}

/// Extent of `tile` in CRS units
///
/// Both edges are offsets from the same extent corner, so neighbouring tiles share them exactly.
pub fn tile_extent(
    tile: TileCoordinate,
    bounds: &CrsBounds,
    dimensions: TileMatrixDimensions,
    origin: TileOrigin,
) -> Result<Extent> {
    check_tile(tile, dimensions)?;
    let extent = &bounds.extent;
    check_extent(extent)?;
    let near = tile_corner(tile.column, tile.row, extent, dimensions, origin);
    let far = tile_corner(tile.column + 1, tile.row + 1, extent, dimensions, origin);
    Ok(Extent {
        minx: near.x.min(far.x),
        miny: near.y.min(far.y),
        maxx: near.x.max(far.x),
        maxy: near.y.max(far.y),
    })
}
