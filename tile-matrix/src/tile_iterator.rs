//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile limits and iterators

use crate::crs::{CrsBounds, Extent};
use crate::error::Result;
use crate::origin::TileOrigin;
use crate::scheme::{AbsoluteTileCoordinate, TileScheme};
use crate::transform::{check_extent, tile_size};

/// Min and max tile numbers of one zoom level (max exclusive)
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TileLimits {
    pub zoom_level: i32,
    pub min_column: i32,
    pub min_row: i32,
    pub max_column: i32,
    pub max_row: i32,
}

impl TileLimits {
    pub fn is_empty(&self) -> bool {
        self.min_column >= self.max_column || self.min_row >= self.max_row
    }
    /// Number of tiles within the limits
    pub fn count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.max_column - self.min_column) as u64 * (self.max_row - self.min_row) as u64
        }
    }
}

/// Tile limits covering `area` for every zoom level of `scheme`
pub fn tile_limits(
    scheme: &dyn TileScheme,
    bounds: &CrsBounds,
    area: &Extent,
) -> Result<Vec<TileLimits>> {
    const EPSILON: f64 = 0.0000001;
    let extent = &bounds.extent;
    check_extent(extent)?;
    area.validate()?;
    let origin = scheme.origin();
    // Distances of the area edges from the origin corner
    let (near_x, far_x) = if origin.delta_x() > 0 {
        (area.minx - extent.minx, area.maxx - extent.minx)
    } else {
        (extent.maxx - area.maxx, extent.maxx - area.minx)
    };
    let (near_y, far_y) = if origin.delta_y() > 0 {
        (area.miny - extent.miny, area.maxy - extent.miny)
    } else {
        (extent.maxy - area.maxy, extent.maxy - area.miny)
    };
    scheme
        .zoom_levels()
        .map(|zoom_level| {
            let dimensions = scheme.dimensions(zoom_level)?;
            let (tile_width, tile_height) = tile_size(extent, dimensions);
            Ok(TileLimits {
                zoom_level,
                min_column: ((near_x / tile_width + EPSILON).floor() as i32).max(0),
                max_column: ((far_x / tile_width - EPSILON).ceil() as i32)
                    .min(dimensions.width()),
                min_row: ((near_y / tile_height + EPSILON).floor() as i32).max(0),
                max_row: ((far_y / tile_height - EPSILON).ceil() as i32).min(dimensions.height()),
            })
        })
        .collect()
}

/// Level-by-level iterator
pub struct TileIterator {
    levels: Vec<TileLimits>,
    level: usize,
    column: i32,
    row: i32,
    origin: TileOrigin,
}

impl TileIterator {
    pub fn new(minz: i32, maxz: i32, limits: Vec<TileLimits>, origin: TileOrigin) -> TileIterator {
        let levels: Vec<TileLimits> = if minz <= maxz {
            limits
                .into_iter()
                .filter(|l| l.zoom_level >= minz && l.zoom_level <= maxz && !l.is_empty())
                .collect()
        } else {
            // "empty" iterator for invalid parameters
            Vec::new()
        };
        let (column, row) = levels
            .first()
            .map(|l| (l.min_column, l.min_row))
            .unwrap_or((0, 0));
        TileIterator {
            levels,
            level: 0,
            column,
            row,
            origin,
        }
    }
}

impl Iterator for TileIterator {
    type Item = AbsoluteTileCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let limit = *self.levels.get(self.level)?;
        let current =
            AbsoluteTileCoordinate::new(self.column, self.row, limit.zoom_level, self.origin);
        if self.row < limit.max_row - 1 {
            self.row += 1;
        } else if self.column < limit.max_column - 1 {
            self.column += 1;
            self.row = limit.min_row;
        } else {
            self.level += 1;
            if let Some(next) = self.levels.get(self.level) {
                self.column = next.min_column;
                self.row = next.min_row;
            }
        }
        Some(current)
    }
}

#[cfg(test)]
fn cells(iter: TileIterator) -> Vec<(i32, i32, i32)> {
    iter.map(|t| (t.zoom_level, t.column, t.row)).collect()
}

#[test]
fn test_mercator_iter() {
    use crate::profile::{CrsProfile, SphericalMercator};
    use crate::scheme::ZoomTimesTwo;

    let scheme = ZoomTimesTwo::web_mercator();
    let bounds = SphericalMercator.bounds();
    let limits = tile_limits(&scheme, &bounds, &bounds.extent).unwrap();
    assert_eq!(limits.len(), 23);
    assert_eq!(limits[10].count(), 1024 * 1024);

    let griditer = TileIterator::new(0, 2, limits.clone(), scheme.origin());
    assert_eq!(
        cells(griditer),
        vec![
            (0, 0, 0),
            (1, 0, 0),
            (1, 0, 1),
            (1, 1, 0),
            (1, 1, 1),
            (2, 0, 0),
            (2, 0, 1),
            (2, 0, 2),
            (2, 0, 3),
            (2, 1, 0),
            (2, 1, 1),
            (2, 1, 2),
            (2, 1, 3),
            (2, 2, 0),
            (2, 2, 1),
            (2, 2, 2),
            (2, 2, 3),
            (2, 3, 0),
            (2, 3, 1),
            (2, 3, 2),
            (2, 3, 3)
        ]
    );

    let griditer = TileIterator::new(0, 0, limits, scheme.origin());
    let tiles = griditer.collect::<Vec<_>>();
    assert_eq!(
        tiles,
        vec![AbsoluteTileCoordinate::new(0, 0, 0, TileOrigin::UpperLeft)]
    );
}

#[test]
fn test_limits_by_origin() {
    use crate::crs::CoordinateReferenceSystem;
    use crate::scheme::ZoomTimesTwo;

    let bounds = CrsBounds::new(
        CoordinateReferenceSystem::epsg(4326),
        Extent {
            minx: 0.0,
            miny: 0.0,
            maxx: 8.0,
            maxy: 8.0,
        },
    );
    // lower left quarter of the extent
    let area = Extent {
        minx: 0.0,
        miny: 0.0,
        maxx: 4.0,
        maxy: 4.0,
    };

    let scheme = ZoomTimesTwo::new(0, 3, 1, 1, TileOrigin::LowerLeft).unwrap();
    let limits = tile_limits(&scheme, &bounds, &area).unwrap();
    assert_eq!(
        limits[2],
        TileLimits {
            zoom_level: 2,
            min_column: 0,
            min_row: 0,
            max_column: 2,
            max_row: 2,
        }
    );

    let scheme = ZoomTimesTwo::new(0, 3, 1, 1, TileOrigin::UpperRight).unwrap();
    let limits = tile_limits(&scheme, &bounds, &area).unwrap();
    assert_eq!(
        limits[2],
        TileLimits {
            zoom_level: 2,
            min_column: 2,
            min_row: 2,
            max_column: 4,
            max_row: 4,
        }
    );
    assert_eq!(limits[0].count(), 1);
    assert_eq!(limits[3].count(), 16);
}

#[test]
fn test_area_outside_bounds() {
    use crate::crs::CoordinateReferenceSystem;
    use crate::scheme::ZoomTimesTwo;

    let bounds = CrsBounds::new(
        CoordinateReferenceSystem::epsg(4326),
        Extent {
            minx: 0.0,
            miny: 0.0,
            maxx: 8.0,
            maxy: 8.0,
        },
    );
    let area = Extent {
        minx: 10.0,
        miny: 10.0,
        maxx: 12.0,
        maxy: 12.0,
    };
    let scheme = ZoomTimesTwo::tms();
    let limits = tile_limits(&scheme, &bounds, &area).unwrap();
    assert!(limits.iter().all(|l| l.is_empty()));
    let griditer = TileIterator::new(0, 22, limits, scheme.origin());
    assert_eq!(griditer.count(), 0);
}

#[test]
fn test_bad_params() {
    // missing tile limits
    let griditer = TileIterator::new(0, 10, Vec::new(), TileOrigin::UpperLeft);
    assert_eq!(cells(griditer), vec![]);

    let limits = vec![
        TileLimits {
            zoom_level: 0,
            min_column: 0,
            min_row: 0,
            max_column: 1,
            max_row: 1,
        },
        TileLimits {
            zoom_level: 1,
            min_column: 0,
            min_row: 0,
            max_column: 2,
            max_row: 2,
        },
    ];

    // minz > maxz
    let griditer = TileIterator::new(3, 2, limits.clone(), TileOrigin::UpperLeft);
    assert_eq!(cells(griditer), vec![]);

    // maxz beyond limits
    let griditer = TileIterator::new(0, 2, limits.clone(), TileOrigin::UpperLeft);
    assert_eq!(
        cells(griditer),
        vec![(0, 0, 0), (1, 0, 0), (1, 0, 1), (1, 1, 0), (1, 1, 1)]
    );

    // minz beyond limits
    let griditer = TileIterator::new(2, 3, limits, TileOrigin::UpperLeft);
    assert_eq!(cells(griditer), vec![]);
}
