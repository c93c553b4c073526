//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Coordinate reference system profiles

use crate::crs::{Coordinate, CoordinateReferenceSystem, CrsBounds, CrsCoordinate, Extent};
use crate::dimensions::{TileCoordinate, TileMatrixDimensions};
use crate::error::{Result, TileMatrixError};
use crate::origin::TileOrigin;
use crate::scheme::TileScheme;
use crate::tile_iterator::{self, TileLimits};
use crate::transform;
use std::f64::consts;
use std::fmt;

pub const EARTH_EQUATORIAL_RADIUS: f64 = 6378137.0;

/// WGS84 inverse flattening
pub const INVERSE_FLATTENING: f64 = 298.257223563;

/// Properties of a coordinate reference system needed for tiling
pub trait CrsProfile: Send + Sync + fmt::Debug {
    fn coordinate_reference_system(&self) -> CoordinateReferenceSystem;
    /// Valid extent of the coordinate reference system
    fn extent(&self) -> Extent;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Number of decimal places that are significant in CRS units
    fn precision(&self) -> i32;
    /// Convert to (longitude, latitude) in degrees
    fn to_global_geodetic(&self, coordinate: Coordinate) -> Coordinate;
    /// Convert from (longitude, latitude) in degrees
    fn from_global_geodetic(&self, coordinate: Coordinate) -> Coordinate;

    fn bounds(&self) -> CrsBounds {
        CrsBounds::new(self.coordinate_reference_system(), self.extent())
    }

    fn crs_to_tile_coordinate(
        &self,
        coordinate: &CrsCoordinate,
        extent: &Extent,
        dimensions: TileMatrixDimensions,
        origin: TileOrigin,
    ) -> Result<TileCoordinate> {
        let bounds = CrsBounds::new(self.coordinate_reference_system(), extent.clone());
        transform::crs_to_tile(coordinate, &bounds, dimensions, origin)
    }

    fn tile_to_crs_coordinate(
        &self,
        tile: TileCoordinate,
        extent: &Extent,
        dimensions: TileMatrixDimensions,
        origin: TileOrigin,
    ) -> Result<CrsCoordinate> {
        let bounds = CrsBounds::new(self.coordinate_reference_system(), extent.clone());
        transform::tile_to_crs(tile, &bounds, dimensions, origin)
    }

    fn tile_extent(
        &self,
        tile: TileCoordinate,
        extent: &Extent,
        dimensions: TileMatrixDimensions,
        origin: TileOrigin,
    ) -> Result<Extent> {
        let bounds = CrsBounds::new(self.coordinate_reference_system(), extent.clone());
        transform::tile_extent(tile, &bounds, dimensions, origin)
    }

    /// Tile limits of `area` for every zoom level of `scheme`
    fn tile_limits(
        &self,
        scheme: &dyn TileScheme,
        extent: &Extent,
        area: &Extent,
    ) -> Result<Vec<TileLimits>> {
        let bounds = CrsBounds::new(self.coordinate_reference_system(), extent.clone());
        tile_iterator::tile_limits(scheme, &bounds, area)
    }
}

/// Spherical (Web) Mercator, EPSG:3857
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalMercator;

impl CrsProfile for SphericalMercator {
    fn coordinate_reference_system(&self) -> CoordinateReferenceSystem {
        CoordinateReferenceSystem::epsg(3857)
    }
    fn extent(&self) -> Extent {
        let max = consts::PI * EARTH_EQUATORIAL_RADIUS;
        Extent {
            minx: -max,
            miny: -max,
            maxx: max,
            maxy: max,
        }
    }
    fn name(&self) -> &'static str {
        "Web Mercator"
    }
    fn description(&self) -> &'static str {
        "Spherical Mercator"
    }
    fn precision(&self) -> i32 {
        2
    }
    fn to_global_geodetic(&self, coordinate: Coordinate) -> Coordinate {
        Coordinate::new(
            (coordinate.x / EARTH_EQUATORIAL_RADIUS).to_degrees(),
            (2.0 * (coordinate.y / EARTH_EQUATORIAL_RADIUS).exp().atan() - consts::FRAC_PI_2)
                .to_degrees(),
        )
    }
    fn from_global_geodetic(&self, coordinate: Coordinate) -> Coordinate {
        let (x, y) = lonlat_to_merc(coordinate.x, coordinate.y);
        Coordinate::new(x, y)
    }
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_EQUATORIAL_RADIUS * lon.to_radians();
    let y = EARTH_EQUATORIAL_RADIUS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Projected extent
pub fn extent_wgs84_to_merc(extent: &Extent) -> Extent {
    let (minx, miny) = lonlat_to_merc(extent.minx, extent.miny);
    let (maxx, maxy) = lonlat_to_merc(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}

/// Geographic WGS84 (longitude, latitude), EPSG:4326
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalGeodetic;

impl CrsProfile for GlobalGeodetic {
    fn coordinate_reference_system(&self) -> CoordinateReferenceSystem {
        CoordinateReferenceSystem::epsg(4326)
    }
    fn extent(&self) -> Extent {
        Extent {
            minx: -180.0,
            miny: -90.0,
            maxx: 180.0,
            maxy: 90.0,
        }
    }
    fn name(&self) -> &'static str {
        "WGS 84"
    }
    fn description(&self) -> &'static str {
        "World Geodetic System 1984"
    }
    fn precision(&self) -> i32 {
        7
    }
    fn to_global_geodetic(&self, coordinate: Coordinate) -> Coordinate {
        coordinate
    }
    fn from_global_geodetic(&self, coordinate: Coordinate) -> Coordinate {
        coordinate
    }
}

/// World (ellipsoidal) Mercator, EPSG:3395
///
/// Tiles are laid out in geodetic space: coordinates and extents are converted to
/// (longitude, latitude) before tiling and tile corners are converted back to meters.
#[derive(Clone, Copy, Debug, Default)]
pub struct EllipsoidalMercator;

impl EllipsoidalMercator {
    const MAX_ITERATIONS: usize = 100;

    pub fn eccentricity() -> f64 {
        let flattening = 1.0 / INVERSE_FLATTENING;
        (flattening * (2.0 - flattening)).sqrt()
    }

    /// Inverse of the northing series, iterated until it stops changing
    fn latitude(meters: f64) -> f64 {
        let eccentricity = Self::eccentricity();
        let conformal = meters / EARTH_EQUATORIAL_RADIUS;
        let mut previous = conformal.tanh();
        let mut next = previous;
        for _ in 0..Self::MAX_ITERATIONS {
            next = (conformal + eccentricity * (eccentricity * previous).atanh()).tanh();
            if (next - previous).abs() <= 1e-20 {
                break;
            }
            previous = next;
        }
        next.asin().to_degrees()
    }

    fn geodetic_extent(&self, extent: &Extent) -> Extent {
        let min = self.to_global_geodetic(Coordinate::new(extent.minx, extent.miny));
        let max = self.to_global_geodetic(Coordinate::new(extent.maxx, extent.maxy));
        Extent {
            minx: min.x,
            miny: min.y,
            maxx: max.x,
            maxy: max.y,
        }
    }

    fn geodetic_bounds(&self, extent: &Extent) -> CrsBounds {
        CrsBounds::new(
            CoordinateReferenceSystem::epsg(4326),
            self.geodetic_extent(extent),
        )
    }

    /// Meters converted back from latitudes may end up just outside `extent`
    fn clamp(coordinate: Coordinate, extent: &Extent) -> Coordinate {
        Coordinate::new(
            coordinate.x.max(extent.minx).min(extent.maxx),
            coordinate.y.max(extent.miny).min(extent.maxy),
        )
    }
}

/// `value` rounded to `precision` decimal places
pub fn round_to_precision(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

fn round_extent(extent: &Extent, precision: i32) -> Extent {
    Extent {
        minx: round_to_precision(extent.minx, precision),
        miny: round_to_precision(extent.miny, precision),
        maxx: round_to_precision(extent.maxx, precision),
        maxy: round_to_precision(extent.maxy, precision),
    }
}

impl CrsProfile for EllipsoidalMercator {
    fn coordinate_reference_system(&self) -> CoordinateReferenceSystem {
        CoordinateReferenceSystem::epsg(3395)
    }
    fn extent(&self) -> Extent {
        // y limits equal x limits so that zoom level 0 is square
        let max = consts::PI * EARTH_EQUATORIAL_RADIUS;
        Extent {
            minx: -max,
            miny: -max,
            maxx: max,
            maxy: max,
        }
    }
    fn name(&self) -> &'static str {
        "World Mercator"
    }
    fn description(&self) -> &'static str {
        "World (Ellipsoidal) Mercator"
    }
    fn precision(&self) -> i32 {
        2
    }
    fn to_global_geodetic(&self, coordinate: Coordinate) -> Coordinate {
        Coordinate::new(
            (coordinate.x / EARTH_EQUATORIAL_RADIUS).to_degrees(),
            Self::latitude(coordinate.y),
        )
    }
    fn from_global_geodetic(&self, coordinate: Coordinate) -> Coordinate {
        let eccentricity = Self::eccentricity();
        let sin_lat = coordinate.y.to_radians().sin();
        Coordinate::new(
            EARTH_EQUATORIAL_RADIUS * coordinate.x.to_radians(),
            EARTH_EQUATORIAL_RADIUS * sin_lat.atanh()
                - EARTH_EQUATORIAL_RADIUS * eccentricity * (eccentricity * sin_lat).atanh(),
        )
    }

    /// Tile containing `coordinate`, tiled in geodetic space.
    ///
    /// Containment is checked with the coordinate and `extent` rounded to the precision of
    /// the profile, so corners that lost a few nanometers on the way through latitudes are
    /// still accepted.
    fn crs_to_tile_coordinate(
        &self,
        coordinate: &CrsCoordinate,
        extent: &Extent,
        dimensions: TileMatrixDimensions,
        origin: TileOrigin,
    ) -> Result<TileCoordinate> {
        let crs = self.coordinate_reference_system();
        if coordinate.crs != crs {
            return Err(TileMatrixError::CrsMismatch {
                expected: crs.to_string(),
                actual: coordinate.crs.to_string(),
            });
        }
        transform::check_extent(extent)?;
        let precision = self.precision();
        let rounded = Coordinate::new(
            round_to_precision(coordinate.x, precision),
            round_to_precision(coordinate.y, precision),
        );
        if !round_extent(extent, precision).contains_for_origin(rounded, origin) {
            return Err(TileMatrixError::CoordinateOutOfBounds {
                x: coordinate.x,
                y: coordinate.y,
            });
        }
        let geodetic = self.to_global_geodetic(coordinate.coordinate());
        Ok(transform::tile_index(
            geodetic,
            &self.geodetic_extent(extent),
            dimensions,
            origin,
        ))
    }

    fn tile_to_crs_coordinate(
        &self,
        tile: TileCoordinate,
        extent: &Extent,
        dimensions: TileMatrixDimensions,
        origin: TileOrigin,
    ) -> Result<CrsCoordinate> {
        let bounds = self.geodetic_bounds(extent);
        let geodetic = transform::tile_to_crs(tile, &bounds, dimensions, origin)?;
        let meters = Self::clamp(self.from_global_geodetic(geodetic.coordinate()), extent);
        Ok(CrsCoordinate::new(
            meters.x,
            meters.y,
            self.coordinate_reference_system(),
        ))
    }

    fn tile_extent(
        &self,
        tile: TileCoordinate,
        extent: &Extent,
        dimensions: TileMatrixDimensions,
        origin: TileOrigin,
    ) -> Result<Extent> {
        let bounds = self.geodetic_bounds(extent);
        let geodetic = transform::tile_extent(tile, &bounds, dimensions, origin)?;
        let min = self.from_global_geodetic(Coordinate::new(geodetic.minx, geodetic.miny));
        let max = self.from_global_geodetic(Coordinate::new(geodetic.maxx, geodetic.maxy));
        let min = Self::clamp(min, extent);
        let max = Self::clamp(max, extent);
        Ok(Extent {
            minx: min.x,
            miny: min.y,
            maxx: max.x,
            maxy: max.y,
        })
    }

    fn tile_limits(
        &self,
        scheme: &dyn TileScheme,
        extent: &Extent,
        area: &Extent,
    ) -> Result<Vec<TileLimits>> {
        tile_iterator::tile_limits(
            scheme,
            &self.geodetic_bounds(extent),
            &self.geodetic_extent(area),
        )
    }
}

/// Profile for a supported coordinate reference system
pub fn profile_for(crs: &CoordinateReferenceSystem) -> Result<Box<dyn CrsProfile>> {
    match (crs.authority(), crs.identifier()) {
        ("EPSG", 3857) => Ok(Box::new(SphericalMercator)),
        ("EPSG", 4326) => Ok(Box::new(GlobalGeodetic)),
        ("EPSG", 3395) => Ok(Box::new(EllipsoidalMercator)),
        _ => Err(TileMatrixError::UnsupportedCrs(crs.to_string())),
    }
}
