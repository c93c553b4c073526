//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::crs::{Coordinate, CoordinateReferenceSystem, CrsCoordinate, Extent};
use crate::dimensions::{TileCoordinate, TileMatrixDimensions};
use crate::error::TileMatrixError;
use crate::origin::TileOrigin;
use crate::profile::*;
use std::f64::consts;

fn assert_close(actual: Coordinate, expected: Coordinate, tolerance: f64) {
    assert!(
        (actual.x - expected.x).abs() <= tolerance && (actual.y - expected.y).abs() <= tolerance,
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn test_spherical_mercator() {
    let profile = SphericalMercator;
    assert_eq!(
        profile.coordinate_reference_system(),
        CoordinateReferenceSystem::epsg(3857)
    );
    let extent = profile.extent();
    assert_eq!(extent.maxx, 20037508.342789244);
    assert_eq!(extent.width(), extent.height());

    assert_eq!(lonlat_to_merc(0.0, 0.0), (0.0, 0.0));
    assert!((lonlat_to_merc(180.0, 0.0).0 - extent.maxx).abs() < 1e-6);

    // Northern limit of Web Mercator
    let corner = profile.to_global_geodetic(Coordinate::new(extent.maxx, extent.maxy));
    assert_close(corner, Coordinate::new(180.0, 85.0511287798066), 1e-9);

    for (lon, lat) in &[(8.5, 47.3), (-122.4, 37.8), (151.2, -33.9)] {
        let meters = profile.from_global_geodetic(Coordinate::new(*lon, *lat));
        assert_close(
            profile.to_global_geodetic(meters),
            Coordinate::new(*lon, *lat),
            1e-9,
        );
    }
}

#[test]
fn test_extent_wgs84_to_merc() {
    let extent = Extent::new(-180.0, 0.0, 180.0, 0.0).unwrap();
    let merc = extent_wgs84_to_merc(&extent);
    let max = consts::PI * EARTH_EQUATORIAL_RADIUS;
    assert!((merc.minx + max).abs() < 1e-6);
    assert!((merc.maxx - max).abs() < 1e-6);
    assert!(merc.miny.abs() < 1e-6);
}

#[test]
fn test_global_geodetic() {
    let profile = GlobalGeodetic;
    let bounds = profile.bounds();
    assert_eq!(bounds.crs, CoordinateReferenceSystem::epsg(4326));
    assert_eq!(bounds.extent.width(), 360.0);
    let coordinate = Coordinate::new(10.0, 50.0);
    assert_eq!(profile.to_global_geodetic(coordinate), coordinate);
    assert_eq!(profile.from_global_geodetic(coordinate), coordinate);

    let dimensions = TileMatrixDimensions::new(8, 4).unwrap();
    let tile = profile
        .crs_to_tile_coordinate(
            &CrsCoordinate::new(10.0, 50.0, CoordinateReferenceSystem::epsg(4326)),
            &bounds.extent,
            dimensions,
            TileOrigin::LowerLeft,
        )
        .unwrap();
    assert_eq!(tile, TileCoordinate::new(4, 3));
    let extent = profile
        .tile_extent(tile, &bounds.extent, dimensions, TileOrigin::LowerLeft)
        .unwrap();
    assert_eq!((extent.minx, extent.miny, extent.maxx, extent.maxy), (0.0, 45.0, 45.0, 90.0));
}

#[test]
fn test_ellipsoidal_mercator() {
    let profile = EllipsoidalMercator;
    assert_eq!(
        profile.coordinate_reference_system(),
        CoordinateReferenceSystem::epsg(3395)
    );
    assert_eq!(crate::INVERSE_FLATTENING, 298.257223563);
    assert!((EllipsoidalMercator::eccentricity() - 0.0818191908426).abs() < 1e-12);

    assert_close(
        profile.from_global_geodetic(Coordinate::new(0.0, 0.0)),
        Coordinate::new(0.0, 0.0),
        1e-9,
    );
    // Ellipsoidal northing is smaller than the spherical one
    let spherical = SphericalMercator.from_global_geodetic(Coordinate::new(0.0, 45.0));
    let ellipsoidal = profile.from_global_geodetic(Coordinate::new(0.0, 45.0));
    assert!(ellipsoidal.y < spherical.y);
    assert!((ellipsoidal.y - 5591295.9).abs() < 1.0);

    for (lon, lat) in &[(8.5, 47.3), (-122.4, 37.8), (151.2, -33.9), (0.0, 80.0)] {
        let meters = profile.from_global_geodetic(Coordinate::new(*lon, *lat));
        assert_close(
            profile.to_global_geodetic(meters),
            Coordinate::new(*lon, *lat),
            1e-9,
        );
    }
}

#[test]
fn test_ellipsoidal_mercator_tiles() {
    let profile = EllipsoidalMercator;
    let extent = profile.extent();
    let dimensions = TileMatrixDimensions::new(2, 2).unwrap();
    let crs = CoordinateReferenceSystem::epsg(3395);

    let tile = profile
        .crs_to_tile_coordinate(
            &CrsCoordinate::new(1000.0, -1000.0, crs.clone()),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        )
        .unwrap();
    assert_eq!(tile, TileCoordinate::new(1, 1));

    let corner = profile
        .tile_to_crs_coordinate(
            TileCoordinate::new(0, 0),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        )
        .unwrap();
    assert_eq!(corner.crs, crs);
    assert_close(
        corner.coordinate(),
        Coordinate::new(extent.minx, extent.maxy),
        1e-3,
    );

    let tile_extent = profile
        .tile_extent(
            TileCoordinate::new(1, 1),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        )
        .unwrap();
    assert_close(
        Coordinate::new(tile_extent.minx, tile_extent.miny),
        Coordinate::new(0.0, extent.miny),
        1e-3,
    );
    assert_close(
        Coordinate::new(tile_extent.maxx, tile_extent.maxy),
        Coordinate::new(extent.maxx, 0.0),
        1e-3,
    );

    assert!(matches!(
        profile.crs_to_tile_coordinate(
            &CrsCoordinate::new(0.0, 0.0, CoordinateReferenceSystem::epsg(3857)),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        ),
        Err(TileMatrixError::CrsMismatch { .. })
    ));
    assert!(matches!(
        profile.crs_to_tile_coordinate(
            &CrsCoordinate::new(0.0, extent.miny, crs),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        ),
        Err(TileMatrixError::CoordinateOutOfBounds { .. })
    ));
}

#[test]
fn test_ellipsoidal_mercator_corner_round_trip() {
    let profile = EllipsoidalMercator;
    let extent = profile.extent();
    for zoom_level in &[1, 4, 8] {
        let count = 1 << zoom_level;
        let dimensions = TileMatrixDimensions::new(count, count).unwrap();
        for origin in TileOrigin::ALL.iter() {
            for column in 0..count {
                for row in 0..count {
                    let tile = TileCoordinate::new(column, row);
                    let corner = profile
                        .tile_to_crs_coordinate(tile, &extent, dimensions, *origin)
                        .unwrap();
                    assert!(extent.contains(corner.coordinate()), "{:?}", corner);
                    assert_eq!(
                        profile.crs_to_tile_coordinate(&corner, &extent, dimensions, *origin),
                        Ok(tile),
                        "zoom level {} origin {}",
                        zoom_level,
                        origin
                    );
                }
            }
        }
    }
}

#[test]
fn test_ellipsoidal_mercator_corners_clamped() {
    let profile = EllipsoidalMercator;
    let extent = profile.extent();
    let dimensions = TileMatrixDimensions::new(16, 16).unwrap();
    // the northern edge comes back as 20037508.342789285 without clamping
    let corner = profile
        .tile_to_crs_coordinate(
            TileCoordinate::new(0, 0),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        )
        .unwrap();
    assert_eq!(corner.coordinate(), Coordinate::new(extent.minx, extent.maxy));
    let tile_extent = profile
        .tile_extent(
            TileCoordinate::new(15, 0),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        )
        .unwrap();
    assert_eq!(tile_extent.maxx, extent.maxx);
    assert_eq!(tile_extent.maxy, extent.maxy);

    // noise beyond the edge is accepted, a centimeter is not
    let crs = profile.coordinate_reference_system();
    let tile = profile.crs_to_tile_coordinate(
        &CrsCoordinate::new(0.0, 20037508.342789285, crs.clone()),
        &extent,
        dimensions,
        TileOrigin::UpperLeft,
    );
    assert_eq!(tile, Ok(TileCoordinate::new(8, 0)));
    assert!(matches!(
        profile.crs_to_tile_coordinate(
            &CrsCoordinate::new(0.0, extent.maxy + 0.01, crs),
            &extent,
            dimensions,
            TileOrigin::UpperLeft,
        ),
        Err(TileMatrixError::CoordinateOutOfBounds { .. })
    ));
}

#[test]
fn test_precision() {
    assert_eq!(SphericalMercator.precision(), 2);
    assert_eq!(GlobalGeodetic.precision(), 7);
    assert_eq!(EllipsoidalMercator.precision(), 2);
    assert_eq!(round_to_precision(20037508.342789285, 2), 20037508.34);
    assert_eq!(round_to_precision(-20037508.342789244, 2), -20037508.34);
    assert_eq!(round_to_precision(85.05112877980659, 7), 85.0511288);
}

/// Coordinates spread over `extent` by an additive recurrence
fn spread_coordinates(extent: &Extent, count: usize) -> Vec<Coordinate> {
    (1..=count)
        .map(|i| {
            let fx = (i as f64 * 0.618_033_988_749_895).fract();
            let fy = (i as f64 * 0.754_877_666_246_693).fract();
            Coordinate::new(
                extent.minx + fx * extent.width(),
                extent.miny + fy * extent.height(),
            )
        })
        .collect()
}

#[test]
fn test_crs_to_tile_recovers_coordinate() {
    let profiles: Vec<Box<dyn CrsProfile>> = vec![
        Box::new(SphericalMercator),
        Box::new(GlobalGeodetic),
        Box::new(EllipsoidalMercator),
    ];
    let tolerance = 1e-6;
    for profile in &profiles {
        let extent = profile.extent();
        let crs = profile.coordinate_reference_system();
        for zoom_level in &[1, 5, 10, 16] {
            let count = 1 << zoom_level;
            let dimensions = TileMatrixDimensions::new(count, count).unwrap();
            for origin in TileOrigin::ALL.iter() {
                for point in spread_coordinates(&extent, 200) {
                    let coordinate = CrsCoordinate::new(point.x, point.y, crs.clone());
                    let tile = profile
                        .crs_to_tile_coordinate(&coordinate, &extent, dimensions, *origin)
                        .unwrap();
                    let cell = profile
                        .tile_extent(tile, &extent, dimensions, *origin)
                        .unwrap();
                    assert!(
                        point.x >= cell.minx - tolerance
                            && point.x <= cell.maxx + tolerance
                            && point.y >= cell.miny - tolerance
                            && point.y <= cell.maxy + tolerance,
                        "{} zoom level {} origin {}: {:?} not in {}",
                        profile.name(),
                        zoom_level,
                        origin,
                        point,
                        cell
                    );
                    let corner = profile
                        .tile_to_crs_coordinate(tile, &extent, dimensions, *origin)
                        .unwrap();
                    assert!((corner.x - point.x).abs() <= cell.width() + tolerance);
                    assert!((corner.y - point.y).abs() <= cell.height() + tolerance);
                }
            }
        }
    }
}

#[test]
fn test_ellipsoidal_mercator_tile_limits() {
    use crate::scheme::ZoomTimesTwo;
    use crate::tile_iterator::TileLimits;

    let profile = EllipsoidalMercator;
    let extent = profile.extent();
    let scheme = ZoomTimesTwo::new(0, 2, 1, 1, TileOrigin::UpperLeft).unwrap();

    let limits = profile.tile_limits(&scheme, &extent, &extent).unwrap();
    assert_eq!(limits.len(), 3);
    assert_eq!(limits[2].count(), 16);

    // north eastern quarter
    let area = Extent::new(1000.0, 1000.0, extent.maxx, extent.maxy).unwrap();
    let limits = profile.tile_limits(&scheme, &extent, &area).unwrap();
    assert_eq!(
        limits[1],
        TileLimits {
            zoom_level: 1,
            min_column: 1,
            min_row: 0,
            max_column: 2,
            max_row: 1,
        }
    );
}

#[test]
fn test_profile_for() {
    for id in &[3857, 4326, 3395] {
        let crs = CoordinateReferenceSystem::epsg(*id);
        let profile = profile_for(&crs).unwrap();
        assert_eq!(profile.coordinate_reference_system(), crs);
    }
    assert_eq!(
        profile_for(&CoordinateReferenceSystem::epsg(3857))
            .unwrap()
            .name(),
        "Web Mercator"
    );
    assert_eq!(
        profile_for(&CoordinateReferenceSystem::epsg(2056)).unwrap_err(),
        TileMatrixError::UnsupportedCrs("EPSG:2056".to_string())
    );
}
