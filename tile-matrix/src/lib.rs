//! A library for tile matrix addressing
//!
//! ## Tile schemes
//!
//! ```rust
//! use tile_matrix::{TileOrigin, TileScheme, ZoomTimesTwo};
//!
//! let scheme = ZoomTimesTwo::new(4, 9, 2, 3, TileOrigin::UpperLeft).unwrap();
//! let dimensions = scheme.dimensions(6).unwrap();
//! assert_eq!((dimensions.width(), dimensions.height()), (8, 12));
//! assert!(scheme.dimensions(10).is_err());
//! ```
//!
//! ## Tile origins
//!
//! ```rust
//! use tile_matrix::{TileCoordinate, TileMatrixDimensions, TileOrigin};
//!
//! let dimensions = TileMatrixDimensions::new(4, 4).unwrap();
//! let tms = TileOrigin::UpperLeft.transform(
//!     TileOrigin::LowerLeft,
//!     TileCoordinate::new(1, 0),
//!     dimensions,
//! );
//! assert_eq!(tms, TileCoordinate::new(1, 3));
//! ```
//!
//! ## CRS coordinates
//!
//! ```rust
//! use tile_matrix::{
//!     crs_to_tile, tile_to_crs, CoordinateReferenceSystem, CrsCoordinate, CrsProfile,
//!     GlobalGeodetic, TileCoordinate, TileMatrixDimensions, TileOrigin,
//! };
//!
//! let bounds = GlobalGeodetic.bounds();
//! let dimensions = TileMatrixDimensions::new(8, 4).unwrap();
//! let coordinate = CrsCoordinate::new(10.0, 50.0, CoordinateReferenceSystem::epsg(4326));
//! let tile = crs_to_tile(&coordinate, &bounds, dimensions, TileOrigin::UpperLeft).unwrap();
//! assert_eq!(tile, TileCoordinate::new(4, 0));
//!
//! // Upper left corner of the tile
//! let corner = tile_to_crs(tile, &bounds, dimensions, TileOrigin::UpperLeft).unwrap();
//! assert_eq!((corner.x, corner.y), (0.0, 90.0));
//! ```

mod crs;
mod dimensions;
mod error;
mod origin;
mod profile;
mod scheme;
mod tile_iterator;
mod transform;

#[cfg(test)]
mod profile_test;

pub use crs::{Coordinate, CoordinateReferenceSystem, CrsBounds, CrsCoordinate, Extent};
pub use dimensions::{TileCoordinate, TileMatrixDimensions};
pub use error::{ErrorKind, Result, TileMatrixError};
pub use origin::TileOrigin;
pub use profile::{
    extent_wgs84_to_merc, lonlat_to_merc, profile_for, round_to_precision, CrsProfile,
    EllipsoidalMercator, GlobalGeodetic, SphericalMercator, EARTH_EQUATORIAL_RADIUS,
    INVERSE_FLATTENING,
};
pub use scheme::{AbsoluteTileCoordinate, TileScheme, ZoomTimesTwo};
pub use tile_iterator::{tile_limits, TileIterator, TileLimits};
pub use transform::{crs_to_tile, tile_extent, tile_size, tile_to_crs};
