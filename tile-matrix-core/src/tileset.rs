//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::config::{ApplicationCfg, Config, ProfileCfg};
use std::fmt;
use tile_matrix::{
    profile_for, AbsoluteTileCoordinate, CoordinateReferenceSystem, CrsBounds, CrsCoordinate,
    CrsProfile, Extent, Result, TileIterator, TileMatrixDimensions, TileOrigin, TileScheme,
    ZoomTimesTwo,
};

/// Tile scheme placed on the extent of a coordinate reference system
pub struct TileMatrixSet {
    scheme: Box<dyn TileScheme>,
    profile: Box<dyn CrsProfile>,
    extent: Extent,
}

impl TileMatrixSet {
    /// Tile matrix set covering `extent`, or the whole extent of the profile
    pub fn new(
        scheme: Box<dyn TileScheme>,
        profile: Box<dyn CrsProfile>,
        extent: Option<Extent>,
    ) -> Result<TileMatrixSet> {
        let extent = match extent {
            Some(e) => Extent::new(e.minx, e.miny, e.maxx, e.maxy)?,
            None => profile.extent(),
        };
        Ok(TileMatrixSet {
            scheme,
            profile,
            extent,
        })
    }
    pub fn web_mercator() -> TileMatrixSet {
        TileMatrixSet {
            scheme: Box::new(ZoomTimesTwo::web_mercator()),
            profile: Box::new(tile_matrix::SphericalMercator),
            extent: tile_matrix::SphericalMercator.extent(),
        }
    }
    pub fn scheme(&self) -> &dyn TileScheme {
        self.scheme.as_ref()
    }
    pub fn profile(&self) -> &dyn CrsProfile {
        self.profile.as_ref()
    }
    pub fn extent(&self) -> &Extent {
        &self.extent
    }
    pub fn crs(&self) -> CoordinateReferenceSystem {
        self.profile.coordinate_reference_system()
    }
    pub fn bounds(&self) -> CrsBounds {
        CrsBounds::new(self.crs(), self.extent.clone())
    }
    pub fn origin(&self) -> TileOrigin {
        self.scheme.origin()
    }
    pub fn dimensions(&self, zoom_level: i32) -> Result<TileMatrixDimensions> {
        self.scheme.dimensions(zoom_level)
    }
    /// Tile at `zoom_level` containing `coordinate`
    pub fn crs_to_tile(
        &self,
        zoom_level: i32,
        coordinate: &CrsCoordinate,
    ) -> Result<AbsoluteTileCoordinate> {
        let dimensions = self.scheme.dimensions(zoom_level)?;
        let tile = self.profile.crs_to_tile_coordinate(
            coordinate,
            &self.extent,
            dimensions,
            self.origin(),
        )?;
        debug!(
            "{}, {} -> tile {}/{}/{}",
            coordinate.x, coordinate.y, zoom_level, tile.column, tile.row
        );
        Ok(AbsoluteTileCoordinate::new(
            tile.column,
            tile.row,
            zoom_level,
            self.origin(),
        ))
    }
    /// Corner of `tile` facing the origin of this tile matrix set
    pub fn tile_to_crs(&self, tile: &AbsoluteTileCoordinate) -> Result<CrsCoordinate> {
        let tile = self.transform(tile, self.origin())?;
        let dimensions = self.scheme.dimensions(tile.zoom_level)?;
        self.profile
            .tile_to_crs_coordinate(tile.tile(), &self.extent, dimensions, self.origin())
    }
    pub fn tile_extent(&self, tile: &AbsoluteTileCoordinate) -> Result<Extent> {
        let tile = self.transform(tile, self.origin())?;
        let dimensions = self.scheme.dimensions(tile.zoom_level)?;
        self.profile
            .tile_extent(tile.tile(), &self.extent, dimensions, self.origin())
    }
    /// Same tile numbered from `origin`
    pub fn transform(
        &self,
        tile: &AbsoluteTileCoordinate,
        origin: TileOrigin,
    ) -> Result<AbsoluteTileCoordinate> {
        tile.transform(origin, self.scheme.as_ref())
    }
    /// Tiles covering `area` between `minzoom` and `maxzoom` (inclusive)
    pub fn tiles(&self, area: &Extent, minzoom: i32, maxzoom: i32) -> Result<TileIterator> {
        let limits = self
            .profile
            .tile_limits(self.scheme.as_ref(), &self.extent, area)?;
        let count: u64 = limits
            .iter()
            .filter(|l| l.zoom_level >= minzoom && l.zoom_level <= maxzoom)
            .map(|l| l.count())
            .sum();
        info!(
            "{} tiles in {} from zoom level {} to {}",
            count, area, minzoom, maxzoom
        );
        Ok(TileIterator::new(minzoom, maxzoom, limits, self.origin()))
    }
}

impl fmt::Debug for TileMatrixSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileMatrixSet")
            .field("origin", &self.origin())
            .field("zoom_levels", &self.scheme.zoom_levels())
            .field("profile", &self.profile)
            .field("extent", &self.extent)
            .finish()
    }
}

fn profile_from_config(profile_cfg: &ProfileCfg) -> std::result::Result<Box<dyn CrsProfile>, String> {
    let crs: CoordinateReferenceSystem = profile_cfg
        .crs
        .parse()
        .map_err(|e: tile_matrix::TileMatrixError| e.to_string())?;
    profile_for(&crs).map_err(|e| e.to_string())
}

impl<'a> Config<'a, ApplicationCfg> for TileMatrixSet {
    fn from_config(config: &ApplicationCfg) -> std::result::Result<Self, String> {
        let scheme = ZoomTimesTwo::from_config(&config.scheme)?;
        let profile = profile_from_config(&config.profile)?;
        let extent = config.profile.extent.as_ref().map(Extent::from);
        info!(
            "Tile matrix set {} with origin {} and zoom levels {}-{}",
            profile.coordinate_reference_system(),
            scheme.origin(),
            scheme.minimum_zoom_level(),
            scheme.maximum_zoom_level()
        );
        TileMatrixSet::new(Box::new(scheme), profile, extent).map_err(|e| e.to_string())
    }
    fn gen_config() -> String {
        let mut config = String::new();
        config.push_str(&ZoomTimesTwo::gen_config());
        config.push_str(
            r#"
[profile]
# Supported: EPSG:3857, EPSG:4326, EPSG:3395
crs = "EPSG:3857"
# Default: extent of the CRS
#extent = { minx = -20037508.3427892480, miny = -20037508.3427892480, maxx = 20037508.3427892480, maxy = 20037508.3427892480 }
"#,
        );
        config
    }
}
