//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Coordinate reference systems, coordinates and extents

use crate::error::{Result, TileMatrixError};
use crate::origin::TileOrigin;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Coordinate reference system identified by authority and code (e.g. EPSG:3857)
#[derive(Clone, Debug)]
pub struct CoordinateReferenceSystem {
    name: Option<String>,
    authority: String,
    identifier: i32,
}

impl CoordinateReferenceSystem {
    pub fn new(authority: &str, identifier: i32) -> Result<CoordinateReferenceSystem> {
        if authority.is_empty() {
            return Err(TileMatrixError::InvalidCrs(
                "Authority may not be empty".to_string(),
            ));
        }
        Ok(CoordinateReferenceSystem {
            name: None,
            authority: authority.to_uppercase(),
            identifier,
        })
    }
    pub fn with_name(
        name: &str,
        authority: &str,
        identifier: i32,
    ) -> Result<CoordinateReferenceSystem> {
        if name.is_empty() {
            return Err(TileMatrixError::InvalidCrs(
                "A present name may not be empty".to_string(),
            ));
        }
        let mut crs = CoordinateReferenceSystem::new(authority, identifier)?;
        crs.name = Some(name.to_string());
        Ok(crs)
    }
    /// EPSG coordinate reference system
    pub fn epsg(identifier: i32) -> CoordinateReferenceSystem {
        CoordinateReferenceSystem {
            name: None,
            authority: "EPSG".to_string(),
            identifier,
        }
    }
    pub fn authority(&self) -> &str {
        &self.authority
    }
    pub fn identifier(&self) -> i32 {
        self.identifier
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

// Names are descriptive only
impl PartialEq for CoordinateReferenceSystem {
    fn eq(&self, other: &Self) -> bool {
        self.authority == other.authority && self.identifier == other.identifier
    }
}

impl Eq for CoordinateReferenceSystem {}

impl Hash for CoordinateReferenceSystem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.authority.hash(state);
        self.identifier.hash(state);
    }
}

impl fmt::Display for CoordinateReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.identifier)?;
        if let Some(ref name) = self.name {
            write!(f, " - {}", name)?;
        }
        Ok(())
    }
}

impl FromStr for CoordinateReferenceSystem {
    type Err = TileMatrixError;

    /// Parse `AUTHORITY:CODE`, e.g. `EPSG:4326`
    fn from_str(val: &str) -> Result<CoordinateReferenceSystem> {
        let mut parts = val.trim().splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some(authority), Some(code)) => {
                let identifier = code.trim().parse::<i32>().map_err(|_| {
                    TileMatrixError::InvalidCrs(format!("Invalid identifier in '{}'", val))
                })?;
                CoordinateReferenceSystem::new(authority.trim(), identifier)
            }
            _ => Err(TileMatrixError::InvalidCrs(format!(
                "Expected AUTHORITY:CODE, got '{}'",
                val
            ))),
        }
    }
}

/// Position in CRS units
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Coordinate {
        Coordinate { x, y }
    }
}

/// Position in the units of a named coordinate reference system
#[derive(PartialEq, Clone, Debug)]
pub struct CrsCoordinate {
    pub x: f64,
    pub y: f64,
    pub crs: CoordinateReferenceSystem,
}

impl CrsCoordinate {
    pub fn new(x: f64, y: f64, crs: CoordinateReferenceSystem) -> CrsCoordinate {
        CrsCoordinate { x, y, crs }
    }
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    /// Validated extent with finite values and min <= max
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Result<Extent> {
        let extent = Extent {
            minx,
            miny,
            maxx,
            maxy,
        };
        extent.validate()?;
        Ok(extent)
    }
    pub(crate) fn validate(&self) -> Result<()> {
        if ![self.minx, self.miny, self.maxx, self.maxy]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(TileMatrixError::InvalidBounds(format!(
                "{} contains non-finite values",
                self
            )));
        }
        if self.minx > self.maxx {
            return Err(TileMatrixError::InvalidBounds(
                "Min x cannot be greater than max x".to_string(),
            ));
        }
        if self.miny > self.maxy {
            return Err(TileMatrixError::InvalidBounds(
                "Min y cannot be greater than max y".to_string(),
            ));
        }
        Ok(())
    }
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.minx + self.maxx) / 2.0,
            (self.miny + self.maxy) / 2.0,
        )
    }
    /// Corner of the extent where tile (0, 0) of a matrix with `origin` is placed
    pub fn corner(&self, origin: TileOrigin) -> Coordinate {
        match origin {
            TileOrigin::UpperLeft => Coordinate::new(self.minx, self.maxy),
            TileOrigin::UpperRight => Coordinate::new(self.maxx, self.maxy),
            TileOrigin::LowerLeft => Coordinate::new(self.minx, self.miny),
            TileOrigin::LowerRight => Coordinate::new(self.maxx, self.miny),
        }
    }
    /// Inclusive containment test
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= self.minx
            && coordinate.x <= self.maxx
            && coordinate.y >= self.miny
            && coordinate.y <= self.maxy
    }
    /// Containment test excluding the two edges opposite of `origin`
    ///
    /// Coordinates on those edges would map to a tile one past the end of the matrix.
    pub fn contains_for_origin(&self, coordinate: Coordinate, origin: TileOrigin) -> bool {
        let far_x = if origin.delta_x() > 0 {
            self.maxx
        } else {
            self.minx
        };
        let far_y = if origin.delta_y() > 0 {
            self.maxy
        } else {
            self.miny
        };
        self.contains(coordinate) && coordinate.x != far_x && coordinate.y != far_y
    }
    /// Overlapping part of two extents
    pub fn intersection(&self, other: &Extent) -> Option<Extent> {
        let extent = Extent {
            minx: self.minx.max(other.minx),
            miny: self.miny.max(other.miny),
            maxx: self.maxx.min(other.maxx),
            maxy: self.maxy.min(other.maxy),
        };
        if extent.minx <= extent.maxx && extent.miny <= extent.maxy {
            Some(extent)
        } else {
            None
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.minx, self.miny, self.maxx, self.maxy
        )
    }
}

/// Extent in the units of a coordinate reference system
#[derive(PartialEq, Clone, Debug)]
pub struct CrsBounds {
    pub crs: CoordinateReferenceSystem,
    pub extent: Extent,
}

impl CrsBounds {
    pub fn new(crs: CoordinateReferenceSystem, extent: Extent) -> CrsBounds {
        CrsBounds { crs, extent }
    }
}
