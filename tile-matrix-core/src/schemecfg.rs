//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::config::{Config, ExtentCfg, SchemeCfg};
use std::str::FromStr;
use tile_matrix::{Extent, TileOrigin, ZoomTimesTwo};

impl From<&ExtentCfg> for Extent {
    fn from(cfg: &ExtentCfg) -> Extent {
        Extent {
            minx: cfg.minx,
            miny: cfg.miny,
            maxx: cfg.maxx,
            maxy: cfg.maxy,
        }
    }
}

impl<'a> Config<'a, SchemeCfg> for ZoomTimesTwo {
    fn from_config(scheme_cfg: &SchemeCfg) -> Result<Self, String> {
        if let Some(ref name) = scheme_cfg.predefined {
            match name.as_str() {
                "web_mercator" => Ok(ZoomTimesTwo::web_mercator()),
                "tms" => Ok(ZoomTimesTwo::tms()),
                "global_geodetic" => Ok(ZoomTimesTwo::global_geodetic()),
                _ => Err(format!("Unkown tile scheme '{}'", name)),
            }
        } else if let Some(ref user) = scheme_cfg.user {
            let origin = match user.origin {
                Some(ref origin) => Some(TileOrigin::from_str(origin).map_err(|e| e.to_string())?),
                None => None,
            };
            ZoomTimesTwo::new(
                user.minzoom,
                user.maxzoom,
                user.width,
                user.height,
                origin,
            )
            .map_err(|e| e.to_string())
        } else {
            Err("Invalid tile scheme definition".to_string())
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[scheme]
# Predefined schemes: web_mercator, tms, global_geodetic
predefined = "web_mercator"
#[scheme.user]
#minzoom = 0
#maxzoom = 18
#width = 1
#height = 1
#origin = "UpperLeft"
"#;
        toml.to_string()
    }
}
