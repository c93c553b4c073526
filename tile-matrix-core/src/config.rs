//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub scheme: SchemeCfg,
    pub profile: ProfileCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SchemeCfg {
    /// web_mercator, tms or global_geodetic
    pub predefined: Option<String>,
    pub user: Option<UserSchemeCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UserSchemeCfg {
    pub minzoom: i32,
    pub maxzoom: i32,
    /// Number of tiles at `minzoom`
    pub width: i32,
    pub height: i32,
    /// Corner of tile (0, 0): UpperLeft, UpperRight, LowerLeft or LowerRight
    pub origin: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ProfileCfg {
    /// Coordinate reference system, e.g. "EPSG:3857"
    pub crs: String,
    /// Tiled extent in CRS units (Default: extent of the CRS)
    pub extent: Option<ExtentCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ExtentCfg {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

pub const DEFAULT_CONFIG: &'static str = r#"
[scheme]
predefined = "web_mercator"

[profile]
crs = "EPSG:3857"
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let env: HashMap<String, String> = env::vars().collect();
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
