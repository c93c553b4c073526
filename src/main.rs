//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use std::str::FromStr;
use tile_matrix::{AbsoluteTileCoordinate, CrsCoordinate, Extent, TileOrigin, TileScheme};
use tile_matrix_core::{
    parse_config, read_config, ApplicationCfg, Config, TileMatrixSet, DEFAULT_CONFIG,
};
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log)) => rust_log,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn tileset_from_args(args: &ArgMatches<'_>) -> Result<TileMatrixSet, String> {
    let config: ApplicationCfg = if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        read_config(cfgpath).map_err(|err| format!("Error reading configuration - {}", err))?
    } else {
        parse_config(DEFAULT_CONFIG.to_string(), "")?
    };
    TileMatrixSet::from_config(&config)
}

fn parse_arg<T: FromStr>(args: &ArgMatches<'_>, name: &str) -> Result<Option<T>, String> {
    match args.value_of(name) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("Error parsing '{}' value '{}'", name, val)),
        None => Ok(None),
    }
}

fn parse_numlist(name: &str, numlist: &str, len: usize) -> Result<Vec<f64>, String> {
    let values = numlist
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| format!("Error parsing '{}' as list of float values", name))?;
    if values.len() != len {
        return Err(format!("Expected {} values for '{}'", len, name));
    }
    Ok(values)
}

fn parse_origin(args: &ArgMatches<'_>, name: &str) -> Result<Option<TileOrigin>, String> {
    args.value_of(name)
        .map(|val| TileOrigin::from_str(val).map_err(|e| e.to_string()))
        .transpose()
}

/// Parse `z/x/y`
fn parse_tile(args: &ArgMatches<'_>, origin: TileOrigin) -> Result<AbsoluteTileCoordinate, String> {
    let spec = args.value_of("tile").ok_or("Missing 'tile'")?;
    let parts = spec
        .split('/')
        .map(|v| v.trim().parse::<i32>())
        .collect::<Result<Vec<i32>, _>>()
        .map_err(|_| format!("Error parsing tile '{}'", spec))?;
    match parts.as_slice() {
        [zoom_level, column, row] => Ok(AbsoluteTileCoordinate::new(
            *column,
            *row,
            *zoom_level,
            origin,
        )),
        _ => Err(format!("Expected tile as z/x/y, got '{}'", spec)),
    }
}

fn tile_str(tile: &AbsoluteTileCoordinate) -> String {
    format!("{}/{}/{}", tile.zoom_level, tile.column, tile.row)
}

fn dimensions(args: &ArgMatches<'_>) -> Result<(), String> {
    let tileset = tileset_from_args(args)?;
    let zoom_levels = match parse_arg::<i32>(args, "zoom")? {
        Some(zoom_level) => zoom_level..=zoom_level,
        None => tileset.scheme().zoom_levels(),
    };
    for zoom_level in zoom_levels {
        let dimensions = tileset.dimensions(zoom_level).map_err(|e| e.to_string())?;
        println!(
            "{} {} {}",
            zoom_level,
            dimensions.width(),
            dimensions.height()
        );
    }
    Ok(())
}

fn transform(args: &ArgMatches<'_>) -> Result<(), String> {
    let tileset = tileset_from_args(args)?;
    let from = parse_origin(args, "from")?.unwrap_or(tileset.origin());
    let to = parse_origin(args, "to")?.ok_or("Missing 'to'")?;
    let tile = parse_tile(args, from)?;
    let transformed = tileset
        .transform(&tile, to)
        .map_err(|e| e.to_string())?;
    debug!("{} {} -> {} {}", from, tile_str(&tile), to, tile_str(&transformed));
    println!("{}", tile_str(&transformed));
    Ok(())
}

fn crs2tile(args: &ArgMatches<'_>) -> Result<(), String> {
    let tileset = tileset_from_args(args)?;
    let zoom_level = parse_arg::<i32>(args, "zoom")?.ok_or("Missing 'zoom'")?;
    let coord = args.value_of("coord").ok_or("Missing 'coord'")?;
    let xy = parse_numlist("coord", coord, 2)?;
    let coordinate = CrsCoordinate::new(xy[0], xy[1], tileset.crs());
    let tile = tileset
        .crs_to_tile(zoom_level, &coordinate)
        .map_err(|e| e.to_string())?;
    println!("{}", tile_str(&tile));
    Ok(())
}

fn tile2crs(args: &ArgMatches<'_>) -> Result<(), String> {
    let tileset = tileset_from_args(args)?;
    let origin = parse_origin(args, "origin")?.unwrap_or(tileset.origin());
    let tile = parse_tile(args, origin)?;
    let corner = tileset.tile_to_crs(&tile).map_err(|e| e.to_string())?;
    let extent = tileset.tile_extent(&tile).map_err(|e| e.to_string())?;
    println!("{},{}", corner.x, corner.y);
    println!(
        "{},{},{},{}",
        extent.minx, extent.miny, extent.maxx, extent.maxy
    );
    Ok(())
}

fn tiles(args: &ArgMatches<'_>) -> Result<(), String> {
    let tileset = tileset_from_args(args)?;
    let minzoom =
        parse_arg::<i32>(args, "minzoom")?.unwrap_or(tileset.scheme().minimum_zoom_level());
    let maxzoom =
        parse_arg::<i32>(args, "maxzoom")?.unwrap_or(tileset.scheme().maximum_zoom_level());
    let area = match args.value_of("extent") {
        Some(numlist) => {
            let arr = parse_numlist("extent", numlist, 4)?;
            Extent::new(arr[0], arr[1], arr[2], arr[3]).map_err(|e| e.to_string())?
        }
        None => tileset.extent().clone(),
    };
    let tiles = tileset
        .tiles(&area, minzoom, maxzoom)
        .map_err(|e| e.to_string())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for tile in tiles {
        writeln!(out, "{}", tile_str(&tile)).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn main() {
    dotenv().ok();
    // http://kbknapp.github.io/clap-rs/clap/
    let mut app = App::new("tile_matrix")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Tile matrix addressing and CRS to tile coordinate calculations")
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
        .subcommand(SubCommand::with_name("dimensions")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --zoom=[LEVEL] 'Zoom level (Default: all)'")
                        .about("Tile matrix dimensions of zoom levels"))
        .subcommand(SubCommand::with_name("transform")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --tile=<z/x/y> 'Tile coordinate'
                                              --from=[ORIGIN] 'Origin of the tile coordinate (Default: origin of the tile scheme)'
                                              --to=<ORIGIN> 'Target origin (UpperLeft, UpperRight, LowerLeft, LowerRight)'")
                        .about("Transform a tile coordinate to another origin"))
        .subcommand(SubCommand::with_name("crs2tile")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --zoom=<LEVEL> 'Zoom level'
                                              --coord=<x,y> 'Coordinate in CRS units'")
                        .about("Tile containing a CRS coordinate"))
        .subcommand(SubCommand::with_name("tile2crs")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --tile=<z/x/y> 'Tile coordinate'
                                              --origin=[ORIGIN] 'Origin of the tile coordinate (Default: origin of the tile scheme)'")
                        .about("CRS corner and extent of a tile"))
        .subcommand(SubCommand::with_name("tiles")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --minzoom=[LEVEL] 'Minimum zoom level'
                                              --maxzoom=[LEVEL] 'Maximum zoom level'
                                              --extent=[minx,miny,maxx,maxy] 'Extent of tiles'")
                        .about("List tiles covering an extent"));

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => {
            let result = match matches.subcommand() {
                ("genconfig", Some(sub_m)) => {
                    init_logger(sub_m);
                    println!("{}", TileMatrixSet::gen_config());
                    Ok(())
                }
                ("dimensions", Some(sub_m)) => {
                    init_logger(sub_m);
                    dimensions(sub_m)
                }
                ("transform", Some(sub_m)) => {
                    init_logger(sub_m);
                    transform(sub_m)
                }
                ("crs2tile", Some(sub_m)) => {
                    init_logger(sub_m);
                    crs2tile(sub_m)
                }
                ("tile2crs", Some(sub_m)) => {
                    init_logger(sub_m);
                    tile2crs(sub_m)
                }
                ("tiles", Some(sub_m)) => {
                    init_logger(sub_m);
                    tiles(sub_m)
                }
                _ => {
                    let _ = app.print_help();
                    println!("");
                    Ok(())
                }
            };
            if let Err(err) = result {
                error!("{}", err);
                process::exit(1)
            }
        }
    }
}
