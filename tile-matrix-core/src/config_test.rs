//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::config::{parse_config, read_config, ApplicationCfg, DEFAULT_CONFIG};

#[test]
fn test_load_config() {
    let config = read_config("src/test/example.toml");
    println!("{:#?}", config);
    let config: ApplicationCfg = config.expect("load_config returned Err");
    assert!(config.scheme.predefined.is_none());
    let user = config.scheme.user.expect("missing [scheme.user]");
    assert_eq!((user.minzoom, user.maxzoom), (0, 21));
    assert_eq!((user.width, user.height), (2, 1));
    assert_eq!(user.origin, Some("LowerLeft".to_string()));
    assert_eq!(config.profile.crs, "EPSG:4326");
    let extent = config.profile.extent.expect("missing profile extent");
    assert_eq!(extent.minx, -180.0);
    assert_eq!(extent.maxy, 90.0);
}

#[test]
fn test_default_config() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    assert_eq!(config.scheme.predefined, Some("web_mercator".to_string()));
    assert!(config.scheme.user.is_none());
    assert_eq!(config.profile.crs, "EPSG:3857");
    assert!(config.profile.extent.is_none());
}

#[test]
fn test_parse_error() {
    let config: Result<ApplicationCfg, _> = read_config("src/lib.rs");
    let err = config.err().unwrap();
    assert!(
        err.starts_with("src/lib.rs - unexpected character found: `/` at line 1"),
        "{}",
        err
    );

    let config: Result<ApplicationCfg, _> = read_config("wrongfile");
    assert_eq!("Could not find config file!", config.err().unwrap());

    // [profile] missing
    let toml = r#"
        [scheme]
        predefined = "tms"
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert!(config.err().unwrap().contains("missing field `profile`"));
}

#[test]
fn test_env_template() {
    std::env::set_var("TILE_MATRIX_TEST_CRS", "EPSG:3395");
    let toml = r#"
        [scheme]
        predefined = "web_mercator"

        [profile]
        crs = "{{ env.TILE_MATRIX_TEST_CRS }}"
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.profile.crs, "EPSG:3395");

    let toml = r#"
        [profile]
        crs = "${CRS}"
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert_eq!(
        "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`",
        config.err().unwrap()
    );

    let toml = r#"
        [profile]
        crs = "{{ env.TILE_MATRIX_UNDEFINED_VARIABLE }}"
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert!(config.err().unwrap().starts_with("Template error"));
}
