use super::*;

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(
        settings.content.manifest,
        PathBuf::from("content/articles.toml")
    );
    assert_eq!(settings.site.home_latest.get(), 4);
    assert_eq!(settings.header.avatar_offset_px, 52.0);
    assert_eq!(settings.header.height_px, 64.0);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        logging: LoggingOverrides {
            log_level: Some("debug".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        logging: LoggingOverrides {
            log_json: Some(true),
            ..Default::default()
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let err = Settings::from_raw(raw).expect_err("port 0 must fail");
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn unparseable_host_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.host = Some("not a host".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid host must fail");
    assert!(matches!(err, LoadError::Invalid { key: "server.addr", .. }));
}

#[test]
fn unknown_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).expect_err("bad level must fail");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn blank_site_author_is_rejected() {
    let mut raw = RawSettings::default();
    raw.site.author = Some("   ".to_string());

    let err = Settings::from_raw(raw).expect_err("blank author must fail");
    assert!(matches!(err, LoadError::Invalid { key: "site.author", .. }));
}

#[test]
fn site_values_are_trimmed() {
    let mut raw = RawSettings::default();
    raw.site.title = Some("  Notes  ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.site.title, "Notes");
}

#[test]
fn home_latest_must_be_positive() {
    let mut raw = RawSettings::default();
    raw.site.home_latest = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero must fail");
    assert!(matches!(err, LoadError::Invalid { key: "site.home_latest", .. }));
}

#[test]
fn negative_header_geometry_is_rejected() {
    let mut raw = RawSettings::default();
    raw.header.height_px = Some(-1.0);

    let err = Settings::from_raw(raw).expect_err("negative height must fail");
    assert!(matches!(err, LoadError::Invalid { key: "header.height_px", .. }));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["folio"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "folio",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--server-port",
        "8080",
        "--log-json",
        "true",
        "--content-manifest",
        "site/articles.toml",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(serve.overrides.server_port, Some(8080));
            assert_eq!(serve.overrides.logging.log_json, Some(true));
            assert_eq!(
                serve.overrides.content.manifest,
                Some(PathBuf::from("site/articles.toml"))
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_build_arguments() {
    let args = CliArgs::parse_from(["folio", "build", "--out", "public", "--log-level", "warn"]);

    match args.command.expect("build command") {
        Command::Build(build) => {
            assert_eq!(build.out, PathBuf::from("public"));
            assert_eq!(build.logging.log_level.as_deref(), Some("warn"));
            assert!(build.content.manifest.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn build_output_defaults_to_dist() {
    let args = CliArgs::parse_from(["folio", "build"]);

    match args.command.expect("build command") {
        Command::Build(build) => assert_eq!(build.out, PathBuf::from("dist")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn config_file_layers_under_cli() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("folio.toml");
    std::fs::write(
        &path,
        "[site]\ntitle = \"From File\"\nhome_latest = 2\n\n[server]\nport = 4100\n",
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "folio",
        "--config-file",
        path.to_str().expect("utf-8 path"),
        "serve",
        "--server-port",
        "4200",
    ]);
    let settings = load(&args).expect("settings load");

    assert_eq!(settings.site.title, "From File");
    assert_eq!(settings.site.home_latest.get(), 2);
    assert_eq!(settings.server.addr.port(), 4200);
}
