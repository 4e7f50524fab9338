mod common;

use std::io::Write;
use std::path::PathBuf;

use common::generate_args;
use tempfile::NamedTempFile;
use wfsynth::config::{load_and_validate, parse_str, GenerationConfig};
use wfsynth::cost::CostModel;
use wfsynth::errors::WfsynthError;
use wfsynth::resolve_config;
use wfsynth::topology::SizeParams;
use wfsynth::types::{Archetype, CriticalPathMetric};
use wfsynth_test_utils::builders::ConfigBuilder;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn validate(contents: &str) -> Result<GenerationConfig, WfsynthError> {
    GenerationConfig::try_from(parse_str(contents)?)
}

#[test]
fn full_config_file_loads() {
    let file = config_file(
        r#"
[workflow]
archetype = "ligo"
seed = 42
critical_path = "size"

[params]
segments = 40
templates = 5

[cost]
mode = "ccr"
ccr = 1.5
epsilon = 0.2
rescale = true

[output]
dir = "out/ligo"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(
        cfg.params,
        SizeParams::Ligo {
            segments: 40,
            templates: 5
        }
    );
    assert_eq!(
        cfg.cost,
        CostModel::CcrCalibrated {
            ccr: 1.5,
            epsilon: 0.2,
            rescale: true
        }
    );
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.critical_path, CriticalPathMetric::Size);
    assert_eq!(cfg.output_dir, PathBuf::from("out/ligo"));
}

#[test]
fn missing_values_fall_back_to_defaults() {
    let cfg = validate("[workflow]\narchetype = \"cybershake\"\n").unwrap();
    assert_eq!(cfg.params, SizeParams::defaults(Archetype::CyberShake));
    assert_eq!(cfg.cost, CostModel::FixedDuration);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.output_dir, PathBuf::from("out"));
}

#[test]
fn ccr_alone_selects_ccr_mode() {
    let cfg = ConfigBuilder::new(Archetype::Montage).ccr(3.0).build();
    assert_eq!(cfg.cost, CostModel::ccr(3.0));
}

#[test]
fn out_of_range_parameter_is_rejected() {
    for value in ["0", "-3", "201"] {
        let err = validate(&format!(
            "[workflow]\narchetype = \"montage\"\n[params]\nimages = {value}\n"
        ))
        .unwrap_err();
        match err {
            WfsynthError::ParameterValidation { param, value: given, .. } => {
                assert_eq!(param, "images");
                assert_eq!(given, value);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}

#[test]
fn parameter_of_another_archetype_is_rejected() {
    let raw = ConfigBuilder::new(Archetype::Montage).param("sites", 4).raw();
    let err = GenerationConfig::try_from(raw).unwrap_err();
    match err {
        WfsynthError::ConfigError(msg) => {
            assert!(msg.contains("sites"));
            assert!(msg.contains("images"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn cost_settings_are_checked() {
    let no_target = validate("[workflow]\narchetype = \"ligo\"\n[cost]\nmode = \"ccr\"\n");
    assert!(matches!(no_target, Err(WfsynthError::ConfigError(_))));

    let stray_epsilon = validate("[workflow]\narchetype = \"ligo\"\n[cost]\nmode = \"fixed\"\nepsilon = 0.1\n");
    assert!(matches!(stray_epsilon, Err(WfsynthError::ConfigError(_))));

    let huge = validate("[workflow]\narchetype = \"ligo\"\n[cost]\nccr = 500.0\n");
    assert!(matches!(
        huge,
        Err(WfsynthError::ParameterValidation { ref param, .. }) if param == "ccr"
    ));

    let wide = validate("[workflow]\narchetype = \"ligo\"\n[cost]\nccr = 1.0\nepsilon = 1.5\n");
    assert!(matches!(
        wide,
        Err(WfsynthError::ParameterValidation { ref param, .. }) if param == "epsilon"
    ));
}

#[test]
fn archetype_is_required() {
    let err = validate("[params]\nimages = 3\n").unwrap_err();
    assert!(matches!(err, WfsynthError::ConfigError(_)));
}

#[test]
fn unknown_keys_and_bad_archetypes_fail_to_parse() {
    assert!(matches!(
        validate("[workflow]\narchetype = \"montage\"\ncolour = \"blue\"\n"),
        Err(WfsynthError::TomlError(_))
    ));
    assert!(matches!(
        validate("[workflow]\narchetype = \"sipht\"\n"),
        Err(WfsynthError::TomlError(_))
    ));
}

#[test]
fn cli_flags_override_the_file() {
    let file = config_file(
        r#"
[workflow]
archetype = "epigenomics"
seed = 1

[params]
samples = 6
analyses = 2
"#,
    );

    let mut args = generate_args(Archetype::Epigenomics);
    args.archetype = None;
    args.config = Some(file.path().to_path_buf());
    args.params = vec![("samples".to_string(), 9)];
    args.seed = Some(77);
    args.output = Some(PathBuf::from("elsewhere"));

    let cfg = resolve_config(&args).unwrap();
    assert_eq!(
        cfg.params,
        SizeParams::Epigenomics {
            samples: 9,
            analyses: 2
        }
    );
    assert_eq!(cfg.seed, Some(77));
    assert_eq!(cfg.output_dir, PathBuf::from("elsewhere"));
}
