use ireval_core::config::{Config, InputFormat, OutputFormat};
use ireval_core::FMeasureWeight;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.input.format, InputFormat::Yaml);
    assert!(config.input.gold_standard_file.is_none());
    assert!(config.input.query_result_file.is_none());
    assert_eq!(config.output.prefix, "output");
    assert_eq!(config.output.format, OutputFormat::Yaml);
    assert!(config.evaluation.cleanup);
    assert!(!config.report.verbose);
}

#[test]
fn test_config_alpha_takes_precedence_over_beta() {
    let mut config = Config::default();
    config.evaluation.f_measure_beta = 2.0;
    assert_eq!(
        config.evaluation.f_measure_weight(),
        FMeasureWeight::Beta(2.0)
    );

    config.evaluation.f_measure_alpha = Some(0.5);
    assert_eq!(
        config.evaluation.f_measure_weight(),
        FMeasureWeight::Alpha(0.5)
    );
}

#[test]
fn test_config_validation_rejects_bad_alpha() {
    let mut config = Config::default();
    config.evaluation.f_measure_alpha = Some(-0.1);
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("f_measure_alpha"));
}
