use stencil::cli::{map_args, parse_options, ArgDef, OptionDef};
use stencil::error::Error;

const VERBOSE: OptionDef = OptionDef {
    key: "verbose",
    long: &["verbose"],
    short: &['v'],
    has_value: false,
    default: None,
    description: "Enable verbose logging output.",
};

const FORCE: OptionDef = OptionDef {
    key: "force",
    long: &["force"],
    short: &['f'],
    has_value: false,
    default: None,
    description: "Force run without preview.",
};

const OUTPUT: OptionDef = OptionDef {
    key: "output",
    long: &["output"],
    short: &['o'],
    has_value: true,
    default: None,
    description: "Output path.",
};

const MODE: OptionDef = OptionDef {
    key: "mode",
    long: &["mode"],
    short: &[],
    has_value: true,
    default: Some("plain"),
    description: "Render mode.",
};

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}

#[test]
fn test_defaults() {
    let parsed = parse_options(&[VERBOSE, FORCE, MODE], &args(&[])).unwrap();

    assert!(!parsed.is_enabled("verbose"));
    assert!(!parsed.is_enabled("force"));
    assert_eq!(parsed.value_of("mode"), Some("plain"));
    assert!(parsed.args.is_empty());
}

#[test]
fn test_long_and_short_flags() {
    let parsed =
        parse_options(&[VERBOSE, FORCE], &args(&["--verbose", "keep", "-f"])).unwrap();

    assert!(parsed.is_enabled("verbose"));
    assert!(parsed.is_enabled("force"));
    assert_eq!(parsed.args, args(&["keep"]));
}

#[test]
fn test_positional_order_preserved() {
    let parsed =
        parse_options(&[VERBOSE, FORCE], &args(&["a", "-v", "b", "--force", "c"]))
            .unwrap();

    assert_eq!(parsed.args, args(&["a", "b", "c"]));
}

#[test]
fn test_short_cluster() {
    let parsed = parse_options(&[VERBOSE, FORCE], &args(&["-vf"])).unwrap();

    assert!(parsed.is_enabled("verbose"));
    assert!(parsed.is_enabled("force"));
}

#[test]
fn test_short_cluster_rejects_value_options() {
    let err = parse_options(&[VERBOSE, OUTPUT], &args(&["-vo"])).unwrap_err();

    assert!(matches!(err, Error::OptionRequiresValue(name) if name == "-o"));
}

#[test]
fn test_value_option_forms_are_equivalent() {
    let spaced = parse_options(&[OUTPUT], &args(&["--output", "dir"])).unwrap();
    let inline = parse_options(&[OUTPUT], &args(&["--output=dir"])).unwrap();
    let short = parse_options(&[OUTPUT], &args(&["-o", "dir"])).unwrap();

    assert_eq!(spaced.value_of("output"), Some("dir"));
    assert_eq!(inline.value_of("output"), Some("dir"));
    assert_eq!(short.value_of("output"), Some("dir"));
    assert!(spaced.args.is_empty());
    assert!(short.args.is_empty());
}

#[test]
fn test_inline_empty_value() {
    let parsed = parse_options(&[OUTPUT], &args(&["--output="])).unwrap();

    assert_eq!(parsed.value_of("output"), Some(""));
}

#[test]
fn test_value_option_at_end_of_input() {
    let err = parse_options(&[OUTPUT], &args(&["--output"])).unwrap_err();
    assert!(matches!(err, Error::OptionRequiresValue(name) if name == "--output"));

    let err = parse_options(&[OUTPUT], &args(&["-o"])).unwrap_err();
    assert!(matches!(err, Error::OptionRequiresValue(name) if name == "-o"));
}

#[test]
fn test_boolean_rejects_inline_value() {
    let err = parse_options(&[VERBOSE], &args(&["--verbose=yes"])).unwrap_err();

    assert!(matches!(err, Error::OptionRejectsValue(name) if name == "--verbose"));
}

#[test]
fn test_unrecognized_option() {
    let err = parse_options(&[VERBOSE], &args(&["--bogus"])).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedOption(name) if name == "--bogus"));

    let err = parse_options(&[VERBOSE], &args(&["-z"])).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedOption(name) if name == "-z"));
}

#[test]
fn test_missing_required_option() {
    let err = parse_options(&[OUTPUT], &args(&["positional"])).unwrap_err();

    assert!(matches!(err, Error::MissingOption(name) if name == "--output"));
}

#[test]
fn test_double_dash_stops_scanning() {
    let parsed =
        parse_options(&[VERBOSE, FORCE], &args(&["-v", "--", "--force", "x"])).unwrap();

    assert!(parsed.is_enabled("verbose"));
    assert!(!parsed.is_enabled("force"));
    assert_eq!(parsed.args, args(&["--force", "x"]));
}

#[test]
fn test_malformed_tokens_stay_positional() {
    let parsed =
        parse_options(&[VERBOSE, FORCE], &args(&["ab--cd", "-x.y", "--"])).unwrap();

    assert_eq!(parsed.args, args(&["ab--cd", "-x.y"]));
}

#[test]
fn test_reparsing_residual_args_is_stable() {
    let definitions = [VERBOSE, MODE];
    let first =
        parse_options(&definitions, &args(&["a", "-v", "b", "--mode=fancy"])).unwrap();
    let second = parse_options(&definitions, &first.args).unwrap();

    // Everything option-like was consumed the first time around.
    assert_eq!(first.args, args(&["a", "b"]));
    assert_eq!(second.args, first.args);
    assert_eq!(second.value_of("mode"), Some("plain"));
}

#[test]
fn test_duplicate_alias_is_a_schema_error() {
    let clashing = OptionDef { key: "other", ..FORCE };
    let err = parse_options(&[FORCE, clashing], &args(&[])).unwrap_err();

    assert!(matches!(err, Error::SchemaError(_)));
}

#[test]
fn test_empty_alias_is_a_schema_error() {
    let broken = OptionDef {
        key: "broken",
        long: &[""],
        short: &[],
        has_value: false,
        default: None,
        description: "",
    };
    let err = parse_options(&[broken], &args(&[])).unwrap_err();

    assert!(matches!(err, Error::SchemaError(_)));
}

#[test]
fn test_map_args_by_position() {
    let definitions = [
        ArgDef { name: "template", is_optional: false },
        ArgDef { name: "dirname", is_optional: false },
    ];
    let mapped = map_args(&definitions, &args(&["rust", "my-app"])).unwrap();

    assert_eq!(mapped.get("template"), Some("rust"));
    assert_eq!(mapped.get("dirname"), Some("my-app"));
}

#[test]
fn test_map_args_optional_slot_may_stay_empty() {
    let definitions = [
        ArgDef { name: "template", is_optional: false },
        ArgDef { name: "dirname", is_optional: true },
    ];
    let mapped = map_args(&definitions, &args(&["rust"])).unwrap();

    assert_eq!(mapped.get("template"), Some("rust"));
    assert_eq!(mapped.get("dirname"), None);
    assert!(matches!(
        mapped.required("dirname"),
        Err(Error::MissingArgument(name)) if name == "dirname"
    ));
}

#[test]
fn test_map_args_too_many() {
    let definitions = [ArgDef { name: "template", is_optional: false }];
    let err = map_args(&definitions, &args(&["rust", "extra"])).unwrap_err();

    assert!(matches!(err, Error::TooManyArguments));
}

#[test]
fn test_map_args_missing_required() {
    let definitions = [
        ArgDef { name: "template", is_optional: false },
        ArgDef { name: "dirname", is_optional: false },
    ];
    let err = map_args(&definitions, &args(&["rust"])).unwrap_err();

    assert!(matches!(err, Error::MissingArgument(name) if name == "dirname"));
}

#[test]
fn test_map_args_required_after_optional_is_a_schema_error() {
    let definitions = [
        ArgDef { name: "template", is_optional: true },
        ArgDef { name: "dirname", is_optional: false },
    ];
    let err = map_args(&definitions, &args(&["rust", "my-app"])).unwrap_err();

    assert!(matches!(err, Error::SchemaError(_)));
}
