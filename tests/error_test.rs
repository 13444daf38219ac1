use std::io;

use stencil::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::EvalError("rendering failed".to_string());
    assert_eq!(err.to_string(), "Template evaluation error: rendering failed.");
}

#[test]
fn test_option_errors_name_the_alias() {
    let err = Error::UnrecognizedOption("--nope".to_string());
    assert_eq!(err.to_string(), "Unrecognized option: --nope.");

    let err = Error::MissingOption("--output".to_string());
    assert_eq!(err.to_string(), "Missing required option --output.");

    let err = Error::OptionRequiresValue("-o".to_string());
    assert_eq!(err.to_string(), "Option -o requires a value.");
}

#[test]
fn test_argument_errors() {
    assert_eq!(Error::TooManyArguments.to_string(), "Too many arguments.");

    let err = Error::MissingArgument("dirname".to_string());
    assert_eq!(err.to_string(), "Missing required argument: <dirname>.");
}

#[test]
fn test_template_errors() {
    let err = Error::TemplateNotFound("rust".to_string());
    assert_eq!(
        err.to_string(),
        "Template 'rust' not found. Use 'stencil list' for a list of available templates."
    );

    let err = Error::MissingEnvVar("USER".to_string());
    assert_eq!(err.to_string(), "Required environment variable USER was not set.");

    let err = Error::UnterminatedTag("main.rs.template".to_string());
    assert_eq!(err.to_string(), "Expected a closing tag %> in 'main.rs.template'.");
}
