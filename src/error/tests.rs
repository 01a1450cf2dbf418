use crate::error::*;

#[test]
fn test_error_context_toolchain_not_found() {
    let error = LandasError::ToolchainNotFound {
        searched: "c++, g++, clang++, cc, gcc, clang".to_string(),
    };
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.suggestion.unwrap().contains("CXX"));
    assert!(context.details.is_some());
    assert!(context.details.unwrap().contains("g++"));
}

#[test]
fn test_error_context_probe_failure() {
    let error = LandasError::ToolchainProbe("g++ exited with signal 9".to_string());
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.suggestion.unwrap().contains("-vv"));
    assert!(context.details.unwrap().contains("signal 9"));
}

#[test]
fn test_error_context_invalid_version_format() {
    let error = LandasError::InvalidVersionFormat("x.y".to_string());
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("<major>"));
    assert!(context.details.unwrap().contains("x.y"));
}

#[test]
fn test_error_context_with_custom_suggestion() {
    let error = LandasError::UnrecognizedOutput("garbage".to_string());
    let context = ErrorContext::new(&error)
        .with_suggestion("Try a different compiler.".to_string());

    assert_eq!(
        context.suggestion,
        Some("Try a different compiler.".to_string())
    );
}

#[test]
fn test_error_context_display() {
    let error = LandasError::ConfigFile("expected a table at line 3".to_string());
    let context = ErrorContext::new(&error);
    let output = context.to_string();

    assert!(output.contains("Error:"));
    assert!(output.contains("Details:"));
    assert!(output.contains("Suggestion:"));
}

#[test]
fn test_io_error_permission_denied() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
    let error = LandasError::Io(io_err);
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.details.unwrap().contains("I/O error"));
}

#[test]
fn test_exit_codes() {
    assert_eq!(
        get_exit_code(&LandasError::InvalidVersionFormat("test".to_string())),
        2
    );
    assert_eq!(
        get_exit_code(&LandasError::InvalidConfig("test".to_string())),
        2
    );
    assert_eq!(
        get_exit_code(&LandasError::ToolchainNotFound {
            searched: "cl".to_string(),
        }),
        127
    );
    assert_eq!(
        get_exit_code(&LandasError::ToolchainProbe("test".to_string())),
        1
    );
    assert_eq!(
        get_exit_code(&LandasError::UnrecognizedOutput("test".to_string())),
        1
    );
}

#[test]
fn test_format_error_chain() {
    let error = LandasError::InvalidVersionFormat("test".to_string());
    let formatted = format_error_chain(&error);

    assert!(formatted.contains("Error:"));
    assert!(formatted.contains("Invalid version format"));
}
