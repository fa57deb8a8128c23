use modpath_core::version::SCHEMA_VERSION;
use serde::Serialize;

/// Error body for JSON output.
#[derive(Serialize)]
struct ErrorResult {
    schema_version: u32,
    ok: bool,
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

fn error_json(code: &'static str, message: String) -> String {
    let result = ErrorResult {
        schema_version: SCHEMA_VERSION,
        ok: false,
        error: ErrorInfo { code, message },
    };
    serde_json::to_string_pretty(&result)
        .unwrap_or_else(|_| format!(r#"{{"ok":false,"error":{{"code":"{code}"}}}}"#))
}

/// Print `{ ok: false, error: { code, message } }` to stdout and exit 1.
pub fn fail_json(code: &'static str, message: String) -> ! {
    tracing::debug!(code, %message, "command failed");
    println!("{}", error_json(code, message));
    std::process::exit(1);
}
