//
//  smartling-files
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output helpers.

use std::io::Write;

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::ApiResponse;

/// Writes `value` as pretty JSON to stdout.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Summary object printed by `--json`.
///
/// ```json
/// {"status": 200, "success": true, "code": "SUCCESS", "errors": [], "data": {...}}
/// ```
///
/// When the body is not an envelope, `code` is null and the body text is
/// reported under `body`.
pub fn response_summary(response: &ApiResponse) -> Value {
    match response.envelope() {
        Some(envelope) => json!({
            "status": response.status(),
            "success": response.is_success(),
            "code": envelope.code,
            "errors": envelope.error_messages(),
            "data": envelope.data,
        }),
        None => json!({
            "status": response.status(),
            "success": response.is_success(),
            "code": Value::Null,
            "body": response.text(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_envelope() {
        let response = ApiResponse::new(
            r#"{"response":{"code":"SUCCESS","data":{"fileUri":"a.json"}}}"#,
            200,
        );
        let summary = response_summary(&response);
        assert_eq!(summary["status"], 200);
        assert_eq!(summary["success"], true);
        assert_eq!(summary["code"], "SUCCESS");
        assert_eq!(summary["data"]["fileUri"], "a.json");
    }

    #[test]
    fn test_summary_of_plain_body() {
        let summary = response_summary(&ApiResponse::new("  gateway timeout\n", 504));
        assert_eq!(summary["success"], false);
        assert!(summary["code"].is_null());
        assert_eq!(summary["body"], "gateway timeout");
    }

    #[test]
    fn test_write_json_to() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
