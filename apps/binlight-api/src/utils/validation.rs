//! 输入验证辅助函数
//!
//! - normalize_required：必填文本，去除首尾空格并检查非空
//! - normalize_optional：可选文本，提供时同样要求非空
//! - ensure_non_negative：segment、LED 序号、数量等不能为负
//!
//! 失败统一返回 `400 INVALID.REQUEST` 响应。

use crate::utils::response::bad_request_error;
use axum::response::Response;

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// 验证可选字段，如果提供则去除空格并检查非空
pub fn normalize_optional(value: Option<String>, field: &str) -> Result<Option<String>, Response> {
    match value {
        Some(value) => normalize_required(value, field).map(Some),
        None => Ok(None),
    }
}

pub fn ensure_non_negative(value: i64, field: &str) -> Result<(), Response> {
    if value < 0 {
        return Err(bad_request_error(format!("{field} must be >= 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(
            normalize_required("  Rack A ".to_string(), "name").ok(),
            Some("Rack A".to_string())
        );
        let response = normalize_required("   ".to_string(), "name").err().expect("rejected");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn optional_passes_through_none() {
        assert_eq!(normalize_optional(None, "name").ok(), Some(None));
        assert!(normalize_optional(Some(String::new()), "name").is_err());
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(ensure_non_negative(0, "quantity").is_ok());
        assert!(ensure_non_negative(-1, "quantity").is_err());
    }
}
