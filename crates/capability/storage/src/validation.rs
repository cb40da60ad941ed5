//! 验证辅助函数
//!
//! 写入前的输入校验，内存实现与 Postgres 实现共用：
//! - ensure_non_empty：名称、IP 等必填文本
//! - ensure_led_position：segment 与 LED 序号不能为负
//! - ensure_quantity：库存数量不能为负

use crate::error::StorageError;

pub fn ensure_non_empty(field: &str, value: &str) -> Result<(), StorageError> {
    if value.trim().is_empty() {
        return Err(StorageError::invalid(format!("{field} required")));
    }
    Ok(())
}

/// 验证 LED 物理位置
pub fn ensure_led_position(segment_id: i32, led_index: i32) -> Result<(), StorageError> {
    if segment_id < 0 {
        return Err(StorageError::invalid("segment_id must be >= 0"));
    }
    if led_index < 0 {
        return Err(StorageError::invalid("led_index must be >= 0"));
    }
    Ok(())
}

pub fn ensure_quantity(quantity: i64) -> Result<(), StorageError> {
    if quantity < 0 {
        return Err(StorageError::invalid("quantity must be >= 0"));
    }
    Ok(())
}
