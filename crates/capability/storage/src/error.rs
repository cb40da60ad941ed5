//! 存储层错误类型
//!
//! 定义统一的存储错误类型，用于封装底层错误：
//! - 约束冲突（唯一约束、外键约束），调用方据此返回 409/400
//! - 记录不存在、输入非法
//! - SQL 执行错误、连接错误

/// 存储错误分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// 唯一约束冲突（重名料格、重复 IP 等）。
    UniqueViolation,
    /// 外键约束冲突（删除仍被引用的记录，或引用不存在的记录）。
    ForeignKeyViolation,
    NotFound,
    Invalid,
    Backend,
}

#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(StorageErrorKind::Backend, message)
    }

    pub fn with_kind(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self::with_kind(StorageErrorKind::UniqueViolation, message)
    }

    pub fn foreign_key_violation(message: impl Into<String>) -> Self {
        Self::with_kind(StorageErrorKind::ForeignKeyViolation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(StorageErrorKind::NotFound, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::with_kind(StorageErrorKind::Invalid, message)
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_unique_violation(&self) -> bool {
        self.kind == StorageErrorKind::UniqueViolation
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.kind == StorageErrorKind::ForeignKeyViolation
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        // Postgres SQLSTATE：23505 唯一约束，23503 外键约束
        let code = err
            .as_database_error()
            .and_then(|db| db.code().map(|code| code.into_owned()));
        let kind = match code.as_deref() {
            Some("23505") => StorageErrorKind::UniqueViolation,
            Some("23503") => StorageErrorKind::ForeignKeyViolation,
            _ if matches!(err, sqlx::Error::RowNotFound) => StorageErrorKind::NotFound,
            _ => StorageErrorKind::Backend,
        };
        Self::with_kind(kind, err.to_string())
    }
}
