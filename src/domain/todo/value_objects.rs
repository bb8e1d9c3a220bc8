//! Todo Context - Value Objects

use super::TodoError;

/// 待办事项唯一标识（数据库自增主键）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(i64);

impl TodoId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// 解析路径参数，只接受正整数
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 待办事项标题
///
/// 不变量:
/// - 已去除首尾空白
/// - 不为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(title: impl AsRef<str>) -> Result<Self, TodoError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
