//! Todo Context - 待办事项限界上下文
//!
//! 职责:
//! - Todo 聚合（标题、完成状态、创建时间）
//! - 标题校验（去除首尾空白后不能为空）

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::Todo;
pub use errors::TodoError;
pub use value_objects::{TodoId, TodoTitle};
