//! 应用层 - 查询（读操作）

mod todo_queries;

pub mod handlers;

pub use todo_queries::*;
