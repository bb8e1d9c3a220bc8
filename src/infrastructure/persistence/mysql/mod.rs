//! MySQL Persistence - MySQL 数据库持久化实现

mod database;
mod retry;
mod todo_repo;

pub use database::*;
pub use retry::*;
pub use todo_repo::*;
