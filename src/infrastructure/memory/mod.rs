//! Memory Layer - In-Memory Storage
//!
//! TodoRepositoryPort 的内存实现，用于本地运行（database.backend = "memory"）和测试

mod todo_repo;

pub use todo_repo::InMemoryTodoRepository;
