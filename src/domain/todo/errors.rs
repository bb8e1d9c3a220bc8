//! Todo Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("Title is required")]
    EmptyTitle,
}
