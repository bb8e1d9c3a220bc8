//! 固定间隔重试
//!
//! 仅用于启动阶段的数据库连接，请求处理路径上不重试

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// 重试策略
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// 最大尝试次数（0 按 1 处理）
    pub max_attempts: u32,
    /// 两次尝试之间的固定间隔
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// 所有尝试均失败
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// 按策略重复执行 `op`，返回第一次成功的结果
///
/// `op` 的参数为当前尝试序号（从 1 开始）。最后一次失败后不再等待。
pub async fn retry_with_delay<T, E, F, Fut>(
    policy: RetryPolicy,
    what: &str,
    mut op: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let total = policy.attempts();
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!("{} attempt {}/{} failed: {}", what, attempt, total, e);
                if attempt >= total {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }
            }
        }

        tokio::time::sleep(policy.delay).await;
        attempt += 1;
    }
}
