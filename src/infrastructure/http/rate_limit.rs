//! Fixed-window rate limiter
//!
//! 每个客户端（按 IP）一个计数窗口，窗口到期后重新计数

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// 限流配置
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_requests: 100,
        }
    }
}

/// 单次检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// 固定窗口限流器
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// 记录一次请求并判断是否放行
    pub fn check(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut window = self.windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(window.started_at);
        if elapsed >= self.config.window {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.config.max_requests {
            let retry_after = self
                .config
                .window
                .saturating_sub(now.saturating_duration_since(window.started_at));
            return RateLimitDecision::Limited { retry_after };
        }

        window.count += 1;
        RateLimitDecision::Allowed {
            remaining: self.config.max_requests - window.count,
        }
    }

    /// 清理已过期的窗口，返回清理数量
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.windows.len();
        let window = self.config.window;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started_at) < window);
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
