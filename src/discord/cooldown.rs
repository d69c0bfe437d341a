//! Per-user command cooldowns.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serenity::model::id::UserId;

/// Tracks the last accepted invocation per user within a fixed window.
///
/// A rejected attempt does not consume or extend the window, and `reset`
/// hands the token back when a command fails logically (blueprint not
/// found) so the user is not penalized twice.
#[derive(Debug)]
pub struct CooldownBucket {
    window: Duration,
    last_used: HashMap<UserId, Instant>,
}

impl CooldownBucket {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_used: HashMap::new(),
        }
    }

    /// Try to consume the user's cooldown token.
    ///
    /// Ok means the invocation is allowed and the window restarts now;
    /// Err carries the remaining wait time.
    pub fn check(&mut self, user: UserId) -> Result<(), Duration> {
        self.check_at(user, Instant::now())
    }

    fn check_at(&mut self, user: UserId, now: Instant) -> Result<(), Duration> {
        if let Some(&last) = self.last_used.get(&user) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.window {
                return Err(self.window - elapsed);
            }
        }
        self.last_used.insert(user, now);
        Ok(())
    }

    /// Return the user's token without waiting out the window.
    pub fn reset(&mut self, user: UserId) {
        self.last_used.remove(&user);
    }
}
