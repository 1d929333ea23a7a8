//! 提示消息自动清除
//!
//! `success` 与 `error` 各自维护 generation 与挂起的清除任务；
//! 同一字段上的新消息会递增 generation 并中止旧定时器，
//! 定时器触发时只有在该字段的 generation 未变化时才会清除。

use tokio::task::AbortHandle;

/// 定时器要清除的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageField {
    Success,
    Error,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    pending: Option<AbortHandle>,
}

impl Slot {
    fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatusTracker {
    success: Slot,
    error: Slot,
}

impl StatusTracker {
    fn slot(&mut self, field: MessageField) -> &mut Slot {
        match field {
            MessageField::Success => &mut self.success,
            MessageField::Error => &mut self.error,
        }
    }

    /// 记录某字段的一次变化，返回该字段新的 generation
    pub(crate) fn bump(&mut self, field: MessageField) -> u64 {
        self.slot(field).bump()
    }

    /// 两个字段同时变化 (清空消息)
    pub(crate) fn bump_all(&mut self) {
        self.success.bump();
        self.error.bump();
    }

    #[cfg(test)]
    pub(crate) fn generation(&self, field: MessageField) -> u64 {
        match field {
            MessageField::Success => self.success.generation,
            MessageField::Error => self.error.generation,
        }
    }

    pub(crate) fn arm(&mut self, field: MessageField, handle: AbortHandle) {
        if let Some(old) = self.slot(field).pending.replace(handle) {
            old.abort();
        }
    }

    /// 定时器到期：该字段 generation 未变则释放挂起句柄并返回 true
    pub(crate) fn expire(&mut self, field: MessageField, generation: u64) -> bool {
        let slot = self.slot(field);
        if slot.generation != generation {
            return false;
        }
        slot.pending = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_stale_generation_does_not_expire() {
        let mut tracker = StatusTracker::default();
        let first = tracker.bump(MessageField::Success);
        let second = tracker.bump(MessageField::Success);
        assert_ne!(first, second);
        assert!(!tracker.expire(MessageField::Success, first));
        assert!(tracker.expire(MessageField::Success, second));
        assert_eq!(tracker.generation(MessageField::Success), second);
    }

    #[test]
    fn test_fields_are_independent() {
        let mut tracker = StatusTracker::default();
        let error = tracker.bump(MessageField::Error);
        tracker.bump(MessageField::Success);
        tracker.bump(MessageField::Success);
        assert!(tracker.expire(MessageField::Error, error));

        tracker.bump_all();
        assert!(!tracker.expire(MessageField::Error, error));
    }

    #[tokio::test]
    async fn test_bump_aborts_pending_task_of_same_field() {
        let mut tracker = StatusTracker::default();
        let sleeper = || {
            tokio::spawn(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
            })
        };

        tracker.bump(MessageField::Error);
        let error_task = sleeper();
        tracker.arm(MessageField::Error, error_task.abort_handle());

        tracker.bump(MessageField::Success);
        let success_task = sleeper();
        tracker.arm(MessageField::Success, success_task.abort_handle());
        tracker.bump(MessageField::Success);

        let err = success_task.await.unwrap_err();
        assert!(err.is_cancelled());
        // error timer survives changes to the success field
        assert!(!error_task.is_finished());
        error_task.abort();
    }
}
