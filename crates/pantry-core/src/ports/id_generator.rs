//! RequestIdGenerator port - リクエスト ID 生成の抽象化
//!
//! # 実装
//! - **UlidRequestIds**: ULID ベース（Clock から timestamp を取る）

use crate::domain::RequestId;
use crate::ports::Clock;
use ulid::Ulid;

/// RequestIdGenerator はログ相関用の ID を生成
pub trait RequestIdGenerator: Send + Sync {
    fn next_request_id(&self) -> RequestId;
}

/// UlidRequestIds は ULID ベースの ID 生成器
///
/// FixedClock を渡すと timestamp 部分が決定的になります。
pub struct UlidRequestIds<C> {
    clock: C,
}

impl<C: Clock> UlidRequestIds<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> RequestIdGenerator for UlidRequestIds<C> {
    fn next_request_id(&self) -> RequestId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        RequestId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generates_unique_ids() {
        let ids = UlidRequestIds::new(SystemClock);
        let a = ids.next_request_id();
        let b = ids.next_request_id();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_clock_pins_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let ids = UlidRequestIds::new(FixedClock::new(fixed_time));

        let a = ids.next_request_id();
        let b = ids.next_request_id();

        // ランダム部分があるので ID は異なるが、timestamp は同じ
        assert_ne!(a, b);
        assert_eq!(a.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
        assert_eq!(b.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }
}
