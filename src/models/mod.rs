pub mod missed;
pub mod plan;
pub mod prayer;
pub mod progress;
pub mod stats;

pub use missed::{MissedPrayer, TimeUnit};
pub use plan::{MakeupPlan, MakeupStrategy, NotificationStrategy};
pub use prayer::{parse_prayer_list, PrayerType};
pub use progress::{ProgressEntry, TimeRange};
pub use stats::{DailyBreakdown, PrayerShare, ProgressSummary};
