//! Display numbers for the dashboard. Nothing here reflects a real mailbox:
//! cards and gauges come from session values or fixed defaults, and the
//! analytics series is synthesized from a hash of each calendar date.

use crate::state::{MetricKey, SessionState};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProgress {
    pub name: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_emails: u64,
    pub cleaned_emails: u64,
    pub space_saved_label: String,
    pub time_saved_label: String,
    pub emails_processed: u64,
    pub progress_by_category: Vec<CategoryProgress>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub received: u32,
    pub sent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderCount {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub name: &'static str,
    pub percent: u8,
}

const CLEANUP_PROGRESS: [(&str, u8); 3] = [
    ("Spam Removal", 73),
    ("Organization", 89),
    ("Unsubscribe", 56),
];

const TOP_SENDERS: [(&str, usize); 6] = [
    ("Amazon", 45),
    ("Google", 32),
    ("LinkedIn", 28),
    ("GitHub", 23),
    ("Netflix", 15),
    ("Others", 67),
];

const CATEGORIES: [(&str, u8); 5] = [
    ("Promotions", 40),
    ("Work", 25),
    ("Personal", 20),
    ("Bills", 10),
    ("Social", 5),
];

/// Reads session values, falling back to defaults. Never writes.
pub fn snapshot(state: &SessionState) -> MetricsSnapshot {
    let count = |key: MetricKey| {
        state
            .get(key)
            .as_count()
            .or_else(|| key.default_value().as_count())
            .unwrap_or_default()
    };

    MetricsSnapshot {
        total_emails: count(MetricKey::TotalEmails),
        cleaned_emails: count(MetricKey::CleanedEmails),
        space_saved_label: state.get(MetricKey::SpaceSaved).to_string(),
        time_saved_label: state.get(MetricKey::TimeSaved).to_string(),
        emails_processed: count(MetricKey::EmailsProcessed),
        progress_by_category: CLEANUP_PROGRESS
            .iter()
            .map(|&(name, percent)| CategoryProgress { name, percent })
            .collect(),
    }
}

/// Daily received/sent counts from 2024-01-01 through 2024-08-29.
pub fn email_volume() -> Vec<VolumePoint> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 8, 29),
    ) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let hash = fnv1a(&date.format("%Y-%m-%d").to_string());
            VolumePoint {
                date,
                received: 20 + (10 * (hash % 100) / 100) as u32,
                sent: 5 + (5 * (hash % 50) / 50) as u32,
            }
        })
        .collect()
}

pub fn top_senders() -> Vec<SenderCount> {
    TOP_SENDERS
        .iter()
        .map(|&(name, count)| SenderCount { name, count })
        .collect()
}

pub fn categories() -> Vec<CategoryShare> {
    CATEGORIES
        .iter()
        .map(|&(name, percent)| CategoryShare { name, percent })
        .collect()
}

// 64-bit FNV-1a; stable across runs and platforms.
fn fnv1a(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MetricValue;

    #[test]
    fn snapshot_uses_defaults_for_fresh_session() {
        let snap = snapshot(&SessionState::default());
        assert_eq!(snap.total_emails, 1247);
        assert_eq!(snap.cleaned_emails, 342);
        assert_eq!(snap.space_saved_label, "2.4 GB");
        assert_eq!(snap.time_saved_label, "5.2 hrs");
        assert_eq!(snap.emails_processed, 1247);
        let names: Vec<_> = snap.progress_by_category.iter().map(|c| c.name).collect();
        assert_eq!(names, ["Spam Removal", "Organization", "Unsubscribe"]);
        assert!(snap.progress_by_category.iter().all(|c| c.percent <= 100));
    }

    #[test]
    fn snapshot_prefers_session_values() {
        let mut state = SessionState::default();
        state.set(MetricKey::CleanedEmails, MetricValue::Count(500));
        state.set(MetricKey::TimeSaved, MetricValue::Label("7 hrs".to_string()));
        // A label under a count key falls back to the default count.
        state.set(MetricKey::TotalEmails, MetricValue::Label("lots".to_string()));

        let snap = snapshot(&state);
        assert_eq!(snap.cleaned_emails, 500);
        assert_eq!(snap.time_saved_label, "7 hrs");
        assert_eq!(snap.total_emails, 1247);
    }

    #[test]
    fn volume_spans_the_date_range() {
        let volume = email_volume();
        assert_eq!(volume.len(), 242);
        assert_eq!(volume.first().unwrap().date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(volume.last().unwrap().date, NaiveDate::from_ymd_opt(2024, 8, 29).unwrap());
        for point in &volume {
            assert!((20..30).contains(&point.received));
            assert!((5..10).contains(&point.sent));
        }
    }

    #[test]
    fn volume_is_deterministic() {
        assert_eq!(email_volume(), email_volume());
    }

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(fnv1a(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn fixed_breakdowns() {
        let senders = top_senders();
        assert_eq!(senders.len(), 6);
        assert_eq!(senders.iter().map(|s| s.count).sum::<usize>(), 210);
        let categories = categories();
        assert_eq!(categories.iter().map(|c| u32::from(c.percent)).sum::<u32>(), 100);
    }
}
