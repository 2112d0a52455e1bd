//! Wellness dashboard statistics computed from a user's stored records.

use std::collections::BTreeMap;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use mindcare_core::models::activity::{ActivityRecord, CHAT_STARTED};
use mindcare_core::models::assessment::AssessmentRecord;

/// One day on the mood chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub date: Date,
    /// Mean assessment average for the day, rounded to one decimal.
    pub mood: f64,
    pub sessions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_sessions: u32,
    /// Mean of all assessment averages, rounded to one decimal.
    pub average_mood: f64,
    pub streak_days: u32,
    /// Percent change from the earlier half of the results to the later half.
    pub improvement: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub trend: Vec<MoodPoint>,
}

/// Label for a whole-number mood on the 1–5 scale.
pub fn mood_label(mood: u8) -> &'static str {
    match mood {
        1 => "Very Low",
        2 => "Low",
        4 => "Good",
        5 => "Excellent",
        _ => "Neutral",
    }
}

pub fn build_dashboard(assessments: &[AssessmentRecord], activities: &[ActivityRecord]) -> Dashboard {
    let mut sorted: Vec<&AssessmentRecord> = assessments.iter().collect();
    sorted.sort_by_key(|a| a.created_at);

    let mut moods: BTreeMap<Date, Vec<f64>> = BTreeMap::new();
    for a in &sorted {
        moods.entry(day_of(a.created_at)).or_default().push(a.average_score);
    }

    let mut sessions: BTreeMap<Date, u32> = BTreeMap::new();
    for act in activities.iter().filter(|a| a.activity_type == CHAT_STARTED) {
        *sessions.entry(day_of(act.created_at)).or_default() += 1;
    }

    let trend = moods
        .iter()
        .map(|(date, values)| MoodPoint {
            date: *date,
            mood: round1(mean(values)),
            sessions: sessions.get(date).copied().unwrap_or(0),
        })
        .collect();

    let averages: Vec<f64> = sorted.iter().map(|a| a.average_score).collect();
    let stats = DashboardStats {
        total_sessions: sessions.values().sum(),
        average_mood: round1(mean(&averages)),
        streak_days: streak_days(moods.keys().copied()),
        improvement: improvement(&averages),
    };

    Dashboard { stats, trend }
}

/// Consecutive days, ending at the latest one, that appear in `days`.
pub fn streak_days(days: impl IntoIterator<Item = Date>) -> u32 {
    let mut days: Vec<Date> = days.into_iter().collect();
    days.sort();
    days.dedup();

    let Some(mut current) = days.pop() else {
        return 0;
    };
    let mut streak = 1;
    while let Some(previous) = days.pop() {
        match current.yesterday() {
            Ok(expected) if expected == previous => {
                streak += 1;
                current = previous;
            }
            _ => break,
        }
    }
    streak
}

/// Percent change of the later half's mean over the earlier half's.
/// Fewer than two results means no trend yet.
pub fn improvement(averages: &[f64]) -> i32 {
    if averages.len() < 2 {
        return 0;
    }
    let (earlier, later) = averages.split_at(averages.len() / 2);
    let base = mean(earlier);
    if base == 0.0 {
        return 0;
    }
    ((mean(later) - base) / base * 100.0).round() as i32
}

fn day_of(ts: jiff::Timestamp) -> Date {
    ts.to_zoned(TimeZone::UTC).date()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
