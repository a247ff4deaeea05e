//! Dashboard and stats figures derived from the user's workout sessions.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashSet;

use super::{credentials, Result};
use crate::context::AppContext;
use crate::models::RecordId;

/// Score at which a constancy point counts as on target
pub const TARGET_SCORE: u8 = 60;

const INITIAL_SCORE: u8 = 50;
const TRAINED_BONUS: u8 = 15;
const REST_PENALTY: u8 = 8;
const MAX_SCORE: u8 = 100;
const MIN_SCORE: u8 = 10;

/// Days covered by the trend before today
const TREND_DAYS: u64 = 7;

const SHORT_WEEKDAYS: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];

#[derive(Debug, Clone, Deserialize)]
pub struct SessionStamp {
    pub id: RecordId,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstancyPoint {
    pub date: NaiveDate,
    pub label: &'static str,
    pub score: u8,
}

impl ConstancyPoint {
    pub fn meets_target(&self) -> bool {
        self.score >= TARGET_SCORE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_sessions: usize,
    /// Distinct days trained since Monday
    pub weekly_sessions: usize,
    /// Oldest first, ending today
    pub constancy: Vec<ConstancyPoint>,
}

pub fn short_weekday(date: NaiveDate) -> &'static str {
    SHORT_WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

pub fn start_of_week(today: NaiveDate) -> NaiveDate {
    today - Days::new(u64::from(today.weekday().num_days_from_monday()))
}

/// Number of distinct calendar days with a session on or after this week's Monday
pub fn weekly_days(dates: &[NaiveDate], today: NaiveDate) -> usize {
    let monday = start_of_week(today);
    dates
        .iter()
        .filter(|d| **d >= monday)
        .collect::<HashSet<_>>()
        .len()
}

/// Constancy score for today and the previous seven days
pub fn constancy_trend(dates: &[NaiveDate], today: NaiveDate) -> Vec<ConstancyPoint> {
    let trained: HashSet<&NaiveDate> = dates.iter().collect();
    let mut score = INITIAL_SCORE;

    (0..=TREND_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Days::new(offset);
            score = if trained.contains(&date) {
                score.saturating_add(TRAINED_BONUS).min(MAX_SCORE)
            } else {
                score.saturating_sub(REST_PENALTY).max(MIN_SCORE)
            };

            ConstancyPoint {
                date,
                label: short_weekday(date),
                score,
            }
        })
        .collect()
}

pub fn compute(sessions: &[SessionStamp], today: NaiveDate) -> DashboardStats {
    let dates: Vec<NaiveDate> = sessions
        .iter()
        .map(|s| s.started_at.with_timezone(&Local).date_naive())
        .collect();

    DashboardStats {
        total_sessions: sessions.len(),
        weekly_sessions: weekly_days(&dates, today),
        constancy: constancy_trend(&dates, today),
    }
}

/// Fetch the user's sessions and compute today's figures
pub async fn load(ctx: &AppContext) -> Result<DashboardStats> {
    let (token, user_id) = credentials(ctx).await?;

    let sessions: Vec<SessionStamp> = ctx
        .backend
        .table("workout_sessions", &token)
        .select("id,started_at")
        .eq("user_id", user_id)
        .order("started_at", true)
        .fetch()
        .await?;

    tracing::debug!("Loaded {} session timestamps", sessions.len());
    Ok(compute(&sessions, Local::now().date_naive()))
}
