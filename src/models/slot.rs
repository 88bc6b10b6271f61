//! Time slots, work sessions, and time windows.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::api::SlotId;
use crate::config::ShiftConfig;

/// Work session within a day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkSession {
    Morning,
    Afternoon,
    Evening,
}

impl WorkSession {
    pub fn label(&self) -> &'static str {
        match self {
            WorkSession::Morning => "morning",
            WorkSession::Afternoon => "afternoon",
            WorkSession::Evening => "evening",
        }
    }
}

impl std::fmt::Display for WorkSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Time window within a day (start strictly before end).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Create a window. Returns `None` unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Parse from "HH:MM" strings.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start = NaiveTime::parse_from_str(start, "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end, "%H:%M").ok()?;
        Self::new(start, end)
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Check if this window overlaps with another.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// A scheduled time window in the weekly grid: one calendar date crossed
/// with one work session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    /// Calendar date of the slot.
    pub date: NaiveDate,
    /// Display label for the day column (e.g. "Mon").
    pub day_label: String,
    /// Work session of the slot.
    pub session: WorkSession,
    /// Display name of the period (e.g. "Monday morning").
    pub period_name: String,
    /// Default start/end inherited from the session-level shift defaults.
    pub default_window: TimeWindow,
}

impl TimeSlot {
    /// Build a slot for a date and session, inheriting the session's default
    /// window from the shift configuration.
    pub fn new(id: SlotId, date: NaiveDate, session: WorkSession, shifts: &ShiftConfig) -> Self {
        let day_label = short_day_label(date.weekday()).to_string();
        let period_name = format!("{} {}", day_label, session.label());
        Self {
            id,
            date,
            day_label,
            session,
            period_name,
            default_window: shifts.window_for(session),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Build the full week of enabled slots (7 days × 3 sessions) starting at
/// `monday`, with sequential slot ids from 1.
pub fn week_slots(monday: NaiveDate, shifts: &ShiftConfig) -> Vec<TimeSlot> {
    let sessions = [
        WorkSession::Morning,
        WorkSession::Afternoon,
        WorkSession::Evening,
    ];
    let mut slots = Vec::with_capacity(7 * sessions.len());
    let mut next_id = 1;
    for day in 0..7u64 {
        let date = monday + chrono::Days::new(day);
        for session in sessions {
            slots.push(TimeSlot::new(SlotId::new(next_id), date, session, shifts));
            next_id += 1;
        }
    }
    slots
}

fn short_day_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_requires_start_before_end() {
        assert!(TimeWindow::parse("08:00", "12:00").is_some());
        assert!(TimeWindow::parse("12:00", "08:00").is_none());
        assert!(TimeWindow::parse("08:00", "08:00").is_none());
    }

    #[test]
    fn test_window_overlaps() {
        let a = TimeWindow::parse("08:00", "12:00").unwrap();
        let b = TimeWindow::parse("11:00", "14:00").unwrap();
        let c = TimeWindow::parse("12:00", "14:00").unwrap();

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_window_display() {
        let w = TimeWindow::parse("08:30", "12:00").unwrap();
        assert_eq!(w.to_string(), "08:30-12:00");
    }

    #[test]
    fn test_week_slots_cover_all_sessions() {
        let shifts = ShiftConfig::default();
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let slots = week_slots(monday, &shifts);

        assert_eq!(slots.len(), 21);
        assert_eq!(slots[0].day_label, "Mon");
        assert_eq!(slots[0].session, WorkSession::Morning);
        assert_eq!(slots[20].day_label, "Sun");
        assert_eq!(slots[20].session, WorkSession::Evening);
        // Slot ids are unique and sequential.
        assert_eq!(slots[20].id, SlotId::new(21));
    }

    #[test]
    fn test_slot_inherits_session_default() {
        let shifts = ShiftConfig::default();
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(); // a Monday
        let slot = TimeSlot::new(SlotId::new(1), date, WorkSession::Morning, &shifts);

        assert_eq!(slot.day_label, "Mon");
        assert_eq!(slot.period_name, "Mon morning");
        assert_eq!(slot.default_window, shifts.window_for(WorkSession::Morning));
    }
}
