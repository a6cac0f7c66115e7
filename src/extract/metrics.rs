//! Workload metrics derived from a rebuilt schedule.
use crate::config::MetricsConfig;
use crate::extract::schedule::{Schedule, ScheduleRecord};
use crate::spreadsheet::{Cell, Color};
use serde::Serialize;

/// Days per reporting week.
const WEEK_DAYS: usize = 7;

/// Days off per staff member, split by week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayOffSummary {
    pub staff_name: String,
    /// Day-off cells among days 1 to 7
    pub week1: usize,
    /// Day-off cells among days 8 to 14
    pub week2: usize,
}

impl DayOffSummary {
    pub fn total(&self) -> usize {
        self.week1 + self.week2
    }

    /// Share of the leave quota used, clamped to `[0, 1]`; zero when the quota is zero.
    pub fn quota_fraction(&self, quota: u32) -> f64 {
        if quota == 0 {
            return 0.0;
        }
        (self.total() as f64 / f64::from(quota)).clamp(0.0, 1.0)
    }
}

/// The day headers on which a staff member matched a criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaffDays {
    pub staff_name: String,
    pub days: Vec<String>,
}

/// The staff members matching a criterion on one day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayStaff {
    pub day: String,
    pub staff: Vec<String>,
}

/// All schedule metrics at once.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metrics {
    pub day_off: Vec<DayOffSummary>,
    /// Staff with at least one free day, in schedule order
    pub free_staff: Vec<String>,
    pub free_days: Vec<StaffDays>,
    pub free_by_day: Vec<DayStaff>,
    pub training_days: Vec<StaffDays>,
    pub leave_quota: u32,
}

impl Metrics {
    pub fn derive(schedule: &Schedule, config: &MetricsConfig) -> Self {
        Metrics {
            day_off: day_off_summary(schedule, &config.day_off_color),
            free_staff: free_staff(schedule, &config.free_token),
            free_days: free_days(schedule, &config.free_token),
            free_by_day: free_by_day(schedule, &config.free_token),
            training_days: training_days(schedule, &config.training_keyword),
            leave_quota: config.leave_quota,
        }
    }
}

fn count_color(days: &[Cell], color: &Color) -> usize {
    days.iter().filter(|day| &day.color == color).count()
}

/// Counts day-off colored cells in each half of every staff row.
pub fn day_off_summary(schedule: &Schedule, day_off_color: &Color) -> Vec<DayOffSummary> {
    schedule
        .records
        .iter()
        .map(|record| {
            let split = WEEK_DAYS.min(record.days.len());
            let end = (2 * WEEK_DAYS).min(record.days.len());
            DayOffSummary {
                staff_name: record.staff_name.clone(),
                week1: count_color(&record.days[..split], day_off_color),
                week2: count_color(&record.days[split..end], day_off_color),
            }
        })
        .collect()
}

fn is_free(day: &Cell, token: &str) -> bool {
    day.text.trim() == token
}

fn is_training(day: &Cell, keyword: &str) -> bool {
    day.text.to_lowercase().contains(keyword)
}

fn matching_days(schedule: &Schedule, mut predicate: impl FnMut(&Cell) -> bool) -> Vec<StaffDays> {
    let headers = schedule.day_headers();
    schedule
        .records
        .iter()
        .filter_map(|record: &ScheduleRecord| {
            let days: Vec<String> = record
                .days
                .iter()
                .zip(headers)
                .filter(|(day, _)| predicate(*day))
                .map(|(_, header)| header.clone())
                .collect();
            (!days.is_empty()).then(|| StaffDays {
                staff_name: record.staff_name.clone(),
                days,
            })
        })
        .collect()
}

/// Staff whose day text is exactly the free token on at least one day.
pub fn free_staff(schedule: &Schedule, token: &str) -> Vec<String> {
    schedule
        .records
        .iter()
        .filter(|record| record.days.iter().any(|day| is_free(day, token)))
        .map(|record| record.staff_name.clone())
        .collect()
}

/// Free days per staff member; staff without free days are left out.
pub fn free_days(schedule: &Schedule, token: &str) -> Vec<StaffDays> {
    matching_days(schedule, |day| is_free(day, token))
}

/// Training days per staff member, matched by case-insensitive substring.
pub fn training_days(schedule: &Schedule, keyword: &str) -> Vec<StaffDays> {
    let keyword = keyword.to_lowercase();
    matching_days(schedule, |day| is_training(day, &keyword))
}

/// Free staff grouped by day, in calendar order; days nobody is free are left out.
pub fn free_by_day(schedule: &Schedule, token: &str) -> Vec<DayStaff> {
    schedule
        .day_headers()
        .iter()
        .enumerate()
        .filter_map(|(index, header)| {
            let staff: Vec<String> = schedule
                .records
                .iter()
                .filter(|record| record.days.get(index).is_some_and(|day| is_free(day, token)))
                .map(|record| record.staff_name.clone())
                .collect();
            (!staff.is_empty()).then(|| DayStaff {
                day: header.clone(),
                staff,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::schedule::Anchor;
    use chrono::NaiveDate;

    fn yellow() -> Color {
        Color::parse("#FFFF00").unwrap()
    }

    fn schedule(records: Vec<(&str, Vec<Cell>)>) -> Schedule {
        let mut headers = vec!["Staff".to_owned()];
        headers.extend((1..=14).map(|day| format!("D{}", day)));
        Schedule {
            anchor: Anchor {
                row: 0,
                col: 2,
                date: NaiveDate::from_ymd_opt(2016, 2, 5).unwrap(),
            },
            headers,
            records: records
                .into_iter()
                .map(|(name, mut days)| {
                    days.resize(14, Cell::default());
                    ScheduleRecord {
                        staff_name: name.to_owned(),
                        name_color: Color::white(),
                        days,
                    }
                })
                .collect(),
        }
    }

    fn texts(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|text| Cell::new(*text, Color::white())).collect()
    }

    #[test]
    fn day_off_counts_per_week() {
        let mut days = vec![Cell::default(); 14];
        for index in [0, 3, 6, 7, 13] {
            days[index] = Cell::new("", yellow());
        }
        let schedule = schedule(vec![("Ana", days), ("Budi", Vec::new())]);
        let summary = day_off_summary(&schedule, &Color::parse("#ff0").unwrap());
        assert_eq!(summary[0].week1, 3);
        assert_eq!(summary[0].week2, 2);
        assert_eq!(summary[0].total(), 5);
        assert_eq!(summary[1].total(), 0);
    }

    #[test]
    fn quota_fraction_is_clamped() {
        let summary = DayOffSummary {
            staff_name: "Ana".to_owned(),
            week1: 3,
            week2: 3,
        };
        assert_eq!(summary.quota_fraction(30), 0.2);
        assert_eq!(summary.quota_fraction(4), 1.0);
        assert_eq!(summary.quota_fraction(0), 0.0);
    }

    #[test]
    fn only_exact_zero_is_free() {
        let schedule = schedule(vec![
            ("Ana", texts(&["0.5", "10", "8"])),
            ("Budi", texts(&["8", "0", "8", "0"])),
        ]);
        assert_eq!(free_staff(&schedule, "0"), vec!["Budi"]);
        assert_eq!(
            free_days(&schedule, "0"),
            vec![StaffDays {
                staff_name: "Budi".to_owned(),
                days: vec!["D2".to_owned(), "D4".to_owned()],
            }]
        );
    }

    #[test]
    fn free_staff_grouped_by_day() {
        let schedule = schedule(vec![("Ana", texts(&["0", "8", "0"])), ("Budi", texts(&["0"]))]);
        assert_eq!(
            free_by_day(&schedule, "0"),
            vec![
                DayStaff {
                    day: "D1".to_owned(),
                    staff: vec!["Ana".to_owned(), "Budi".to_owned()],
                },
                DayStaff {
                    day: "D3".to_owned(),
                    staff: vec!["Ana".to_owned()],
                },
            ]
        );
    }

    #[test]
    fn training_is_case_insensitive_substring() {
        let schedule = schedule(vec![
            ("Ana", texts(&["Revit TRAINING", "8", "training"])),
            ("Budi", texts(&["8"])),
        ]);
        let training = training_days(&schedule, "Training");
        assert_eq!(training.len(), 1);
        assert_eq!(training[0].days, vec!["D1", "D3"]);
    }

    #[test]
    fn derive_uses_config() {
        let schedule = schedule(vec![("Ana", texts(&["0"]))]);
        let metrics = Metrics::derive(&schedule, &MetricsConfig::default());
        assert_eq!(metrics.free_staff, vec!["Ana"]);
        assert_eq!(metrics.leave_quota, 30);
        assert!(metrics.training_days.is_empty());
    }
}
