use serde::Serialize;

use crate::models::{Components, SubjectRecord};

/// Internal assessment totals are out of this many marks.
pub const MAX_INTERNAL_MARKS: f64 = 70.0;
/// Scores below this percentage make a subject weak.
pub const WEAK_THRESHOLD: u32 = 70;
pub const STRONG_THRESHOLD: u32 = 85;

/// Internal total as a rounded percentage.
pub fn score_percent(total: f64) -> u32 {
    ((total / MAX_INTERNAL_MARKS) * 100.0).round().max(0.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Average,
    Weak,
}

impl Strength {
    pub fn classify(score: u32, weak_threshold: u32) -> Self {
        if score >= STRONG_THRESHOLD {
            Strength::Strong
        } else if score >= weak_threshold {
            Strength::Average
        } else {
            Strength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Average => "Average",
            Strength::Weak => "Weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectScore {
    pub subject: String,
    pub score: u32,
    pub components: Components,
    pub class_average: f64,
    pub strength: Strength,
    pub attendance: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrengthBreakdown {
    pub strong: usize,
    pub average: usize,
    pub weak: usize,
}

impl StrengthBreakdown {
    pub fn total(&self) -> usize {
        self.strong + self.average + self.weak
    }
}

/// Everything the dashboard shows about marks and attendance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub subjects: Vec<SubjectScore>,
    pub breakdown: StrengthBreakdown,
    pub overall_average: Option<u32>,
    pub overall_attendance: Option<u32>,
}

pub(crate) fn attendance_percent(attended: u32, held: u32) -> Option<u32> {
    if held == 0 {
        None
    } else {
        Some(((attended as f64 / held as f64) * 100.0).round() as u32)
    }
}

impl PerformanceReport {
    pub fn from_records(records: &[SubjectRecord], weak_threshold: u32) -> Self {
        let subjects: Vec<SubjectScore> = records
            .iter()
            .map(|r| {
                let score = score_percent(r.total);
                SubjectScore {
                    subject: r.subject.clone(),
                    score,
                    components: r.components(),
                    class_average: r.class_average,
                    strength: Strength::classify(score, weak_threshold),
                    attendance: attendance_percent(r.attended, r.held),
                }
            })
            .collect();

        let mut breakdown = StrengthBreakdown::default();
        for s in &subjects {
            match s.strength {
                Strength::Strong => breakdown.strong += 1,
                Strength::Average => breakdown.average += 1,
                Strength::Weak => breakdown.weak += 1,
            }
        }

        let overall_average = if subjects.is_empty() {
            None
        } else {
            let sum: u32 = subjects.iter().map(|s| s.score).sum();
            Some((sum as f64 / subjects.len() as f64).round() as u32)
        };

        let attended: u32 = records.iter().map(|r| r.attended).sum();
        let held: u32 = records.iter().map(|r| r.held).sum();

        Self {
            subjects,
            breakdown,
            overall_average,
            overall_attendance: attendance_percent(attended, held),
        }
    }

    pub fn weak_subjects(&self) -> Vec<String> {
        self.subjects
            .iter()
            .filter(|s| s.strength == Strength::Weak)
            .map(|s| s.subject.clone())
            .collect()
    }
}

/// Subjects scoring below `weak_threshold`, in record order.
pub fn weak_subjects(records: &[SubjectRecord], weak_threshold: u32) -> Vec<String> {
    records
        .iter()
        .filter(|r| score_percent(r.total) < weak_threshold)
        .map(|r| r.subject.clone())
        .collect()
}
