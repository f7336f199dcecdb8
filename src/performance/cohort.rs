//! Faculty views over a roster: one subject across the class, and every
//! subject across the students a proctor looks after.
//!
//! Students with no marks for a subject are listed but left out of the
//! distribution and the averages.

use serde::Serialize;

use crate::models::{Components, StudentMarks};
use crate::performance::analysis::{attendance_percent, score_percent, Strength, StrengthBreakdown};

fn mean(values: impl IntoIterator<Item = u32>) -> Option<u32> {
    let (sum, n) = values
        .into_iter()
        .fold((0u32, 0u32), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some((sum as f64 / n as f64).round() as u32)
    }
}

fn tally(strengths: impl IntoIterator<Item = Strength>) -> StrengthBreakdown {
    strengths
        .into_iter()
        .fold(StrengthBreakdown::default(), |mut acc, s| {
            match s {
                Strength::Strong => acc.strong += 1,
                Strength::Average => acc.average += 1,
                Strength::Weak => acc.weak += 1,
            }
            acc
        })
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentSubjectRow {
    pub usn: String,
    pub name: String,
    /// `None` when the student has no marks for the subject.
    pub score: Option<u32>,
    pub strength: Option<Strength>,
    pub components: Components,
    pub attendance: Option<u32>,
}

/// One subject across the whole roster.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectCohort {
    pub subject: String,
    pub rows: Vec<StudentSubjectRow>,
    pub distribution: StrengthBreakdown,
    pub class_average: Option<u32>,
    pub class_attendance: Option<u32>,
}

impl SubjectCohort {
    pub fn from_roster(subject: &str, roster: &[StudentMarks], weak_threshold: u32) -> Self {
        let mut attended = 0;
        let mut held = 0;
        let rows: Vec<StudentSubjectRow> = roster
            .iter()
            .map(|sm| {
                let record = sm.record_for(subject);
                let score = record.map(|r| score_percent(r.total));
                if let Some(r) = record {
                    attended += r.attended;
                    held += r.held;
                }
                StudentSubjectRow {
                    usn: sm.student.usn.clone(),
                    name: sm.student.short_name(),
                    score,
                    strength: score.map(|s| Strength::classify(s, weak_threshold)),
                    components: record.map(|r| r.components()).unwrap_or_default(),
                    attendance: record.and_then(|r| attendance_percent(r.attended, r.held)),
                }
            })
            .collect();

        Self {
            subject: subject.to_string(),
            distribution: tally(rows.iter().filter_map(|r| r.strength)),
            class_average: mean(rows.iter().filter_map(|r| r.score)),
            class_attendance: attendance_percent(attended, held),
            rows,
        }
    }

    pub fn recorded(&self) -> usize {
        self.rows.iter().filter(|r| r.score.is_some()).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProctorRow {
    pub usn: String,
    pub name: String,
    /// Aligned with [`ProctorReport::subjects`].
    pub scores: Vec<Option<u32>>,
    pub average: Option<u32>,
    pub strength: Option<Strength>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectAverage {
    pub subject: String,
    pub average: Option<u32>,
}

/// Every subject across every student on the roster.
#[derive(Debug, Clone, Serialize)]
pub struct ProctorReport {
    /// Subjects in the order they first appear on the roster.
    pub subjects: Vec<String>,
    pub students: Vec<ProctorRow>,
    pub distribution: StrengthBreakdown,
    pub subject_averages: Vec<SubjectAverage>,
}

impl ProctorReport {
    pub fn from_roster(roster: &[StudentMarks], weak_threshold: u32) -> Self {
        let mut subjects: Vec<String> = Vec::new();
        for r in roster.iter().flat_map(|sm| &sm.records) {
            if !subjects.iter().any(|s| s.eq_ignore_ascii_case(&r.subject)) {
                subjects.push(r.subject.clone());
            }
        }

        let students: Vec<ProctorRow> = roster
            .iter()
            .map(|sm| {
                let scores: Vec<Option<u32>> = subjects
                    .iter()
                    .map(|s| sm.record_for(s).map(|r| score_percent(r.total)))
                    .collect();
                let average = mean(scores.iter().flatten().copied());
                ProctorRow {
                    usn: sm.student.usn.clone(),
                    name: sm.student.short_name(),
                    average,
                    strength: average.map(|a| Strength::classify(a, weak_threshold)),
                    scores,
                }
            })
            .collect();

        let subject_averages = subjects
            .iter()
            .enumerate()
            .map(|(i, subject)| SubjectAverage {
                subject: subject.clone(),
                average: mean(students.iter().filter_map(|row| row.scores[i])),
            })
            .collect();

        Self {
            distribution: tally(students.iter().filter_map(|r| r.strength)),
            subjects,
            students,
            subject_averages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Student, SubjectRecord};
    use crate::performance::WEAK_THRESHOLD;

    fn student(usn: &str, name: &str, records: Vec<SubjectRecord>) -> StudentMarks {
        StudentMarks {
            student: Student {
                usn: usn.to_string(),
                name: name.to_string(),
                semester: 3,
            },
            records,
        }
    }

    fn marks(subject: &str, total: f64, attended: u32, held: u32) -> SubjectRecord {
        SubjectRecord {
            attended,
            held,
            ..SubjectRecord::new(subject, total)
        }
    }

    fn roster() -> Vec<StudentMarks> {
        vec![
            student(
                "1RV21CS001",
                "Asha Rao Kulkarni",
                vec![marks("DBMS", 63.0, 18, 20), marks("OS", 52.0, 16, 20)],
            ),
            student("1RV21CS002", "Ravi Kumar", vec![marks("DBMS", 35.0, 10, 20)]),
            student("1RV21CS003", "Meera", vec![]),
        ]
    }

    #[test]
    fn subject_view_buckets_recorded_students() {
        let cohort = SubjectCohort::from_roster("dbms", &roster(), WEAK_THRESHOLD);
        assert_eq!(cohort.rows.len(), 3);
        assert_eq!(cohort.recorded(), 2);
        assert_eq!(cohort.rows[0].name, "Asha Rao");
        assert_eq!(cohort.rows[0].score, Some(90));
        assert_eq!(cohort.rows[1].strength, Some(Strength::Weak));
        assert_eq!(cohort.rows[2].score, None);
        assert_eq!(
            cohort.distribution,
            StrengthBreakdown { strong: 1, average: 0, weak: 1 }
        );
        assert_eq!(cohort.class_average, Some(70));
        assert_eq!(cohort.class_attendance, Some(70));
    }

    #[test]
    fn subject_view_of_unknown_subject_is_empty() {
        let cohort = SubjectCohort::from_roster("Physics", &roster(), WEAK_THRESHOLD);
        assert_eq!(cohort.recorded(), 0);
        assert_eq!(cohort.class_average, None);
        assert_eq!(cohort.distribution.total(), 0);
    }

    #[test]
    fn proctor_view_averages_per_student_and_subject() {
        let report = ProctorReport::from_roster(&roster(), WEAK_THRESHOLD);
        assert_eq!(report.subjects, vec!["DBMS", "OS"]);

        // (90 + 74) / 2
        assert_eq!(report.students[0].scores, vec![Some(90), Some(74)]);
        assert_eq!(report.students[0].average, Some(82));
        assert_eq!(report.students[0].strength, Some(Strength::Average));
        assert_eq!(report.students[1].scores, vec![Some(50), None]);
        assert_eq!(report.students[2].average, None);

        assert_eq!(
            report.distribution,
            StrengthBreakdown { strong: 0, average: 1, weak: 1 }
        );
        assert_eq!(report.subject_averages[0].average, Some(70));
        assert_eq!(report.subject_averages[1].average, Some(74));
    }
}
