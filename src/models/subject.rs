use serde::{Deserialize, Serialize};

/// Internal assessment marks and attendance for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub subject: String,
    #[serde(default)]
    pub ia1: f64,
    #[serde(default)]
    pub ia2: f64,
    #[serde(default)]
    pub quiz: f64,
    #[serde(default)]
    pub aat: f64,
    /// Out of [`crate::performance::MAX_INTERNAL_MARKS`].
    pub total: f64,
    /// Class average for the subject, already a percentage.
    #[serde(default)]
    pub class_average: f64,
    #[serde(default)]
    pub attended: u32,
    #[serde(default)]
    pub held: u32,
}

/// IA1, IA2, quiz and AAT marks that make up the internal total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub ia1: f64,
    pub ia2: f64,
    pub quiz: f64,
    pub aat: f64,
}

impl Components {
    pub fn labelled(&self) -> [(&'static str, f64); 4] {
        [
            ("IA1", self.ia1),
            ("IA2", self.ia2),
            ("Quiz", self.quiz),
            ("AAT", self.aat),
        ]
    }

    /// True when no component was entered, only a total.
    pub fn is_empty(&self) -> bool {
        self.labelled().iter().all(|(_, v)| *v == 0.0)
    }

    /// `IA1 12  IA2 14  Quiz 8  AAT 9`
    pub fn summary(&self) -> String {
        self.labelled()
            .iter()
            .map(|(label, v)| format!("{} {}", label, v))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl SubjectRecord {
    pub fn new(subject: impl Into<String>, total: f64) -> Self {
        Self {
            subject: subject.into(),
            ia1: 0.0,
            ia2: 0.0,
            quiz: 0.0,
            aat: 0.0,
            total,
            class_average: 0.0,
            attended: 0,
            held: 0,
        }
    }

    pub fn components(&self) -> Components {
        Components {
            ia1: self.ia1,
            ia2: self.ia2,
            quiz: self.quiz,
            aat: self.aat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_read_back_in_order() {
        let record = SubjectRecord {
            ia1: 12.0,
            ia2: 14.5,
            quiz: 8.0,
            aat: 9.0,
            ..SubjectRecord::new("DBMS", 43.5)
        };
        let c = record.components();
        assert!(!c.is_empty());
        assert_eq!(c.summary(), "IA1 12  IA2 14.5  Quiz 8  AAT 9");
        assert!(SubjectRecord::new("OS", 50.0).components().is_empty());
    }
}
