use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    GeneralPractice,
    Pediatrics,
    Gynecology,
    Cardiology,
    Orthopedics,
    Dermatology,
    Ophthalmology,
    Otolaryngology,
    Neurology,
    Psychiatry,
    Urology,
    Endocrinology,
    Gastroenterology,
    Pulmonology,
    Rheumatology,
}

impl Specialty {
    pub fn description(&self) -> &'static str {
        match self {
            Specialty::GeneralPractice => "General Practice",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Gynecology => "Gynecology",
            Specialty::Cardiology => "Cardiology",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Dermatology => "Dermatology",
            Specialty::Ophthalmology => "Ophthalmology",
            Specialty::Otolaryngology => "Otolaryngology",
            Specialty::Neurology => "Neurology",
            Specialty::Psychiatry => "Psychiatry",
            Specialty::Urology => "Urology",
            Specialty::Endocrinology => "Endocrinology",
            Specialty::Gastroenterology => "Gastroenterology",
            Specialty::Pulmonology => "Pulmonology",
            Specialty::Rheumatology => "Rheumatology",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
