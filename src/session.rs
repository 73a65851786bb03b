use crate::error::{CareerError, Result};
use crate::types::catalog::ItemCatalog;
use crate::types::scoring::Responses;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const GRADES: [&str; 8] = ["8", "9", "10", "11", "12", "UG-1", "UG-2", "UG-3"];

/// Wizard section and the pools it asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub pools: &'static [&'static str],
}

pub const SECTIONS: [Section; 12] = [
    Section { name: "Intro", pools: &[] },
    Section { name: "Personality", pools: &["big5"] },
    Section { name: "Interests", pools: &["riasec"] },
    Section { name: "Learning", pools: &["learning"] },
    Section { name: "Academics", pools: &["academic"] },
    Section { name: "Skills", pools: &["skills"] },
    Section { name: "Values & Life", pools: &["values", "extracurricular"] },
    Section { name: "AI, Creativity & Automation", pools: &["ai_future", "creativity"] },
    Section { name: "Entrepreneurship", pools: &["entrepreneurship"] },
    Section { name: "Resilience, Ethics & Global", pools: &["resilience", "ethics_global"] },
    Section { name: "Results", pools: &[] },
    Section { name: "Dashboard", pools: &[] },
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub contact: String,
}

/// Progress of one student through the assessment.
///
/// Owned by the caller and handed to scoring by reference; nothing in the
/// crate keeps a global copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub student: StudentProfile,
    #[serde(default)]
    pub responses: Responses,
    #[serde(default)]
    pub completed: BTreeSet<String>,
    #[serde(default)]
    pub current_idx: usize,
    #[serde(default)]
    pub points: u32,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CareerError::SessionNotFound(path.display().to_string()));
        }
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "starting new session");
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut session: Session = serde_json::from_str(content)?;
        for (item, value) in &session.responses {
            check_likert(item, i64::from(*value))?;
        }
        session.current_idx = session.current_idx.min(SECTIONS.len() - 1);
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn section(&self) -> &'static Section {
        &SECTIONS[self.current_idx.min(SECTIONS.len() - 1)]
    }

    /// Stores one Likert answer. Item ids are only checked against a
    /// non-empty catalog, so a fallback catalog never blocks data entry.
    pub fn record_response(&mut self, catalog: &ItemCatalog, item: &str, value: i64) -> Result<()> {
        check_likert(item, value)?;
        if !catalog.is_empty() && !catalog.contains_item(item) {
            return Err(CareerError::UnknownItem(item.to_string()));
        }
        self.responses.insert(item.to_string(), value as u8);
        Ok(())
    }

    pub fn set_student(&mut self, student: StudentProfile) -> Result<()> {
        if !GRADES.contains(&student.grade.as_str()) {
            return Err(CareerError::InvalidGrade(student.grade));
        }
        self.student = student;
        Ok(())
    }

    /// Marks the current section complete, awards points for answered items,
    /// and moves to the next section. Returns false on the final sections,
    /// which have nothing to continue to.
    pub fn advance(&mut self) -> bool {
        let section = self.section();
        if matches!(section.name, "Results" | "Dashboard") {
            return false;
        }
        let answered = self.responses.len() as u32;
        self.points += (answered / 10).max(1);
        self.completed.insert(section.name.to_string());
        self.current_idx = (self.current_idx + 1).min(SECTIONS.len() - 1);
        true
    }
}

/// Splits an `item=value` answer argument.
pub fn parse_answer(raw: &str) -> Result<(String, i64)> {
    let (item, value) = raw
        .split_once('=')
        .ok_or_else(|| CareerError::InvalidAnswer(raw.to_string()))?;
    let item = item.trim();
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| CareerError::InvalidAnswer(raw.to_string()))?;
    if item.is_empty() {
        return Err(CareerError::InvalidAnswer(raw.to_string()));
    }
    Ok((item.to_string(), value))
}

fn check_likert(item: &str, value: i64) -> Result<()> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(CareerError::InvalidResponse {
            item: item.to_string(),
            value,
        })
    }
}
