//! Demographic answers collected on the first survey step

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::language::Language;

/// Age bracket offered by the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55-64")]
    From55To64,
    #[serde(rename = "65+")]
    From65,
}

impl AgeRange {
    pub const ALL: [AgeRange; 6] = [
        AgeRange::From18To24,
        AgeRange::From25To34,
        AgeRange::From35To44,
        AgeRange::From45To54,
        AgeRange::From55To64,
        AgeRange::From65,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRange::From18To24 => "18-24",
            AgeRange::From25To34 => "25-34",
            AgeRange::From35To44 => "35-44",
            AgeRange::From45To54 => "45-54",
            AgeRange::From55To64 => "55-64",
            AgeRange::From65 => "65+",
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| ParseError::AgeRange(s.to_string()))
    }
}

/// Gender answer, including the opt-out value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer-not-to-say",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| ParseError::Gender(s.to_string()))
    }
}

/// The three answers of the personal-info step, without any identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub age_range: AgeRange,
    pub gender: Gender,
    pub language: Language,
}

/// Create payload for `POST /personal-info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPersonalInfo {
    pub user_id: String,
    pub age_range: AgeRange,
    pub gender: Gender,
    pub language: Language,
}

impl NewPersonalInfo {
    pub fn new(user_id: impl Into<String>, details: PersonalDetails) -> Self {
        Self {
            user_id: user_id.into(),
            age_range: details.age_range,
            gender: details.gender,
            language: details.language,
        }
    }
}

/// A stored personal-info row, one per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub id: i64,
    pub user_id: String,
    pub age_range: AgeRange,
    pub gender: Gender,
    pub language: Language,
}

impl PersonalInfo {
    pub fn details(&self) -> PersonalDetails {
        PersonalDetails {
            age_range: self.age_range,
            gender: self.gender,
            language: self.language,
        }
    }
}

/// Response of `GET /personal-info/{user_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoStatus {
    pub has_completed_form: bool,
    pub data: Option<PersonalInfo>,
}

impl From<Option<PersonalInfo>> for PersonalInfoStatus {
    fn from(row: Option<PersonalInfo>) -> Self {
        Self {
            has_completed_form: row.is_some(),
            data: row,
        }
    }
}
