// request.rs - Generation request body
//
// Wire shape: { gender, occasion, birthday, style, image } with the
// image as standard base64 PNG.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    #[default]
    Casual,
    Work,
    Party,
    Date,
}

impl Occasion {
    pub const ALL: [Occasion; 4] = [Occasion::Casual, Occasion::Work, Occasion::Party, Occasion::Date];

    pub fn as_str(self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::Work => "work",
            Occasion::Party => "party",
            Occasion::Date => "date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Occasion::Casual => "Everyday casual",
            Occasion::Work => "Workwear",
            Occasion::Party => "Party",
            Occasion::Date => "Date night",
        }
    }
}

impl FromStr for Occasion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Occasion::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown occasion {:?}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unspecified,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "unspecified" | "" => Ok(Gender::Unspecified),
            _ => Err(format!("unknown gender {:?}", s)),
        }
    }
}

/// Calendar date as entered in a `<input type="date">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl FromStr for Birthday {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GenerateError::NoBirthday);
        }
        let invalid = || GenerateError::InvalidBirthday(s.to_string());

        let mut parts = s.split('-');
        let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(invalid());
        }
        let year: u16 = y.parse().map_err(|_| invalid())?;
        let month: u8 = m.parse().map_err(|_| invalid())?;
        let day: u8 = d.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(invalid());
        }
        Ok(Birthday { year, month, day })
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitRequest {
    pub gender: Gender,
    pub occasion: Occasion,
    pub birthday: String,
    pub style: String,
    pub image: String,
}

impl OutfitRequest {
    pub fn new(gender: Gender, occasion: Occasion, birthday: Birthday, style: &str, png: &[u8]) -> Self {
        Self {
            gender,
            occasion,
            birthday: birthday.to_string(),
            style: style.to_string(),
            image: STANDARD.encode(png),
        }
    }

    pub fn to_json(&self) -> Result<String, GenerateError> {
        Ok(serde_json::to_string(self)?)
    }
}
