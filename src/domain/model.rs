use crate::core::rut;
use crate::utils::error::ConectaError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 智利 RUT：數字本體加上檢查碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rut {
    digits: u32,
    check: char,
}

impl Rut {
    /// 由數字本體建立，檢查碼自動計算
    pub fn new(digits: u32) -> Self {
        Self {
            digits,
            check: rut::compute_check(digits),
        }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn check(&self) -> char {
        self.check
    }

    /// `12345678-5` 形式，沒有千分位
    pub fn compact(&self) -> String {
        format!("{}-{}", self.digits, self.check)
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rut::format(&self.compact()))
    }
}

impl FromStr for Rut {
    type Err = ConectaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, check) = rut::parse(s)
            .ok_or_else(|| ConectaError::validation(format!("malformed RUT: {}", s)))?;

        let rut = Rut::new(digits);
        if rut.check != check {
            return Err(ConectaError::validation(format!(
                "RUT check digit mismatch: {}",
                s
            )));
        }
        Ok(rut)
    }
}

impl TryFrom<&str> for Rut {
    type Error = ConectaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Rut {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 寄給郵件服務商的單一訊息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(from: &str, recipient: &str, subject: &str, html: &str) -> Self {
        Self {
            from: from.to_string(),
            to: vec![recipient.to_string()],
            subject: subject.to_string(),
            html: html.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SendOutcome {
    Success { id: String },
    Failure { error: String },
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientResult {
    pub recipient: String,
    #[serde(flatten)]
    pub outcome: SendOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub sent: usize,
    pub failed: usize,
    pub batches: usize,
    pub results: Vec<RecipientResult>,
    pub completed_at: DateTime<Utc>,
}

impl BatchReport {
    pub fn from_results(results: Vec<RecipientResult>, batches: usize) -> Self {
        let sent = results.iter().filter(|r| r.outcome.is_success()).count();
        let failed = results.len() - sent;

        Self {
            sent,
            failed,
            batches,
            results,
            completed_at: Utc::now(),
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecipientResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}
