use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Profile fields a customer can change with `update <field>: <value>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Email,
    Nickname,
    Social,
    Consent,
}

impl ProfileField {
    pub const ALL: [Self; 4] = [Self::Email, Self::Nickname, Self::Social, Self::Consent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Nickname => "nickname",
            Self::Social => "social",
            Self::Consent => "consent",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|field| field.as_str() == value.trim()).ok_or_else(|| {
            DomainError::InvariantViolation(format!("unknown profile field `{value}`"))
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub cell_number: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub social: Option<String>,
    pub consent: Option<String>,
}

impl UserInfo {
    pub fn new(cell_number: impl Into<String>) -> Self {
        Self { cell_number: cell_number.into(), ..Self::default() }
    }

    pub fn field(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Email => self.email.as_deref(),
            ProfileField::Nickname => self.nickname.as_deref(),
            ProfileField::Social => self.social.as_deref(),
            ProfileField::Consent => self.consent.as_deref(),
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            ProfileField::Email => self.email = value,
            ProfileField::Nickname => self.nickname = value,
            ProfileField::Social => self.social = value,
            ProfileField::Consent => self.consent = value,
        }
    }
}
