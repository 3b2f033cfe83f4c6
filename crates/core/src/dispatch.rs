//! Turns a free-form chat message into the commands it contains.
//!
//! A message may carry several commands. They are collected family by family
//! (queries, then profile field updates, then order updates) and left to right
//! within each family.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::order::MenuIndication;
use crate::domain::user::ProfileField;
use crate::ordering::{parse_update_order, ParseError};

static QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"menu\?|fr\.prlist\?|userinfo\?|currentorder\?|checkoutnow\?")
        .expect("query pattern is a valid regex")
});

static FIELD_UPDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"update (email|nickname|social|consent):\s*(\S+)")
        .expect("field update pattern is a valid regex")
});

static ORDER_UPDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"update order:?[ \t]*(.*)").expect("order update pattern is a valid regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfoQuery {
    Menu,
    PriceList,
    UserInfo,
    CurrentOrder,
    Checkout,
}

impl InfoQuery {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Menu => "menu?",
            Self::PriceList => "fr.prlist?",
            Self::UserInfo => "userinfo?",
            Self::CurrentOrder => "currentorder?",
            Self::Checkout => "checkoutnow?",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        [Self::Menu, Self::PriceList, Self::UserInfo, Self::CurrentOrder, Self::Checkout]
            .into_iter()
            .find(|query| query.keyword() == keyword)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Query(InfoQuery),
    UpdateField {
        field: ProfileField,
        value: String,
    },
    /// `indications` holds the parse outcome of `body`; a failed parse is still a
    /// command so the customer can be told what went wrong.
    UpdateOrder {
        body: String,
        indications: Result<Vec<MenuIndication>, ParseError>,
    },
}

impl Command {
    /// Short label used in logs and command outcomes.
    pub fn label(&self) -> String {
        match self {
            Self::Query(query) => query.keyword().to_owned(),
            Self::UpdateField { field, .. } => format!("update {field}"),
            Self::UpdateOrder { .. } => "update order".to_owned(),
        }
    }
}

pub fn dispatch(message: &str) -> Vec<Command> {
    let message = message.to_lowercase();
    let mut commands = Vec::new();

    commands.extend(
        QUERY_RE
            .find_iter(&message)
            .filter_map(|found| InfoQuery::from_keyword(found.as_str()))
            .map(Command::Query),
    );

    for captures in FIELD_UPDATE_RE.captures_iter(&message) {
        let (_, [field, value]) = captures.extract();
        if let Ok(field) = field.parse::<ProfileField>() {
            commands.push(Command::UpdateField { field, value: value.to_owned() });
        }
    }

    for captures in ORDER_UPDATE_RE.captures_iter(&message) {
        let (_, [body]) = captures.extract();
        let body = body.trim().to_owned();
        let indications = parse_update_order(&body);
        commands.push(Command::UpdateOrder { body, indications });
    }

    commands
}
