//! Parser for the body of an `update order` command.
//!
//! The body is a comma separated list of entries in two forms:
//!
//! ```text
//! 9:12                    simple:   item number, quantity
//! 10: 1x3, 3x2, 2x1       compound: item number, option x quantity pairs
//! ```
//!
//! A compound entry owns the commas between its pairs, so the list cannot be split
//! on commas up front. The tokenizer below reads one entry at a time and lets the
//! compound form consume pairs for as long as the next segment is another pair.

use std::num::ParseIntError;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_till1},
    character::complete::{char, digit1, multispace0, multispace1, one_of},
    combinator::{eof, map, opt, peek, recognize},
    multi::separated_list1,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

use crate::domain::order::MenuIndication;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed item: \"{0}\"")]
    MalformedItem(String),
    #[error("invalid item number in \"{entry}\": {source}")]
    InvalidItemNumber {
        entry: String,
        #[source]
        source: ParseIntError,
    },
    #[error("missing amount in \"{0}\"")]
    MissingAmount(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryForm {
    Compound,
    Simple,
}

#[derive(Debug)]
struct RawEntry<'a> {
    text: &'a str,
    item: &'a str,
    amount: &'a str,
    form: EntryForm,
}

/// Parses an update-order body into indications.
///
/// Compound entries come first in the order they were found, followed by simple
/// entries in the order they were found. Callers must not rely on any other
/// ordering. A leading `update order` keyword (with or without a colon) is accepted
/// and ignored.
pub fn parse_update_order(text: &str) -> Result<Vec<MenuIndication>, ParseError> {
    let mut rest = strip_command_keyword(text);
    let mut compound = Vec::new();
    let mut simple = Vec::new();

    loop {
        rest = rest.trim_start_matches(|ch: char| ch == ',' || ch.is_whitespace());
        if rest.is_empty() {
            break;
        }

        let (next, raw) = match entry(rest) {
            Ok(parsed) => parsed,
            Err(_) => {
                let fragment = rest.split(',').next().unwrap_or(rest).trim();
                return Err(reject(fragment));
            }
        };

        let indication = raw.to_indication()?;
        match raw.form {
            EntryForm::Compound => compound.push(indication),
            EntryForm::Simple => simple.push(indication),
        }
        rest = next;
    }

    compound.extend(simple);
    Ok(compound)
}

/// Renders indications back into command text that [`parse_update_order`] accepts.
pub fn render_update_order(indications: &[MenuIndication]) -> String {
    let entries = indications
        .iter()
        .map(|indication| format!("{}: {}", indication.item_menu_number, indication.amount.trim()))
        .collect::<Vec<_>>();
    format!("update order {}", entries.join(", "))
}

impl RawEntry<'_> {
    fn to_indication(&self) -> Result<MenuIndication, ParseError> {
        let entry = self.text.trim().trim_end_matches(',').trim_end();
        let item_menu_number = self
            .item
            .trim()
            .parse::<u32>()
            .map_err(|source| ParseError::InvalidItemNumber { entry: entry.to_string(), source })?;

        let amount = self.amount.trim().trim_end_matches(',').trim_end();
        if amount.is_empty() {
            return Err(ParseError::MissingAmount(entry.to_string()));
        }

        Ok(MenuIndication::new(item_menu_number, amount))
    }
}

fn strip_command_keyword(text: &str) -> &str {
    let keyword = tuple((
        multispace0::<&str, nom::error::Error<&str>>,
        tag_no_case("update"),
        multispace1,
        tag_no_case("order"),
        opt(char(':')),
    ));
    match recognize(keyword)(text) {
        Ok((rest, _)) => rest,
        Err(_) => text,
    }
}

fn reject(fragment: &str) -> ParseError {
    if let Some((item, _)) = fragment.split_once(':') {
        if let Err(source) = item.trim().parse::<u32>() {
            return ParseError::InvalidItemNumber { entry: fragment.to_string(), source };
        }
    }
    ParseError::MalformedItem(fragment.to_string())
}

fn entry(input: &str) -> IResult<&str, RawEntry<'_>> {
    let (rest, item) = take_till1(|ch: char| ch == ':' || ch == ',')(input)?;
    let (rest, _) = char(':')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, (form, amount)) = alt((
        map(compound_amount, |amount| (EntryForm::Compound, amount)),
        map(simple_amount, |amount| (EntryForm::Simple, amount)),
    ))(rest)?;

    let text = &input[..input.len() - rest.len()];
    Ok((rest, RawEntry { text, item, amount, form }))
}

fn option_pair(input: &str) -> IResult<&str, &str> {
    recognize(tuple((digit1, one_of("xX"), digit1)))(input)
}

fn pair_separator(input: &str) -> IResult<&str, char> {
    preceded(multispace0, terminated(char(','), multispace0))(input)
}

fn entry_end(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((eof, tag(","))))(input)
}

fn compound_amount(input: &str) -> IResult<&str, &str> {
    terminated(recognize(separated_list1(pair_separator, option_pair)), peek(entry_end))(input)
}

fn simple_amount(input: &str) -> IResult<&str, &str> {
    take_till(|ch: char| ch == ',')(input)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{parse_update_order, render_update_order, ParseError};
    use crate::domain::order::MenuIndication;

    #[test]
    fn parses_single_removal() {
        let parsed = parse_update_order("update order 6:0").expect("parse");
        assert_eq!(parsed, vec![MenuIndication::new(6, "0")]);
    }

    #[test]
    fn compound_entries_sort_before_simple_entries() {
        let parsed = parse_update_order("update order 9:12, 10: 1x3, 3x2, 2x1, 6:5").expect("parse");
        assert_eq!(
            parsed,
            vec![
                MenuIndication::new(10, "1x3, 3x2, 2x1"),
                MenuIndication::new(9, "12"),
                MenuIndication::new(6, "5"),
            ]
        );
    }

    #[test]
    fn accepts_body_without_keyword_and_loose_spacing() {
        let parsed = parse_update_order(" 9 : 12 ,, 4:  7 ,").expect("parse");
        assert_eq!(parsed, vec![MenuIndication::new(9, "12"), MenuIndication::new(4, "7")]);
    }

    #[test]
    fn keyword_with_colon_is_stripped() {
        let parsed = parse_update_order("Update Order: 1:5").expect("parse");
        assert_eq!(parsed, vec![MenuIndication::new(1, "5")]);
    }

    #[test]
    fn interleaved_compound_entries_keep_their_scan_order() {
        let parsed =
            parse_update_order("7: 2x1, 8:3, 10:1x3,3x2, 9: 4").expect("parse interleaved");
        assert_eq!(
            parsed,
            vec![
                MenuIndication::new(7, "2x1"),
                MenuIndication::new(10, "1x3,3x2"),
                MenuIndication::new(8, "3"),
                MenuIndication::new(9, "4"),
            ]
        );
    }

    #[test]
    fn empty_body_yields_no_indications() {
        assert_eq!(parse_update_order("update order"), Ok(Vec::new()));
        assert_eq!(parse_update_order(" , ,"), Ok(Vec::new()));
    }

    #[test]
    fn entry_without_colon_is_malformed() {
        let error = parse_update_order("update order 9:12, 6 5").expect_err("must fail");
        assert_eq!(error, ParseError::MalformedItem("6 5".to_string()));
        assert_eq!(error.to_string(), "malformed item: \"6 5\"");
    }

    #[test]
    fn non_numeric_item_number_is_rejected_with_source() {
        let error = parse_update_order("update order abc:12").expect_err("must fail");
        assert!(matches!(
            error,
            ParseError::InvalidItemNumber { ref entry, .. } if entry == "abc:12"
        ));
        assert!(std::error::Error::source(&error).is_some());

        let error = parse_update_order(":12").expect_err("empty item number must fail");
        assert!(matches!(error, ParseError::InvalidItemNumber { .. }));
    }

    #[test]
    fn empty_amount_is_rejected() {
        let error = parse_update_order("update order 9:, 4:2").expect_err("must fail");
        assert_eq!(error, ParseError::MissingAmount("9:".to_string()));
    }

    #[test]
    fn compound_pair_followed_by_text_falls_back_to_simple_amount() {
        let parsed = parse_update_order("3: 1x2 please").expect("parse");
        assert_eq!(parsed, vec![MenuIndication::new(3, "1x2 please")]);
    }

    fn indications(entries: &[(u32, &str)]) -> Vec<MenuIndication> {
        entries.iter().map(|(item, amount)| MenuIndication::new(*item, *amount)).collect()
    }

    #[test]
    fn rendered_commands_parse_back_to_the_same_indications() {
        // (rendered indications, parse order: compound entries first, then simple ones)
        let cases: Vec<(Vec<(u32, &str)>, Vec<(u32, &str)>)> = vec![
            (vec![(9, "12")], vec![(9, "12")]),
            (vec![(9, "12"), (6, "5"), (1, "10")], vec![(9, "12"), (6, "5"), (1, "10")]),
            (
                vec![(10, "1x3, 3x2, 2x1"), (7, "2x1"), (4, "1X4")],
                vec![(10, "1x3, 3x2, 2x1"), (7, "2x1"), (4, "1X4")],
            ),
            (
                vec![(9, "12"), (10, "1x3, 3x2"), (6, "5"), (7, "2X1, 1x2")],
                vec![(10, "1x3, 3x2"), (7, "2X1, 1x2"), (9, "12"), (6, "5")],
            ),
            (
                vec![(6, "0"), (7, "1x0, 3x0"), (9, "00"), (2, "3x1")],
                vec![(7, "1x0, 3x0"), (2, "3x1"), (6, "0"), (9, "00")],
            ),
        ];

        for (rendered, expected) in &cases {
            let rendered = indications(rendered);
            let command = render_update_order(&rendered);
            let parsed = parse_update_order(&command)
                .unwrap_or_else(|error| panic!("`{command}` failed to parse: {error}"));

            assert_eq!(parsed, indications(expected), "order of `{command}`");
            assert_eq!(
                parsed.into_iter().collect::<BTreeSet<_>>(),
                rendered.into_iter().collect::<BTreeSet<_>>(),
                "contents of `{command}`"
            );
        }
    }
}
