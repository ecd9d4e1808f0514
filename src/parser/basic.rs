//! Heuristic ingredient parser
//!
//! Handles the common "quantity unit name, preparation" shape of recipe lines.
//! It stands in for a full NLP parser and never fails loudly: anything it
//! cannot read simply has no amount.

use super::quantity::{is_fraction_token, parse_number};
use super::IngredientParser;
use crate::models::{Amount, ParsedIngredient};
use crate::nutrition::{lookup_unit, normalize_unit};

/// Kitchen units a recipe may use that have no registry conversion
const DESCRIPTIVE_UNITS: &[&str] = &[
    "bunch", "bunches", "sprig", "sprigs", "package", "packages", "pkg", "jar", "jars",
    "bag", "bags", "head", "heads", "handful", "handfuls", "bottle", "bottles", "box",
    "boxes", "container", "containers", "envelope", "envelopes", "packet", "packets",
];

/// Default [`IngredientParser`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicIngredientParser;

impl BasicIngredientParser {
    pub fn new() -> Self {
        Self
    }
}

fn is_unit(candidate: &str) -> bool {
    lookup_unit(candidate).is_some() || DESCRIPTIVE_UNITS.contains(&normalize_unit(candidate).as_str())
}

/// Split "200g" into ("200", "g") when the suffix is a unit
fn split_glued(token: &str) -> Option<(&str, &str)> {
    let idx = token.find(|c: char| c.is_alphabetic())?;
    if idx == 0 {
        return None;
    }
    let (num, unit) = token.split_at(idx);
    (parse_number(num).is_some() && is_unit(unit)).then_some((num, unit))
}

impl IngredientParser for BasicIngredientParser {
    fn parse(&self, sentence: &str) -> Option<ParsedIngredient> {
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut tokens: Vec<&str> = Vec::new();
        for raw in trimmed.split_whitespace() {
            match split_glued(raw) {
                Some((num, unit)) => {
                    tokens.push(num);
                    tokens.push(unit);
                }
                None => tokens.push(raw),
            }
        }

        let mut pos = 0;

        // Quantity: a number, optionally followed by a fraction ("1 1/2")
        let mut quantity = None;
        if let Some(first) = tokens.first().and_then(|t| parse_number(t)) {
            let mut total = first;
            pos = 1;
            if let Some(next) = tokens.get(1) {
                if is_fraction_token(next) {
                    if let Some(frac) = parse_number(next) {
                        total += frac;
                        pos = 2;
                    }
                }
            }
            quantity = Some(total);
        } else if matches!(tokens.first().map(|t| t.to_lowercase()).as_deref(), Some("a" | "an"))
            && tokens.get(1).is_some_and(|t| is_unit(t))
        {
            quantity = Some(1.0);
            pos = 1;
        }

        // Parenthetical size notes like "(15 oz)"
        if tokens.get(pos).is_some_and(|t| t.starts_with('(')) {
            while pos < tokens.len() {
                let closes = tokens[pos].ends_with(')');
                pos += 1;
                if closes {
                    break;
                }
            }
        }

        // Unit: two-word forms first ("fl oz"), then single words
        let mut unit = None;
        if quantity.is_some() {
            if pos + 1 < tokens.len() {
                let pair = format!("{} {}", tokens[pos], tokens[pos + 1]);
                if lookup_unit(&pair).is_some() {
                    unit = Some(normalize_unit(&pair));
                    pos += 2;
                }
            }
            if unit.is_none() && pos < tokens.len() && is_unit(tokens[pos]) {
                unit = Some(normalize_unit(tokens[pos]));
                pos += 1;
            }
        }

        if tokens.get(pos).is_some_and(|t| t.eq_ignore_ascii_case("of")) {
            pos += 1;
        }

        let rest = tokens.get(pos..).unwrap_or_default().join(" ");
        let name = rest
            .split(',')
            .next()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let amount = match (quantity, unit) {
            (Some(q), Some(u)) => Some(Amount::new(q, u)),
            _ => None,
        };

        Some(ParsedIngredient {
            sentence: sentence.to_string(),
            name,
            amount,
        })
    }
}
