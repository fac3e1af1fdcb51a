// File: ./src/model/parser.rs
//! Turns pasted item text into parsed stats.
//!
//! Three steps run per paste: the header/body split ([`extract_lines`]), markup
//! removal ([`clean_line`]) and the numeric rule cascade ([`parse_stat`]).
use crate::error::{ApplyError, Result};
use crate::model::item::{PLACEHOLDER, ParsedStat};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

pub const ITEM_CLASS_LABEL: &str = "Item Class:";

// Irregular plurals that naive "strip one s" gets wrong.
const IRREGULAR_CLASSES: &[(&str, &str)] = &[("Quarterstaves", "Quarterstaff")];

/// `[Internal|Displayed]` keeps only the displayed alternative.
static ALTERNATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]|]+\|([^\]]+)\]").expect("Failed to compile alternation regex")
});

static BRACKET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[\]]").expect("Failed to compile bracket regex"));

// Digit classes are ASCII only. Other scripts' digits are left as text.

/// "10 to 16"
static RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\s+to\s+[0-9]+").expect("Failed to compile range regex"));

static DIGITS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("Failed to compile digits regex"));

/// "+12", "34%", "-5"
static LEADING_NUMBER_TEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+%?").expect("Failed to compile leading number regex"));

/// Sign is captured so the template keeps it; the number and its percent go.
static LEADING_NUMBER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>[+-]?)[0-9]+(?:\.[0-9]+)?%?")
        .expect("Failed to compile leading token regex")
});

static LEADING_NUMBER_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]*\.?[0-9]+").expect("Failed to compile leading value regex")
});

static SIGNED_DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+-]?[0-9]+(?:\.[0-9]+)?").expect("Failed to compile signed decimal regex")
});

static SIGNED_INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+-]?[0-9]+").expect("Failed to compile signed integer regex"));

/// Header and candidate body lines of one paste.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLines<'a> {
    pub item_class: Option<String>,
    pub lines: Vec<&'a str>,
}

/// Splits a paste into its item class and the lines worth parsing.
///
/// The first line is always treated as the header. Lines containing `:` are
/// label/value metadata and are dropped.
pub fn extract_lines(text: &str) -> Result<ExtractedLines<'_>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApplyError::EmptyInput);
    }

    let mut lines = text.lines();
    let item_class = lines.next().and_then(parse_item_class);
    let lines: Vec<&str> = lines.filter(|line| !line.contains(':')).collect();

    if lines.is_empty() {
        return Err(ApplyError::NoValidStats);
    }
    Ok(ExtractedLines { item_class, lines })
}

/// Reads `Item Class: Daggers` as `Dagger`. Other headers yield nothing.
pub fn parse_item_class(header: &str) -> Option<String> {
    let class = header.strip_prefix(ITEM_CLASS_LABEL)?.trim();
    if class.is_empty() {
        return None;
    }
    Some(singularize_class(class))
}

pub fn singularize_class(class: &str) -> String {
    if let Some((_, singular)) = IRREGULAR_CLASSES.iter().find(|(plural, _)| *plural == class) {
        return singular.to_string();
    }
    class.strip_suffix('s').unwrap_or(class).to_string()
}

/// Strips bracket markup: `[Ailment|Ailments]` -> `Ailments`, `[Fire]` -> `Fire`.
pub fn clean_line(line: &str) -> String {
    let picked = ALTERNATION_PATTERN.replace_all(line, "$1");
    BRACKET_PATTERN.replace_all(&picked, "").into_owned()
}

/// The cascade of numeric patterns, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatRule {
    /// `Adds 10 to 16 Physical Damage`
    Range,
    /// `34% increased Projectile Speed`, `+12 to Dexterity`
    LeadingNumber,
    /// `Gain 3 Mana per Enemy Killed`
    EmbeddedNumber,
    /// `Corrupted`
    NoNumber,
}

impl StatRule {
    pub const ORDER: [StatRule; 4] = [
        StatRule::Range,
        StatRule::LeadingNumber,
        StatRule::EmbeddedNumber,
        StatRule::NoNumber,
    ];

    pub fn matches(self, line: &str) -> bool {
        match self {
            StatRule::Range => RANGE_PATTERN.is_match(line),
            StatRule::LeadingNumber => LEADING_NUMBER_TEST.is_match(line),
            StatRule::EmbeddedNumber => DIGITS_PATTERN.is_match(line),
            StatRule::NoNumber => true,
        }
    }

    /// Builds the stat. Only meaningful when [`StatRule::matches`] holds.
    pub fn apply(self, line: &str) -> ParsedStat {
        match self {
            StatRule::Range => {
                let range_template = format!("{PLACEHOLDER} to {PLACEHOLDER}");
                let template = RANGE_PATTERN.replace_all(line, NoExpand(range_template.as_str()));
                ParsedStat::new(template.trim(), first_number(&DIGITS_PATTERN, line))
            }
            StatRule::LeadingNumber => {
                let template = LEADING_NUMBER_TOKEN
                    .replace(line, format!("${{sign}}{PLACEHOLDER}").as_str());
                ParsedStat::new(template.trim(), first_number(&LEADING_NUMBER_VALUE, line))
            }
            StatRule::EmbeddedNumber => {
                let template = SIGNED_DECIMAL_PATTERN.replace_all(line, NoExpand(PLACEHOLDER));
                ParsedStat::new(template.trim(), first_number(&SIGNED_INTEGER_PATTERN, line))
            }
            StatRule::NoNumber => ParsedStat::new(line.trim(), None),
        }
    }
}

/// First match of `pattern` as a finite number.
///
/// The patterns only match plain decimal text, so the one way to fail is a
/// value too large for `f64`; that degrades to `None`.
fn first_number(pattern: &Regex, line: &str) -> Option<f64> {
    let found = pattern.find(line)?.as_str();
    let value = found.parse::<f64>().ok().filter(|v| v.is_finite());
    if value.is_none() {
        log::warn!("Number '{}' in '{}' is out of range, ignoring it", found, line);
    }
    value
}

/// Picks the first rule matching the line.
pub fn select_rule(line: &str) -> StatRule {
    StatRule::ORDER
        .into_iter()
        .find(|rule| rule.matches(line))
        .unwrap_or(StatRule::NoNumber)
}

/// Reduces one cleaned line to a template and magnitude.
pub fn parse_stat(line: &str) -> ParsedStat {
    let line = line.trim();
    select_rule(line).apply(line)
}

/// Cleans and parses every candidate line, in order.
pub fn parse_stats<'a, I>(lines: I) -> Vec<ParsedStat>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| parse_stat(&clean_line(line)))
        .collect()
}
