use std::sync::LazyLock;

use regex::Regex;

use crate::error::RebarError;
use crate::model::{ElementCode, RodSize};
use crate::profile::builtin::default_profile;
use crate::profile::schema::PatternProfile;

static BUILTIN: LazyLock<LinePatternSet> = LazyLock::new(|| {
    let profile = default_profile().expect("valid builtin profile");
    LinePatternSet::from_profile(&profile).expect("valid builtin line patterns")
});

/// Diameter marks seen in front of rod sizes ("Ø12", "∅12", "⌀12").
const DIAMETER_SIGN: &str = "[Ø∅⌀]";
/// Latin and Cyrillic multiplication letters used between diameter and length.
const TIMES_SIGN: &str = "[xх]";

/// One recognizer in the ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    SectionMarker,
    ElementHeader,
    /// Drops every line until the first element header has been seen.
    Guard,
    EmbeddedQuantity,
    EmbeddedHeader,
    RodLine,
}

/// Recognizers in priority order.
///
/// The order matters: a section marker also contains an element code, and an
/// embedded-item quantity line also satisfies the embedded-item header.
pub const RULES: [Rule; 6] = [
    Rule::SectionMarker,
    Rule::ElementHeader,
    Rule::Guard,
    Rule::EmbeddedQuantity,
    Rule::EmbeddedHeader,
    Rule::RodLine,
];

/// What a single line of text turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    SectionMarker(ElementCode),
    ElementHeader { category: String, code: ElementCode },
    EmbeddedQuantity { item: String, quantity: u64 },
    EmbeddedHeader { item: String },
    RodLine {
        name: String,
        size: RodSize,
        quantity: u64,
    },
    /// The line has a recognized shape but its numbers could not be used.
    Unparseable { reason: String },
    Unrecognized,
}

/// Compiled line-shape recognizers for one vocabulary.
///
/// Text extraction loses all table structure, so every line is classified
/// from the tokens it contains. The recognizers are tried in `RULES` order;
/// the first one that matches decides what the line is.
#[derive(Debug, Clone)]
pub struct LinePatternSet {
    object_pair: Regex,
    section_marker: Regex,
    element_header: Regex,
    embedded_quantity: Regex,
    embedded_header: Regex,
    rod_line: Regex,
    rod_size: Regex,
}

impl LinePatternSet {
    /// Compile the recognizers for a profile.
    pub fn from_profile(profile: &PatternProfile) -> Result<Self, RebarError> {
        let code = format!(r"(?:{})-\d+", alternation(&profile.element_prefixes));
        let item = format!(r"{}-\d+", regex::escape(&profile.embedded_item_prefix));
        let embedded = phrase(&profile.embedded_item_label);

        let rod_name = format!(
            r"(?:{standard}\s*\d+[-–]\d+\s*)?{keyword}\s+.*?{DIAMETER_SIGN}?\s*\d+\s*{TIMES_SIGN}\s*\d+(?:-\s*[AА]\d{{3}}С?)?",
            standard = phrase(&profile.standard_prefix),
            keyword = phrase(&profile.rod_keyword),
        );

        Ok(LinePatternSet {
            object_pair: Regex::new(&format!(r"({code})\s+(\d+)"))?,
            section_marker: Regex::new(&format!(
                r"(?i){}\s+({code})",
                phrase(&profile.section_marker)
            ))?,
            element_header: Regex::new(&format!(
                r"(?i)({})\s+({code})",
                alternation(&profile.element_categories)
            ))?,
            embedded_quantity: Regex::new(&format!(r"(?i){embedded}\s+({item})\s+(\d+)"))?,
            embedded_header: Regex::new(&format!(r"(?i){embedded}\s+({item})"))?,
            rod_line: Regex::new(&format!(r"(?i)(?P<name>{rod_name})\s+(?P<qty>\d+)"))?,
            rod_size: Regex::new(&format!(
                r"(?i){DIAMETER_SIGN}?\s*(?P<diameter>\d+)\s*{TIMES_SIGN}\s*(?P<length>\d+)"
            ))?,
        })
    }

    /// The recognizers of the builtin profile, compiled once per process.
    pub fn builtin() -> &'static LinePatternSet {
        &BUILTIN
    }

    /// Classify one line by trying every rule in priority order.
    ///
    /// `has_element` tells the guard whether an element header has already
    /// been seen in the document.
    pub fn classify(&self, line: &str, has_element: bool) -> LineKind {
        for rule in RULES {
            if rule == Rule::Guard {
                if !has_element {
                    return LineKind::Unrecognized;
                }
                continue;
            }
            if let Some(kind) = self.apply(rule, line) {
                return kind;
            }
        }
        LineKind::Unrecognized
    }

    /// Try a single rule against a line.
    pub fn apply(&self, rule: Rule, line: &str) -> Option<LineKind> {
        match rule {
            Rule::SectionMarker => {
                let caps = self.section_marker.captures(line)?;
                Some(LineKind::SectionMarker(ElementCode::new(&caps[1])))
            }
            Rule::ElementHeader => {
                let caps = self.element_header.captures(line)?;
                Some(LineKind::ElementHeader {
                    category: caps[1].to_string(),
                    code: ElementCode::new(&caps[2]),
                })
            }
            Rule::Guard => None,
            Rule::EmbeddedQuantity => {
                let caps = self.embedded_quantity.captures(line)?;
                let item = caps[1].to_string();
                Some(match caps[2].parse::<u64>() {
                    Ok(quantity) => LineKind::EmbeddedQuantity { item, quantity },
                    Err(_) => LineKind::Unparseable {
                        reason: format!(
                            "embedded item {item} quantity '{}' is not a number",
                            &caps[2]
                        ),
                    },
                })
            }
            Rule::EmbeddedHeader => {
                let caps = self.embedded_header.captures(line)?;
                Some(LineKind::EmbeddedHeader {
                    item: caps[1].to_string(),
                })
            }
            Rule::RodLine => {
                let caps = self.rod_line.captures(line)?;
                let name = caps["name"].trim().to_string();
                let quantity = match caps["qty"].parse::<u64>() {
                    Ok(q) => q,
                    Err(_) => {
                        return Some(LineKind::Unparseable {
                            reason: format!("rod quantity '{}' is not a number", &caps["qty"]),
                        })
                    }
                };
                Some(match self.parse_rod_size(&name) {
                    Some(size) => LineKind::RodLine {
                        name,
                        size,
                        quantity,
                    },
                    None => LineKind::Unparseable {
                        reason: format!("no diameter x length in rod name '{name}'"),
                    },
                })
            }
        }
    }

    /// Find the first diameter x length token in a rod name.
    pub fn parse_rod_size(&self, name: &str) -> Option<RodSize> {
        let caps = self.rod_size.captures(name)?;
        Some(RodSize {
            diameter_mm: caps["diameter"].parse().ok()?,
            length_mm: caps["length"].parse().ok()?,
        })
    }

    /// All `(element code, count)` pairs in a block of text, in order.
    ///
    /// Pairs whose count does not fit a `u64` are left out.
    pub fn object_pairs<'t>(
        &'t self,
        text: &'t str,
    ) -> impl Iterator<Item = (ElementCode, u64)> + 't {
        self.object_pair.captures_iter(text).filter_map(|caps| {
            let count = caps[2].parse::<u64>().ok()?;
            Some((ElementCode::new(&caps[1]), count))
        })
    }
}

/// Escape a phrase so that any whitespace run in the text matches its spaces.
fn phrase(p: &str) -> String {
    p.split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

fn alternation(items: &[String]) -> String {
    items
        .iter()
        .map(|s| phrase(s))
        .collect::<Vec<_>>()
        .join("|")
}
