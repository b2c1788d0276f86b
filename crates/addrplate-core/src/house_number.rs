//! House-number decomposition.
//!
//! A raw house number is classified by an ordered list of anchored patterns; the first pattern
//! that matches decides the shape. Each shape carries exactly the levels it has, so a fraction
//! number always has a denominator and a lettered number never does.

use crate::{Error, Result};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Named slot of a decomposed house number, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Primary numeral, optionally a hyphenated range (`lvl1`).
    Primary,
    /// The literal fraction separator (`lvl2_slash`).
    Slash,
    /// Letter suffix or ` к<n>` block suffix (`lvl2c`).
    Suffix,
    /// Numeral following the slash (`lvl2s`).
    Denominator,
    /// Letter suffix following the denominator (`lvl3`).
    FractionSuffix,
}

impl Level {
    pub fn key(self) -> &'static str {
        match self {
            Level::Primary => "lvl1",
            Level::Slash => "lvl2_slash",
            Level::Suffix => "lvl2c",
            Level::Denominator => "lvl2s",
            Level::FractionSuffix => "lvl3",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

pub const SLASH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HouseNumber {
    /// `12`, `12-14`
    Plain { primary: String },
    /// `12А`, `12-14АБ`
    Lettered { primary: String, letter: String },
    /// `12/3`, `12/3Б`
    Fraction {
        primary: String,
        denominator: String,
        letter: Option<String>,
    },
    /// `12 к3`
    Block { primary: String, block: String },
}

impl HouseNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        decompose(raw)
    }

    pub fn primary(&self) -> &str {
        match self {
            HouseNumber::Plain { primary }
            | HouseNumber::Lettered { primary, .. }
            | HouseNumber::Fraction { primary, .. }
            | HouseNumber::Block { primary, .. } => primary,
        }
    }

    pub fn is_fraction(&self) -> bool {
        matches!(self, HouseNumber::Fraction { .. })
    }

    /// Present levels with their text, in the order they are drawn.
    pub fn levels(&self) -> Vec<(Level, &str)> {
        match self {
            HouseNumber::Plain { primary } => vec![(Level::Primary, primary.as_str())],
            HouseNumber::Lettered { primary, letter } => vec![
                (Level::Primary, primary.as_str()),
                (Level::Suffix, letter.as_str()),
            ],
            HouseNumber::Block { primary, block } => vec![
                (Level::Primary, primary.as_str()),
                (Level::Suffix, block.as_str()),
            ],
            HouseNumber::Fraction {
                primary,
                denominator,
                letter,
            } => {
                let mut out = vec![
                    (Level::Primary, primary.as_str()),
                    (Level::Slash, SLASH),
                    (Level::Denominator, denominator.as_str()),
                ];
                if let Some(letter) = letter {
                    out.push((Level::FractionSuffix, letter.as_str()));
                }
                out
            }
        }
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        self.levels()
            .into_iter()
            .find(|(l, _)| *l == level)
            .map(|(_, text)| text)
    }
}

/// Neighbor number printed under a directional arrow (`lvl_a1` + optional `lvl_a2c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowNumber {
    pub primary: String,
    pub letter: Option<String>,
}

impl ArrowNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        decompose_arrow(raw)
    }
}

type BuildFn = fn(&Captures<'_>) -> HouseNumber;

struct Rule {
    id: &'static str,
    pattern: &'static str,
    build: BuildFn,
}

const NUMERAL: &str = r"[1-9][0-9]*(?:-[1-9][0-9]*)?";

// Order is significant: the first matching rule classifies the input.
const RULES: &[Rule] = &[
    Rule {
        id: "plain",
        pattern: r"^(?P<lvl1>{N})$",
        build: build_plain,
    },
    Rule {
        id: "lettered",
        pattern: r"^(?P<lvl1>{N})(?P<lvl2c>[А-Я]+)$",
        build: build_lettered,
    },
    Rule {
        id: "fraction",
        pattern: r"^(?P<lvl1>{N})/(?P<lvl2s>[1-9][0-9]*)(?P<lvl3>[А-Я]*)$",
        build: build_fraction,
    },
    Rule {
        id: "block",
        pattern: r"^(?P<lvl1>{N})(?P<lvl2c> к[1-9][0-9]*)$",
        build: build_block,
    },
];

fn capture(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn build_plain(caps: &Captures<'_>) -> HouseNumber {
    HouseNumber::Plain {
        primary: capture(caps, "lvl1"),
    }
}

fn build_lettered(caps: &Captures<'_>) -> HouseNumber {
    HouseNumber::Lettered {
        primary: capture(caps, "lvl1"),
        letter: capture(caps, "lvl2c"),
    }
}

fn build_fraction(caps: &Captures<'_>) -> HouseNumber {
    let letter = capture(caps, "lvl3");
    HouseNumber::Fraction {
        primary: capture(caps, "lvl1"),
        denominator: capture(caps, "lvl2s"),
        letter: (!letter.is_empty()).then_some(letter),
    }
}

fn build_block(caps: &Captures<'_>) -> HouseNumber {
    HouseNumber::Block {
        primary: capture(caps, "lvl1"),
        block: capture(caps, "lvl2c"),
    }
}

fn compiled_rules() -> &'static [(&'static Rule, Regex)] {
    static RULES_RE: OnceLock<Vec<(&'static Rule, Regex)>> = OnceLock::new();
    RULES_RE.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| {
                let re = Regex::new(&rule.pattern.replace("{N}", NUMERAL)).expect("valid regex");
                (rule, re)
            })
            .collect()
    })
}

fn arrow_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^(?P<lvl_a1>{NUMERAL})(?P<lvl_a2c>[А-Я]+)?$")).expect("valid regex")
    })
}

/// Classifies `raw` into its house-number shape.
pub fn decompose(raw: &str) -> Result<HouseNumber> {
    for (rule, re) in compiled_rules() {
        if let Some(caps) = re.captures(raw) {
            tracing::trace!(rule = rule.id, input = raw, "house number classified");
            return Ok((rule.build)(&caps));
        }
    }
    Err(Error::InvalidHouseNumber {
        input: raw.to_string(),
    })
}

/// Classifies a neighbor number printed next to a directional arrow.
pub fn decompose_arrow(raw: &str) -> Result<ArrowNumber> {
    let Some(caps) = arrow_regex().captures(raw) else {
        return Err(Error::InvalidArrowNumber {
            input: raw.to_string(),
        });
    };
    Ok(ArrowNumber {
        primary: capture(&caps, "lvl_a1"),
        letter: caps.name("lvl_a2c").map(|m| m.as_str().to_string()),
    })
}
