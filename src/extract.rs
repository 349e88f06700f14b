//! Field extractors.
//!
//! Each extractor takes the current working string and returns what it
//! captured together with the string left over once the match is removed.
//! "No match" is never an error: the capture is simply `None` and the
//! working string comes back unchanged.
//!
//! Patterns are compiled with the `regex` crate, which runs in time linear
//! in the input and never backtracks.

use regex::Regex;

use crate::normalizer::AddressNormalizer;

/// ZIP code with optional +4 extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zip {
    /// Five-digit base
    pub zip: String,
    /// Four-digit extension, empty when absent
    pub plus4: String,
}

/// State code plus the city found next to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Locality {
    /// City, empty when not found
    pub city: String,
    /// Two-letter state code, empty when not found
    pub state: String,
}

/// Secondary unit designator and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryUnit {
    /// Designator as written ("Apt", "Suite", "#", "Rear")
    pub kind: String,
    /// Identifier, empty for standalone designators
    pub number: String,
}

/// Compiled patterns shared by all decomposers.
#[derive(Debug, Clone)]
pub struct FieldExtractors {
    zip: Regex,
    sec_unit: Regex,
    number: Regex,
    po_box: Regex,
    corner: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

impl FieldExtractors {
    /// Compile all patterns.
    pub fn new() -> Self {
        Self {
            zip: compile(r"\b([0-9]{5})(?:[-\s]?([0-9]{4}))?\b"),
            sec_unit: compile(
                r"(?i)(?:\b(apartment|apt|suite|ste|unit|room|rm|floor|fl|building|bldg)\b|(#))\W*([a-z0-9-]+)|\b(basement|front|rear)\b\s*(?:,|$)",
            ),
            number: compile(r"(?i)^[^\w#]*([0-9]+(?:-[a-z0-9]+)?|[nsew][0-9]{1,6}[nsew][0-9]{1,6})\b"),
            po_box: compile(r"(?i)^\W*p\W*(?:o|ost\s*office)?\W*box\W*([0-9]+)"),
            corner: compile(r"(?i)\b(?:and|at)\b|[&@]"),
        }
    }

    /// First ZIP or ZIP+4 in the string.
    pub fn zip(&self, s: &str) -> (Option<Zip>, String) {
        let Some(caps) = self.zip.captures(s) else {
            return (None, s.to_string());
        };
        let Some(whole) = caps.get(0) else {
            return (None, s.to_string());
        };
        let zip = Zip {
            zip: caps.get(1).map_or("", |m| m.as_str()).to_string(),
            plus4: caps.get(2).map_or("", |m| m.as_str()).to_string(),
        };
        (Some(zip), splice(s, whole.start(), whole.end(), ""))
    }

    /// State code and city for a standard address.
    ///
    /// With two or more comma segments only the last one is searched for the
    /// state; otherwise the last three tokens are scanned from the end.
    pub fn locality(&self, s: &str, normalizer: &AddressNormalizer) -> (Locality, String) {
        let segments = comma_segments(s);
        if segments.len() >= 2 {
            self.comma_locality(&segments, normalizer)
        } else {
            self.token_locality(&segments.join(" "), normalizer)
        }
    }

    /// State code and city from a trailing comma-delimited segment only.
    ///
    /// Text without two or more comma segments comes back unchanged.
    pub fn trailing_locality(&self, s: &str, normalizer: &AddressNormalizer) -> (Locality, String) {
        let segments = comma_segments(s);
        if segments.len() < 2 {
            return (Locality::default(), s.to_string());
        }
        self.comma_locality(&segments, normalizer)
    }

    fn comma_locality(&self, segments: &[&str], normalizer: &AddressNormalizer) -> (Locality, String) {
        let last = segments.len() - 1;
        let words: Vec<&str> = segments[last].split_whitespace().collect();

        if let Some(i) = words.iter().position(|w| normalizer.is_state_code(w)) {
            let state = normalizer.state(words[i]).unwrap_or_default().to_string();
            return if i > 0 {
                let city = words[..i].join(" ");
                (Locality { city, state }, segments[..last].join(", "))
            } else {
                let city = segments[last - 1].to_string();
                (Locality { city, state }, segments[..last - 1].join(", "))
            };
        }

        if let Some(code) = normalizer.state(segments[last]) {
            let locality = Locality {
                city: segments[last - 1].to_string(),
                state: code.to_string(),
            };
            return (locality, segments[..last - 1].join(", "));
        }

        // No state: a trailing segment that looks like a place name is the city
        let candidate = segments[last];
        if candidate.bytes().any(|b| b.is_ascii_digit()) || self.sec_unit.is_match(candidate) {
            return (Locality::default(), segments.join(", "));
        }
        let locality = Locality {
            city: candidate.to_string(),
            state: String::new(),
        };
        (locality, segments[..last].join(", "))
    }

    fn token_locality(&self, s: &str, normalizer: &AddressNormalizer) -> (Locality, String) {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.len() < 2 {
            return (Locality::default(), s.to_string());
        }

        for i in (words.len().saturating_sub(3)..words.len()).rev() {
            let word = words[i];
            if !normalizer.is_state_code(word) {
                continue;
            }

            let state = normalizer.state(word).unwrap_or_default().to_string();
            if i == 0 {
                return (Locality { city: String::new(), state }, words[1..].join(" "));
            }
            let start = self.city_start(&words, i, normalizer);
            let city = words[start..i].join(" ");
            return (Locality { city, state }, words[..start].join(" "));
        }

        (Locality::default(), s.to_string())
    }

    /// Walk back from the state token until a street type, street number or
    /// secondary unit is hit.
    fn city_start(&self, words: &[&str], state_at: usize, normalizer: &AddressNormalizer) -> usize {
        let mut start = state_at;
        while start > 0 {
            let prev = words[start - 1];
            let after_unit = start >= 2 && is_unit_keyword(words[start - 2]);
            if normalizer.is_street_type(prev)
                || self.is_number(prev)
                || is_unit_keyword(prev)
                || after_unit
            {
                break;
            }
            start -= 1;
        }
        start
    }

    /// State code only, for PO Box addresses. The state token is removed and
    /// everything else is left in place.
    pub fn state(&self, s: &str, normalizer: &AddressNormalizer) -> (Option<&'static str>, String) {
        let segments = comma_segments(s);
        if segments.len() >= 2 {
            let last = segments.len() - 1;
            let words: Vec<&str> = segments[last].split_whitespace().collect();
            if let Some(i) = words.iter().position(|w| normalizer.is_state_code(w)) {
                let mut rest: Vec<String> = segments[..last].iter().map(|seg| seg.to_string()).collect();
                let remaining: Vec<&str> = words
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, w)| *w)
                    .collect();
                if !remaining.is_empty() {
                    rest.push(remaining.join(" "));
                }
                return (normalizer.state(words[i]), rest.join(", "));
            }
            if let Some(code) = normalizer.state(segments[last]) {
                return (Some(code), segments[..last].join(", "));
            }
            return (None, segments.join(", "));
        }

        let words: Vec<&str> = s.split_whitespace().collect();
        for i in (words.len().saturating_sub(3)..words.len()).rev() {
            if normalizer.is_state_code(words[i]) {
                let mut rest = words.clone();
                rest.remove(i);
                return (normalizer.state(words[i]), rest.join(" "));
            }
        }
        (None, s.to_string())
    }

    /// First secondary unit designation. The match is replaced by a space.
    pub fn secondary_unit(&self, s: &str) -> (Option<SecondaryUnit>, String) {
        let Some(caps) = self.sec_unit.captures(s) else {
            return (None, s.to_string());
        };
        let Some(whole) = caps.get(0) else {
            return (None, s.to_string());
        };

        let unit = if let Some(standalone) = caps.get(4) {
            SecondaryUnit {
                kind: standalone.as_str().to_string(),
                number: String::new(),
            }
        } else {
            let kind = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            SecondaryUnit {
                kind: kind.to_string(),
                number: caps.get(3).map_or("", |m| m.as_str()).to_string(),
            }
        };
        (Some(unit), splice(s, whole.start(), whole.end(), " "))
    }

    /// Street number at the start of the string, ignoring leading punctuation.
    pub fn street_number(&self, s: &str) -> (Option<String>, String) {
        match self.number.captures(s) {
            Some(caps) => {
                let number = caps.get(1).map_or("", |m| m.as_str()).to_string();
                let end = caps.get(0).map_or(0, |m| m.end());
                (Some(number), s[end..].to_string())
            }
            None => (None, s.to_string()),
        }
    }

    /// Whether a token starts with a street number.
    pub fn is_number(&self, token: &str) -> bool {
        self.number.is_match(token)
    }

    /// PO Box number at the start of the string.
    pub fn po_box(&self, s: &str) -> (Option<String>, String) {
        match self.po_box.captures(s) {
            Some(caps) => {
                let number = caps.get(1).map_or("", |m| m.as_str()).to_string();
                let end = caps.get(0).map_or(0, |m| m.end());
                (Some(number), s[end..].to_string())
            }
            None => (None, s.to_string()),
        }
    }

    /// Whether the string starts with a PO Box marker.
    pub fn has_po_box(&self, s: &str) -> bool {
        self.po_box.is_match(s)
    }

    /// Split around the first intersection marker. Both sides are trimmed and
    /// must be non-empty.
    pub fn split_intersection<'a>(&self, s: &'a str) -> Option<(&'a str, &'a str)> {
        let marker = self.corner.find(s)?;
        let first = s[..marker.start()].trim();
        let second = s[marker.end()..].trim();
        if first.is_empty() || second.is_empty() {
            return None;
        }
        Some((first, second))
    }
}

impl Default for FieldExtractors {
    fn default() -> Self {
        Self::new()
    }
}

fn splice(s: &str, start: usize, end: usize, with: &str) -> String {
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..start]);
    out.push_str(with);
    out.push_str(&s[end..]);
    out
}

fn comma_segments(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).filter(|seg| !seg.is_empty()).collect()
}

fn is_unit_keyword(token: &str) -> bool {
    if token.starts_with('#') {
        return true;
    }
    let key = token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_ascii_lowercase();
    matches!(
        key.as_str(),
        "apartment" | "apt" | "suite" | "ste" | "unit" | "room" | "rm" | "floor" | "fl" | "building" | "bldg"
    )
}
