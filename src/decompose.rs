//! Decomposers for standard addresses, intersections and PO Boxes.
//!
//! Every decomposer works on an already-sanitized string and is total: a
//! decomposer that does not apply returns `None` or an empty value.

use crate::extract::FieldExtractors;
use crate::normalizer::AddressNormalizer;
use crate::types::{ParsedAddress, ParsedIntersection};

/// Fields of a single street: `[prefix] street [type] [suffix]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StreetParts {
    pub prefix: String,
    pub street: String,
    pub street_type: String,
    pub suffix: String,
}

/// Split street tokens into prefix, name, type and suffix.
///
/// The prefix and suffix checks are independent. The last remaining token is
/// taken as the type only when normalizing it changes it, so a lower-case
/// `"st"` stays part of the name while `"St"` becomes type `st`.
pub(crate) fn street_parts(words: &[&str], normalizer: &AddressNormalizer) -> StreetParts {
    let mut parts = StreetParts::default();
    let mut words = words;

    if let Some((first, rest)) = words.split_first() {
        if let Some(dir) = normalizer.directional(first) {
            parts.prefix = dir.to_string();
            words = rest;
        }
    }

    if let Some((last, rest)) = words.split_last() {
        if let Some(dir) = normalizer.directional(last) {
            parts.suffix = dir.to_string();
            words = rest;
        }
    }

    if let Some((last, rest)) = words.split_last() {
        if let Some(street_type) = normalizer.street_type(last) {
            if street_type != *last {
                parts.street_type = street_type.to_string();
                words = rest;
            }
        }
    }

    parts.street = words.join(" ");
    parts
}

/// Standard street address.
///
/// Returns the parsed address and the working string as it stood after ZIP,
/// state, city and unit removal, before the street number was taken.
pub(crate) fn standard(
    s: &str,
    extractors: &FieldExtractors,
    normalizer: &AddressNormalizer,
) -> (ParsedAddress, String) {
    let mut result = ParsedAddress::default();

    let (zip, rest) = extractors.zip(s);
    if let Some(zip) = zip {
        result.zip = zip.zip;
        result.plus4 = zip.plus4;
    }

    let (locality, rest) = extractors.locality(&rest, normalizer);
    result.city = locality.city;
    result.state = locality.state;

    let (unit, remainder) = extractors.secondary_unit(&rest);
    if let Some(unit) = unit {
        result.sec_unit_type = unit.kind;
        result.sec_unit_num = unit.number;
    }

    let (number, rest) = extractors.street_number(&remainder);
    if let Some(number) = number {
        result.number = number;
    }

    let words = tokens(&rest);
    if !words.is_empty() {
        let parts = street_parts(&words, normalizer);
        result.prefix = parts.prefix;
        result.street = parts.street;
        result.street_type = parts.street_type;
        result.suffix = parts.suffix;
    }

    (result.normalized(), remainder)
}

/// Standard parsing, falling back to the whole remainder as the street name
/// when neither a number nor a street was found.
pub(crate) fn informal(
    s: &str,
    extractors: &FieldExtractors,
    normalizer: &AddressNormalizer,
) -> ParsedAddress {
    let (mut result, remainder) = standard(s, extractors, normalizer);
    if !result.number.is_empty() || !result.street.is_empty() {
        return result;
    }

    let remainder = remainder.trim_matches(|c: char| c == ',' || c.is_whitespace());
    if !remainder.is_empty() {
        result.prefix.clear();
        result.street_type.clear();
        result.suffix.clear();
        result.street = remainder.to_string();
    }
    result.normalized()
}

/// Two streets joined by "and", "at", "&" or "@".
///
/// Declines when there is no marker or either street comes out empty. ZIP and
/// a trailing comma-delimited city/state are taken from the second half only.
pub(crate) fn intersection(
    s: &str,
    extractors: &FieldExtractors,
    normalizer: &AddressNormalizer,
) -> Option<ParsedIntersection> {
    let (first, second) = extractors.split_intersection(s)?;

    let (zip, second) = extractors.zip(second);
    let (locality, second) = extractors.trailing_locality(&second, normalizer);

    let one = street_parts(&tokens(first), normalizer);
    let two = street_parts(&tokens(&second), normalizer);

    let mut result = ParsedIntersection {
        prefix1: one.prefix,
        street1: one.street,
        type1: one.street_type,
        suffix1: one.suffix,
        prefix2: two.prefix,
        street2: two.street,
        type2: two.street_type,
        suffix2: two.suffix,
        city: locality.city,
        state: locality.state,
        zip: zip.map(|z| z.zip).unwrap_or_default(),
    };

    // Cross streets share an implicit type: "5th & Main St"
    if result.type1.is_empty() && !result.type2.is_empty() {
        result.type1 = result.type2.clone();
    } else if result.type2.is_empty() && !result.type1.is_empty() {
        result.type2 = result.type1.clone();
    }

    result.normalize();
    if result.street1.is_empty() || result.street2.is_empty() {
        return None;
    }
    Some(result)
}

/// PO Box address. Whatever is left after the box number, ZIP and state is
/// the city, verbatim.
pub(crate) fn po_box(
    s: &str,
    extractors: &FieldExtractors,
    normalizer: &AddressNormalizer,
) -> Option<ParsedAddress> {
    let (number, rest) = extractors.po_box(s);
    let number = number?;

    let mut result = ParsedAddress {
        sec_unit_type: "PO Box".to_string(),
        sec_unit_num: number,
        ..Default::default()
    };

    let (zip, rest) = extractors.zip(&rest);
    if let Some(zip) = zip {
        result.zip = zip.zip;
        result.plus4 = zip.plus4;
    }

    let (state, rest) = extractors.state(&rest, normalizer);
    if let Some(state) = state {
        result.state = state.to_string();
    }

    result.city = rest
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string();

    Some(result.normalized())
}

fn tokens(s: &str) -> Vec<&str> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}
