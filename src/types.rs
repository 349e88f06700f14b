//! Result types produced by the parser.

use std::collections::HashMap;
use std::fmt;

/// Structured representation of a parsed street or PO Box address.
///
/// Every field is a plain string; an empty string means the component was
/// not recognized. After [`normalize`](Self::normalize), `street` and `city`
/// are title-cased, `state` is upper-case and every field is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParsedAddress {
    /// Street number (e.g., "1005", "123-A", "N1500E600")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub number: String,
    /// Directional prefix (e.g., "N")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub prefix: String,
    /// Street name (e.g., "Gravenstein")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub street: String,
    /// Canonical street type (e.g., "hwy")
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", skip_serializing_if = "String::is_empty")
    )]
    pub street_type: String,
    /// Directional suffix (e.g., "SW")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub suffix: String,
    /// Secondary unit designator as written (e.g., "Apt", "Suite", "PO Box")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub sec_unit_type: String,
    /// Secondary unit identifier (e.g., "4B")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub sec_unit_num: String,
    /// City (e.g., "Sebastopol")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub city: String,
    /// Two-letter state code (e.g., "CA")
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub state: String,
    /// Five-digit ZIP code
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub zip: String,
    /// ZIP+4 extension
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub plus4: String,
}

impl ParsedAddress {
    /// Check if the parsed address has any components.
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
            && self.prefix.is_empty()
            && self.street.is_empty()
            && self.street_type.is_empty()
            && self.suffix.is_empty()
            && self.sec_unit_type.is_empty()
            && self.sec_unit_num.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.zip.is_empty()
            && self.plus4.is_empty()
    }

    /// Trim every field, title-case `street` and `city`, upper-case `state`.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.number);
        trim_in_place(&mut self.prefix);
        self.street = title_case(&self.street);
        trim_in_place(&mut self.street_type);
        trim_in_place(&mut self.suffix);
        trim_in_place(&mut self.sec_unit_type);
        trim_in_place(&mut self.sec_unit_num);
        self.city = title_case(&self.city);
        self.state = self.state.trim().to_uppercase();
        trim_in_place(&mut self.zip);
        trim_in_place(&mut self.plus4);
    }

    /// Consuming form of [`normalize`](Self::normalize).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Get all non-empty components as a map keyed by field name.
    pub fn components(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        macro_rules! add_component {
            ($field:expr, $name:expr) => {
                if !$field.is_empty() {
                    map.insert($name.to_string(), $field.clone());
                }
            };
        }

        add_component!(self.number, "number");
        add_component!(self.prefix, "prefix");
        add_component!(self.street, "street");
        add_component!(self.street_type, "type");
        add_component!(self.suffix, "suffix");
        add_component!(self.sec_unit_type, "sec_unit_type");
        add_component!(self.sec_unit_num, "sec_unit_num");
        add_component!(self.city, "city");
        add_component!(self.state, "state");
        add_component!(self.zip, "zip");
        add_component!(self.plus4, "plus4");

        map
    }
}

/// Two crossing streets plus the locality they share.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParsedIntersection {
    /// First street directional prefix
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub prefix1: String,
    /// First street name
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub street1: String,
    /// First street type
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub type1: String,
    /// First street directional suffix
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub suffix1: String,
    /// Second street directional prefix
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub prefix2: String,
    /// Second street name
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub street2: String,
    /// Second street type
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub type2: String,
    /// Second street directional suffix
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub suffix2: String,
    /// Shared city
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub city: String,
    /// Shared two-letter state code
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub state: String,
    /// Shared ZIP code
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub zip: String,
}

impl ParsedIntersection {
    /// Check if the intersection has any components.
    pub fn is_empty(&self) -> bool {
        self.prefix1.is_empty()
            && self.street1.is_empty()
            && self.type1.is_empty()
            && self.suffix1.is_empty()
            && self.prefix2.is_empty()
            && self.street2.is_empty()
            && self.type2.is_empty()
            && self.suffix2.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.zip.is_empty()
    }

    /// Trim every field, title-case streets and city, upper-case `state`.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.prefix1);
        self.street1 = title_case(&self.street1);
        trim_in_place(&mut self.type1);
        trim_in_place(&mut self.suffix1);
        trim_in_place(&mut self.prefix2);
        self.street2 = title_case(&self.street2);
        trim_in_place(&mut self.type2);
        trim_in_place(&mut self.suffix2);
        self.city = title_case(&self.city);
        self.state = self.state.trim().to_uppercase();
        trim_in_place(&mut self.zip);
    }

    /// Get all non-empty components as a map keyed by field name.
    pub fn components(&self) -> HashMap<String, String> {
        [
            ("prefix1", &self.prefix1),
            ("street1", &self.street1),
            ("type1", &self.type1),
            ("suffix1", &self.suffix1),
            ("prefix2", &self.prefix2),
            ("street2", &self.street2),
            ("type2", &self.type2),
            ("suffix2", &self.suffix2),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
    }
}

/// Classification of a location string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "WireResult", try_from = "WireResult")
)]
pub enum ParseResult {
    /// A standard or informal street address
    Address(ParsedAddress),
    /// A PO Box address
    PoBox(ParsedAddress),
    /// A street intersection
    Intersection(ParsedIntersection),
    /// Nothing recognizable
    None,
}

impl ParseResult {
    /// The type tag used on the wire: `address`, `po_box`, `intersection` or `none`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParseResult::Address(_) => "address",
            ParseResult::PoBox(_) => "po_box",
            ParseResult::Intersection(_) => "intersection",
            ParseResult::None => "none",
        }
    }

    /// The address payload of an `Address` or `PoBox` result.
    pub fn address(&self) -> Option<&ParsedAddress> {
        match self {
            ParseResult::Address(address) | ParseResult::PoBox(address) => Some(address),
            _ => None,
        }
    }

    /// The intersection payload of an `Intersection` result.
    pub fn intersection(&self) -> Option<&ParsedIntersection> {
        match self {
            ParseResult::Intersection(intersection) => Some(intersection),
            _ => None,
        }
    }

    /// Whether nothing was recognized.
    pub fn is_none(&self) -> bool {
        matches!(self, ParseResult::None)
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct WireResult {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<ParsedAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intersection: Option<ParsedIntersection>,
}

#[cfg(feature = "serde")]
impl From<ParseResult> for WireResult {
    fn from(result: ParseResult) -> Self {
        let kind = result.type_name().to_string();
        match result {
            ParseResult::Address(address) | ParseResult::PoBox(address) => WireResult {
                kind,
                address: Some(address),
                intersection: None,
            },
            ParseResult::Intersection(intersection) => WireResult {
                kind,
                address: None,
                intersection: Some(intersection),
            },
            ParseResult::None => WireResult {
                kind,
                address: None,
                intersection: None,
            },
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<WireResult> for ParseResult {
    type Error = String;

    fn try_from(wire: WireResult) -> std::result::Result<Self, Self::Error> {
        match (wire.kind.as_str(), wire.address, wire.intersection) {
            ("address", Some(address), None) => Ok(ParseResult::Address(address)),
            ("po_box", Some(address), None) => Ok(ParseResult::PoBox(address)),
            ("intersection", None, Some(intersection)) => {
                Ok(ParseResult::Intersection(intersection))
            }
            ("none", None, None) => Ok(ParseResult::None),
            (kind, _, _) => Err(format!("payload does not match result type `{kind}`")),
        }
    }
}

/// Which decomposer(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParseMode {
    /// Intersection, then PO Box, then standard, then informal
    #[default]
    Auto,
    /// Standard street address only
    Standard,
    /// Standard with the whole-remainder street fallback
    Informal,
    /// Intersection only
    Intersection,
    /// PO Box only
    PoBox,
}

impl ParseMode {
    /// Convert to the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Auto => "auto",
            ParseMode::Standard => "standard",
            ParseMode::Informal => "informal",
            ParseMode::Intersection => "intersection",
            ParseMode::PoBox => "po_box",
        }
    }

    /// Parse from a mode name; the empty string means `Auto`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Some(ParseMode::Auto),
            "standard" => Some(ParseMode::Standard),
            "informal" => Some(ParseMode::Informal),
            "intersection" => Some(ParseMode::Intersection),
            "po_box" => Some(ParseMode::PoBox),
            _ => None,
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper-case the first letter of each word and lower-case the rest,
/// collapsing internal whitespace.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::with_capacity(word.len());
                    out.push(upper_single(first));
                    out.extend(chars.flat_map(char::to_lowercase));
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Upper-case a character only when it maps to exactly one character, so
/// `ß` stays `ß` instead of expanding to `SS`.
fn upper_single(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn trim_in_place(field: &mut String) {
    let trimmed = field.trim();
    if trimmed.len() != field.len() {
        *field = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_address_default() {
        let parsed = ParsedAddress::default();
        assert!(parsed.is_empty());
        assert!(parsed.components().is_empty());
    }

    #[test]
    fn test_parsed_address_components() {
        let parsed = ParsedAddress {
            number: "123".to_string(),
            street: "Main".to_string(),
            street_type: "st".to_string(),
            ..Default::default()
        };

        let components = parsed.components();
        assert_eq!(components.get("number"), Some(&"123".to_string()));
        assert_eq!(components.get("type"), Some(&"st".to_string()));
        assert_eq!(components.len(), 3);
        assert!(!parsed.is_empty());
    }

    #[test]
    fn test_normalize() {
        let parsed = ParsedAddress {
            number: " 42 ".to_string(),
            street: "  old   COUNTY road ".to_string(),
            city: "san FRANCISCO".to_string(),
            state: "ca ".to_string(),
            ..Default::default()
        }
        .normalized();

        assert_eq!(parsed.number, "42");
        assert_eq!(parsed.street, "Old County Road");
        assert_eq!(parsed.city, "San Francisco");
        assert_eq!(parsed.state, "CA");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = ParsedAddress {
            number: "1005".to_string(),
            prefix: "N".to_string(),
            street: "gravenstein 5th".to_string(),
            street_type: "hwy".to_string(),
            city: " sebastopol".to_string(),
            state: "ca".to_string(),
            zip: "95472".to_string(),
            ..Default::default()
        }
        .normalized();
        let twice = once.clone().normalized();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_is_idempotent_for_non_ascii() {
        for street in ["ßtraße", "ǆungla", "élan vital", "İstanbul", "ﬁeld"] {
            let once = ParsedAddress {
                street: street.to_string(),
                city: street.to_string(),
                ..Default::default()
            }
            .normalized();
            let twice = once.clone().normalized();
            assert_eq!(once, twice, "street {street:?}");
        }
        assert_eq!(title_case("ßtraße"), "ßtraße");
        assert_eq!(title_case("élan"), "Élan");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("5th"), "5th");
        assert_eq!(title_case("mcDONALD  lane"), "Mcdonald Lane");
        assert_eq!(title_case("   "), "");
        assert_eq!(title_case("élan"), "Élan");
    }

    #[test]
    fn test_intersection_components() {
        let intersection = ParsedIntersection {
            street1: "Mission".to_string(),
            type1: "st".to_string(),
            street2: "Valencia".to_string(),
            type2: "st".to_string(),
            ..Default::default()
        };
        let components = intersection.components();
        assert_eq!(components.len(), 4);
        assert_eq!(components.get("street2"), Some(&"Valencia".to_string()));
    }

    #[test]
    fn test_parse_result_accessors() {
        let result = ParseResult::PoBox(ParsedAddress {
            sec_unit_type: "PO Box".to_string(),
            sec_unit_num: "1234".to_string(),
            ..Default::default()
        });
        assert_eq!(result.type_name(), "po_box");
        assert_eq!(result.address().map(|a| a.sec_unit_num.as_str()), Some("1234"));
        assert!(result.intersection().is_none());
        assert!(ParseResult::None.is_none());
        assert_eq!(ParseResult::None.to_string(), "none");
    }

    #[test]
    fn test_parse_mode_names() {
        assert_eq!(ParseMode::from_name(""), Some(ParseMode::Auto));
        assert_eq!(ParseMode::from_name("PO_BOX"), Some(ParseMode::PoBox));
        assert_eq!(ParseMode::from_name("standard"), Some(ParseMode::Standard));
        assert_eq!(ParseMode::from_name("fuzzy"), None);
        assert_eq!(ParseMode::Informal.to_string(), "informal");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_result_wire_shape() {
        let result = ParseResult::Address(ParsedAddress {
            number: "789".to_string(),
            street: "Oak".to_string(),
            street_type: "ave".to_string(),
            ..Default::default()
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "address",
                "address": { "number": "789", "street": "Oak", "type": "ave" }
            })
        );

        let none = serde_json::to_value(ParseResult::None).unwrap();
        assert_eq!(none, serde_json::json!({ "type": "none" }));

        let back: ParseResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_result_rejects_mismatched_payload() {
        let bad = serde_json::json!({ "type": "intersection", "address": { "street": "Oak" } });
        assert!(serde_json::from_value::<ParseResult>(bad).is_err());
    }
}
