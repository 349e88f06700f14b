//! Address parsing functionality.

use crate::ParserConfig;
use crate::decompose;
use crate::error::Result;
use crate::extract::FieldExtractors;
use crate::guard;
use crate::normalizer::AddressNormalizer;
use crate::types::{ParseMode, ParseResult, ParsedAddress, ParsedIntersection};

/// Address parsing engine.
///
/// Holds only read-only state (lookup tables, compiled patterns and length
/// bounds) fixed at construction, so one instance can be shared freely
/// across threads. Instances built from the same configuration are
/// interchangeable.
#[derive(Debug, Clone)]
pub struct AddressParser {
    config: ParserConfig,
    normalizer: AddressNormalizer,
    extractors: FieldExtractors,
}

impl AddressParser {
    /// Create a new parser with default bounds.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            normalizer: AddressNormalizer::new(),
            extractors: FieldExtractors::new(),
        }
    }

    /// Create a parser with custom bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// bounds are out of range.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Get the configuration used by this parser.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Get the normalization tables used by this parser.
    pub fn normalizer(&self) -> &AddressNormalizer {
        &self.normalizer
    }

    /// Validate and sanitize raw input into the working string every
    /// decomposer expects.
    pub fn sanitize(&self, input: &str) -> Result<String> {
        guard::validate(input, self.config.max_input_len).inspect_err(|e| {
            tracing::debug!(kind = %e.kind(), "input rejected");
        })?;
        Ok(guard::sanitize(input, self.config.max_working_len))
    }

    /// Classify and parse a location string.
    ///
    /// Tries intersection, then PO Box, then standard, then informal parsing,
    /// each against the same sanitized string. The first non-empty
    /// classification wins.
    ///
    /// # Errors
    ///
    /// Returns an error only when the input is rejected before parsing:
    /// empty, too long, or containing a NUL byte.
    ///
    /// # Example
    ///
    /// ```rust
    /// use parse_address::{AddressParser, ParseResult};
    ///
    /// let parser = AddressParser::new();
    /// let result = parser.parse("1005 N Gravenstein Hwy Sebastopol CA 95472")?;
    /// if let ParseResult::Address(address) = result {
    ///     assert_eq!(address.number, "1005");
    ///     assert_eq!(address.street_type, "hwy");
    /// }
    /// # Ok::<(), parse_address::Error>(())
    /// ```
    pub fn parse(&self, address: &str) -> Result<ParseResult> {
        self.parse_with_mode(address, ParseMode::Auto)
    }

    /// Parse raw bytes, rejecting invalid UTF-8.
    pub fn parse_bytes(&self, address: &[u8]) -> Result<ParseResult> {
        let text = guard::validate_bytes(address, self.config.max_input_len).inspect_err(|e| {
            tracing::debug!(kind = %e.kind(), "input rejected");
        })?;
        self.parse(text)
    }

    /// Parse with an explicit decomposer instead of the automatic cascade.
    ///
    /// A forced decomposer that declines, or finds nothing, yields
    /// [`ParseResult::None`].
    pub fn parse_with_mode(&self, address: &str, mode: ParseMode) -> Result<ParseResult> {
        let sanitized = self.sanitize(address)?;

        let result = match mode {
            ParseMode::Auto => self.classify(&sanitized),
            ParseMode::Standard => non_empty(self.parse_address(&sanitized), ParseResult::Address),
            ParseMode::Informal => non_empty(self.parse_informal(&sanitized), ParseResult::Address),
            ParseMode::Intersection => self
                .parse_intersection(&sanitized)
                .map_or(ParseResult::None, ParseResult::Intersection),
            ParseMode::PoBox => self
                .parse_po_box(&sanitized)
                .map_or(ParseResult::None, |address| non_empty(address, ParseResult::PoBox)),
        };

        tracing::debug!(
            mode = %mode,
            kind = result.type_name(),
            len = sanitized.len(),
            "parsed location"
        );
        Ok(result)
    }

    fn classify(&self, sanitized: &str) -> ParseResult {
        if let Some(intersection) = self.parse_intersection(sanitized) {
            return ParseResult::Intersection(intersection);
        }

        if let Some(address) = self.parse_po_box(sanitized) {
            if !address.is_empty() {
                return ParseResult::PoBox(address);
            }
        }

        let address = self.parse_address(sanitized);
        if !address.is_empty() {
            return ParseResult::Address(address);
        }

        non_empty(self.parse_informal(sanitized), ParseResult::Address)
    }

    /// Parse a sanitized string as a standard street address.
    pub fn parse_address(&self, sanitized: &str) -> ParsedAddress {
        decompose::standard(sanitized, &self.extractors, &self.normalizer).0
    }

    /// Parse a sanitized string as a standard address, keeping the whole
    /// remainder as the street name when no number or street is found.
    pub fn parse_informal(&self, sanitized: &str) -> ParsedAddress {
        decompose::informal(sanitized, &self.extractors, &self.normalizer)
    }

    /// Parse a sanitized string as a street intersection.
    ///
    /// Returns `None` when there is no intersection marker or either street
    /// is empty.
    pub fn parse_intersection(&self, sanitized: &str) -> Option<ParsedIntersection> {
        decompose::intersection(sanitized, &self.extractors, &self.normalizer)
    }

    /// Parse a sanitized string as a PO Box address.
    ///
    /// Returns `None` when the string does not start with a PO Box marker.
    pub fn parse_po_box(&self, sanitized: &str) -> Option<ParsedAddress> {
        decompose::po_box(sanitized, &self.extractors, &self.normalizer)
    }

    /// Parse multiple addresses, one result per input.
    pub fn parse_batch(&self, addresses: &[&str]) -> Vec<Result<ParseResult>> {
        addresses.iter().map(|addr| self.parse(addr)).collect()
    }

    /// Parse multiple addresses in parallel using multiple threads.
    ///
    /// Results come back in the same order as the input. The parser is
    /// shared by reference; it holds no mutable state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use parse_address::AddressParser;
    ///
    /// let parser = AddressParser::new();
    /// let addresses = vec![
    ///     "123 Main St, New York, NY",
    ///     "",
    ///     "PO Box 12 Austin TX 78701",
    /// ];
    ///
    /// let results = parser.parse_batch_parallel(&addresses);
    /// assert!(results[0].is_ok());
    /// assert!(results[1].is_err());
    /// assert_eq!(results[2].as_ref().map(|r| r.type_name()), Ok("po_box"));
    /// ```
    #[cfg(feature = "parallel")]
    pub fn parse_batch_parallel(&self, addresses: &[&str]) -> Vec<Result<ParseResult>> {
        use rayon::prelude::*;

        addresses.par_iter().map(|addr| self.parse(addr)).collect()
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(address: ParsedAddress, wrap: fn(ParsedAddress) -> ParseResult) -> ParseResult {
    if address.is_empty() {
        ParseResult::None
    } else {
        wrap(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_location_kinds() {
        let parser = AddressParser::new();
        let cases = [
            ("1005 N Gravenstein Hwy Sebastopol CA 95472", "address"),
            ("Mission St and Valencia St", "intersection"),
            ("PO Box 1234", "po_box"),
            ("123 Main Street", "address"),
            ("   ", "none"),
        ];
        for (input, expected) in cases {
            let result = parser.parse(input).unwrap();
            assert_eq!(result.type_name(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_empty_is_error() {
        let parser = AddressParser::new();
        assert_matches!(parser.parse(""), Err(Error::InputEmpty));
    }

    #[test]
    fn test_parse_bytes() {
        let parser = AddressParser::new();
        assert_matches!(parser.parse_bytes(&[0xff, 0xfe]), Err(Error::InvalidEncoding));
        assert_matches!(parser.parse_bytes(b"PO Box 9"), Ok(ParseResult::PoBox(_)));
    }

    #[test]
    fn test_intersection_marker_inside_street_falls_through() {
        let parser = AddressParser::new();
        // "at" splits this, but the first half has no street left
        let result = parser.parse("N at 100 Main St").unwrap();
        assert_eq!(result.type_name(), "address");
    }

    #[test]
    fn test_po_box_loses_to_intersection_with_streets() {
        let parser = AddressParser::new();
        let result = parser.parse("PO Box 12 & Main St").unwrap();
        assert_matches!(result, ParseResult::Intersection(_));

        let result = parser.parse("PO Box 12 at Springfield IL").unwrap();
        assert_matches!(result, ParseResult::Intersection(_));

        // The second half is all city and state, so the intersection declines
        let result = parser.parse("PO Box 12 at, Springfield, IL").unwrap();
        assert_matches!(result, ParseResult::PoBox(_));
    }

    #[test]
    fn test_po_box_when_intersection_declines() {
        let parser = AddressParser::new();
        let result = parser.parse("PO Box 12 &").unwrap();
        let address = result.address().unwrap();
        assert_eq!(result.type_name(), "po_box");
        assert_eq!(address.sec_unit_num, "12");
    }

    #[test]
    fn test_forced_modes() {
        let parser = AddressParser::new();

        let result = parser
            .parse_with_mode("Mission St and Valencia St", ParseMode::Standard)
            .unwrap();
        assert_matches!(result, ParseResult::Address(_));

        let result = parser
            .parse_with_mode("123 Main St", ParseMode::Intersection)
            .unwrap();
        assert_eq!(result, ParseResult::None);

        let result = parser.parse_with_mode("123 Main St", ParseMode::PoBox).unwrap();
        assert_eq!(result, ParseResult::None);

        let result = parser.parse_with_mode("PO Box 7", ParseMode::PoBox).unwrap();
        assert_matches!(result, ParseResult::PoBox(_));

        assert_matches!(
            parser.parse_with_mode("", ParseMode::Informal),
            Err(Error::InputEmpty)
        );
    }

    #[test]
    fn test_with_config_bounds() {
        let config = ParserConfig::builder()
            .max_input_len(200)
            .max_working_len(20)
            .build();
        let parser = AddressParser::with_config(config).unwrap();

        assert_matches!(
            parser.parse(&"A".repeat(201)),
            Err(Error::InputTooLong { len: 201, max: 200 })
        );
        assert_eq!(parser.sanitize(&"B ".repeat(50)).unwrap().len(), 19);

        let invalid = ParserConfig::builder().max_input_len(10).build();
        assert_matches!(
            AddressParser::with_config(invalid),
            Err(Error::InvalidConfig { .. })
        );
    }

    #[test]
    fn test_parse_batch() {
        let parser = AddressParser::new();
        let results = parser.parse_batch(&["123 Main St", "", "5th Ave & Main"]);
        assert_eq!(results.len(), 3);
        assert_matches!(results[0], Ok(ParseResult::Address(_)));
        assert_matches!(results[1], Err(Error::InputEmpty));
        assert_matches!(results[2], Ok(ParseResult::Intersection(_)));
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AddressParser>();
    }
}
