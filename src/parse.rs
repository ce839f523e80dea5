//! Parser for PostgreSQL's default interval output format.
//!
//! Handles strings like `"3 years 2 mons 4 days 04:05:06.789"`: a sequence
//! of space-delimited `<count> <unit>` pairs optionally followed by a
//! `[sign]HH:MM:SS[.ffffff]` time of day. This is the only format covered;
//! PostgreSQL's alternate interval output styles (ISO 8601, sql_standard,
//! postgres_verbose) are not.

use std::num::ParseIntError;
use std::str::FromStr;

use tracing::debug;

use crate::error::ParseError;
use crate::interval::Interval;

/// Days per month under PostgreSQL's interval justification convention.
const DAYS_PER_MONTH: i32 = 30;

const MICROS_PER_SECOND: u32 = 1_000_000;
const MICROS_PER_MINUTE: u32 = 60 * MICROS_PER_SECOND;

/// Parses PostgreSQL's default interval text output into an [`Interval`].
///
/// The empty string is rejected as malformed, as is any input that deviates
/// from the pair/time grammar. On error nothing of the partial parse is
/// exposed; the error carries the full original literal.
pub fn parse(input: &str) -> Result<Interval, ParseError> {
    parse_inner(input).inspect_err(|e| {
        debug!(input, error = %e, "rejected interval literal");
    })
}

impl FromStr for Interval {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn parse_inner(input: &str) -> Result<Interval, ParseError> {
    // The space-delimited sections come in <count, unit> pairs until the
    // optional time portion: "3 years 2 days 04:15:47". An odd token count
    // means the last token is the time-of-day candidate. Splitting on a
    // single space keeps empty tokens, which fail number parsing below.
    let mut tokens: Vec<&str> = input.split(' ').collect();

    let time = if tokens.len() % 2 == 1 {
        tokens.pop().map(|t| parse_time_of_day(t, input)).transpose()?
    } else {
        None
    };

    let units = parse_unit_pairs(&tokens, input)?;

    let mut interval = Interval {
        years: units.years,
        years_negative: units.years_negative,
        hours: units.hours,
        ..Interval::default()
    };

    if let Some(time) = time {
        interval.hours = interval
            .hours
            .checked_add(time.hours)
            .ok_or_else(|| ParseError::Overflow(input.to_string()))?;
        interval.sub_hour_micros = time.micros;
        interval.time_negative = time.negative;
    }

    Ok(interval)
}

/// Parsed `[sign]HH:MM:SS[.ffffff]` segment. The segment sign is recorded
/// independently of `hours` so it survives a zero hour magnitude.
struct TimeOfDay {
    hours: i32,
    micros: u32,
    negative: bool,
}

fn parse_time_of_day(token: &str, input: &str) -> Result<TimeOfDay, ParseError> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    let parts: Vec<&str> = rest.split(':').collect();
    if parts.len() != 3 {
        return Err(ParseError::InvalidFormat(input.to_string()));
    }

    let hours: i32 = parts[0].parse().map_err(|cause| invalid_number(input, cause))?;
    let hours = if negative {
        hours
            .checked_neg()
            .ok_or_else(|| ParseError::Overflow(input.to_string()))?
    } else {
        hours
    };

    let minutes: u32 = parts[1].parse().map_err(|cause| invalid_number(input, cause))?;
    if minutes > 59 {
        return Err(ParseError::OutOfRange(input.to_string()));
    }

    let (sec_part, frac_part) = match parts[2].split_once('.') {
        Some((sec, frac)) => (sec, Some(frac)),
        None => (parts[2], None),
    };

    let seconds: u32 = sec_part.parse().map_err(|cause| invalid_number(input, cause))?;
    if seconds > 59 {
        return Err(ParseError::OutOfRange(input.to_string()));
    }

    let frac_micros = match frac_part {
        Some(frac) => {
            // ".5" means half a second: right-pad to the full microsecond
            // width. More than 6 fractional digits never appears in the
            // server's output and is rejected rather than misread.
            if frac.len() > 6 {
                return Err(ParseError::InvalidFormat(input.to_string()));
            }
            let padded = format!("{frac:0<6}");
            padded
                .parse::<u32>()
                .map_err(|cause| invalid_number(input, cause))?
        }
        None => 0,
    };

    Ok(TimeOfDay {
        hours,
        micros: minutes * MICROS_PER_MINUTE + seconds * MICROS_PER_SECOND + frac_micros,
        negative,
    })
}

/// Accumulated totals from the `<count> <unit>` pairs.
#[derive(Default)]
struct UnitTotals {
    years: u32,
    years_negative: bool,
    hours: i32,
}

fn parse_unit_pairs(tokens: &[&str], input: &str) -> Result<UnitTotals, ParseError> {
    // A stray unit-less trailing token must be reported, not paired past the
    // end of the sequence.
    if tokens.len() % 2 != 0 {
        return Err(ParseError::InvalidFormat(input.to_string()));
    }

    let mut totals = UnitTotals::default();

    for pair in tokens.chunks_exact(2) {
        let count: i32 = pair[0].parse().map_err(|cause| invalid_number(input, cause))?;

        match pair[1] {
            // At most one years pair appears in well-formed output, so a
            // repeat overwrites rather than accumulates.
            "year" | "years" => {
                totals.years = count.unsigned_abs();
                totals.years_negative = count < 0;
            }
            "mon" | "mons" => {
                totals.hours = add_hours(totals.hours, count, 24 * DAYS_PER_MONTH, input)?;
            }
            "day" | "days" => {
                totals.hours = add_hours(totals.hours, count, 24, input)?;
            }
            _ => return Err(ParseError::InvalidFormat(input.to_string())),
        }
    }

    Ok(totals)
}

fn add_hours(acc: i32, count: i32, hours_per_unit: i32, input: &str) -> Result<i32, ParseError> {
    count
        .checked_mul(hours_per_unit)
        .and_then(|hours| acc.checked_add(hours))
        .ok_or_else(|| ParseError::Overflow(input.to_string()))
}

fn invalid_number(input: &str, cause: ParseIntError) -> ParseError {
    ParseError::InvalidNumber {
        input: input.to_string(),
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_format() {
        let ival = parse("3 years 2 mons 4 days 04:05:06.789").unwrap();
        assert_eq!(ival.years(), 3);
        assert!(!ival.is_years_negative());
        // 2 months = 1440 hours, 4 days = 96 hours, plus 4 from the time.
        assert_eq!(ival.hours(), 1540);
        assert_eq!(ival.microseconds(), 306_789_000);
        assert!(!ival.is_time_negative());
    }

    #[test]
    fn test_time_only() {
        let ival = parse("04:05:06").unwrap();
        assert_eq!(ival.years(), 0);
        assert_eq!(ival.hours(), 4);
        assert_eq!(ival.microseconds(), 306_000_000);
    }

    #[test]
    fn test_pairs_only() {
        let ival = parse("1 year 2 mons 3 days").unwrap();
        assert_eq!(ival.years(), 1);
        assert_eq!(ival.hours(), 2 * 30 * 24 + 3 * 24);
        assert_eq!(ival.microseconds(), 0);
    }

    #[test]
    fn test_negative_time_with_zero_hours_keeps_sign() {
        let ival = parse("-00:15:30").unwrap();
        assert_eq!(ival.hours(), 0);
        assert!(ival.is_time_negative());
        assert_eq!(ival.microseconds(), -930_000_000);
    }

    #[test]
    fn test_negative_time_hours() {
        let ival = parse("-02:30:00").unwrap();
        assert_eq!(ival.hours(), -2);
        assert!(ival.is_time_negative());
        assert_eq!(ival.microseconds(), -1_800_000_000);
    }

    #[test]
    fn test_negative_years() {
        let ival = parse("-5 years").unwrap();
        assert_eq!(ival.years(), -5);
        assert!(ival.is_years_negative());
        assert_eq!(ival.hours(), 0);
    }

    #[test]
    fn test_explicit_plus_sign() {
        assert_eq!(parse("+02:00:00").unwrap(), parse("02:00:00").unwrap());
    }

    #[test]
    fn test_fraction_right_padded() {
        let ival = parse("00:00:01.5").unwrap();
        assert_eq!(ival.microseconds(), 1_500_000);

        let ival = parse("00:00:00.000001").unwrap();
        assert_eq!(ival.microseconds(), 1);
    }

    #[test]
    fn test_negative_days_reduce_hours() {
        let ival = parse("1 mon -2 days").unwrap();
        assert_eq!(ival.hours(), 30 * 24 - 48);
    }

    #[test]
    fn test_repeated_years_pair_overwrites() {
        let ival = parse("1 years 4 years").unwrap();
        assert_eq!(ival.years(), 4);
    }

    #[test]
    fn test_rejects_single_bogus_token() {
        assert!(matches!(parse("bogus"), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_unknown_unit() {
        assert!(matches!(
            parse("10 fortnights"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_minutes_out_of_range() {
        assert!(matches!(parse("00:60:00"), Err(ParseError::OutOfRange(_))));
    }

    #[test]
    fn test_rejects_seconds_out_of_range() {
        assert!(matches!(parse("00:00:61"), Err(ParseError::OutOfRange(_))));
    }

    #[test]
    fn test_rejects_unpaired_trailing_token() {
        // "2" is taken as the time candidate and is not a valid time shape.
        assert!(matches!(
            parse("3 years 2"),
            Err(ParseError::InvalidFormat(_))
        ));
        // With an even token count the stray unit keyword lands in a count
        // position and fails number parsing instead.
        assert!(matches!(
            parse("3 years days 04:05:06"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(parse(""), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_tokens_are_not_collapsed() {
        // Doubled spaces produce empty tokens, which never parse cleanly.
        assert!(parse("3  years 1 day").is_err());
        assert!(matches!(
            parse(" day"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_rejects_non_numeric_count() {
        assert!(matches!(
            parse("many years"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_rejects_two_part_time() {
        assert!(matches!(
            parse("04:05"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_overlong_fraction() {
        assert!(matches!(
            parse("00:00:01.1234567"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_hour_overflow() {
        assert!(matches!(
            parse("2000000000 days"),
            Err(ParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_count_beyond_i32_is_a_number_error() {
        assert!(matches!(
            parse("99999999999 days"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let ival: Interval = "1 day 02:30:00".parse().unwrap();
        assert_eq!(ival.hours(), 26);
        assert_eq!(ival.microseconds(), 1_800_000_000);
    }
}
