use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::round_to;
use crate::types::{with_metadata, ComputationOutput};
use crate::CalcResult;

const DAYS_PER_MONTH: Decimal = dec!(30.44);
const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// Dates travel as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateCalcInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateCalcOutput {
    pub total_days: i64,
    /// Average-month approximation, 1dp.
    pub total_months: Decimal,
    /// 2dp.
    pub total_years: Decimal,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_date_diff(input: &DateCalcInput) -> CalcResult<ComputationOutput<DateCalcOutput>> {
    if input.end_date < input.start_date {
        return Err(CalcError::DateError(
            "종료일은 시작일보다 이후여야 합니다.".to_string(),
        ));
    }

    let total_days = (input.end_date - input.start_date).num_days();
    let days = Decimal::from(total_days);

    let output = DateCalcOutput {
        total_days,
        total_months: round_to(days / DAYS_PER_MONTH, 1),
        total_years: round_to(days / DAYS_PER_YEAR, 2),
    };

    Ok(with_metadata(
        "Calendar days; months at 30.44 days, years at 365.25 days",
        &serde_json::json!({}),
        Vec::new(),
        output,
    ))
}

/// Parses a `YYYY-MM-DD` string with the Korean messages shown to users.
pub fn parse_calendar_date(field: &str, value: &str) -> CalcResult<NaiveDate> {
    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(CalcError::invalid(field, "날짜 형식은 YYYY-MM-DD 이어야 합니다."));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CalcError::invalid(field, "유효하지 않은 날짜입니다."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_leap_year_span() {
        let r = calculate_date_diff(&DateCalcInput {
            start_date: date("2024-01-01"),
            end_date: date("2025-01-01"),
        })
        .unwrap()
        .result;
        assert_eq!(r.total_days, 366);
        assert_eq!(r.total_months, dec!(12));
        assert_eq!(r.total_years, dec!(1));
    }

    #[test]
    fn test_short_span() {
        let r = calculate_date_diff(&DateCalcInput {
            start_date: date("2020-03-01"),
            end_date: date("2020-03-31"),
        })
        .unwrap()
        .result;
        assert_eq!(r.total_days, 30);
        assert_eq!(r.total_months, dec!(1));
        assert_eq!(r.total_years, dec!(0.08));
    }

    #[test]
    fn test_same_day_is_zero() {
        let d = date("2023-06-15");
        let r = calculate_date_diff(&DateCalcInput {
            start_date: d,
            end_date: d,
        })
        .unwrap()
        .result;
        assert_eq!(r.total_days, 0);
    }

    #[test]
    fn test_reversed_dates() {
        let err = calculate_date_diff(&DateCalcInput {
            start_date: date("2024-02-01"),
            end_date: date("2024-01-01"),
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::DateError(_)));
        assert_eq!(err.reason(), "종료일은 시작일보다 이후여야 합니다.");
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(parse_calendar_date("d", "2024-02-29").unwrap(), date("2024-02-29"));
        assert_eq!(
            parse_calendar_date("d", "2024-2-29").unwrap_err().reason(),
            "날짜 형식은 YYYY-MM-DD 이어야 합니다."
        );
        assert_eq!(
            parse_calendar_date("d", "2023-02-29").unwrap_err().reason(),
            "유효하지 않은 날짜입니다."
        );
    }
}
