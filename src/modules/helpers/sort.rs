use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use snafu::OptionExt;

use crate::errors::{CustomResult, Error, UnparsableDateSnafu};
use crate::modules::models::lap::Lap;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Driver,
    Car,
    Track,
    LapTimeMs,
    LapCount,
    Cuts,
    Valid,
    Date,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "driver" => Ok(SortField::Driver),
            "car" => Ok(SortField::Car),
            "track" => Ok(SortField::Track),
            "lap_time_ms" => Ok(SortField::LapTimeMs),
            "lap_count" => Ok(SortField::LapCount),
            "cuts" => Ok(SortField::Cuts),
            "valid" => Ok(SortField::Valid),
            "date" => Ok(SortField::Date),
            _ => Err(Error::InvalidSelectorError { selector: "sort", value: value.to_string() }),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" | "1" => Ok(SortDirection::Asc),
            "desc" | "-1" => Ok(SortDirection::Desc),
            _ => Err(Error::InvalidSelectorError { selector: "direction", value: value.to_string() }),
        }
    }
}

/// the column a table is sorted on, `field` is `None` until one is picked
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    /// # pick a column
    /// picking the current column again flips the direction, a new column
    /// starts out ascending
    pub fn select(self, field: SortField) -> SortState {
        if self.field == Some(field) {
            SortState {
                field: self.field,
                direction: self.direction.toggle(),
            }
        } else {
            SortState {
                field: Some(field),
                direction: SortDirection::Asc,
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Number(u64),
    Text(&'a str),
    Flag(bool),
    Time(DateTime<Utc>),
}

/// # parse a lap date
/// accepts rfc 3339 and naive timestamps, which are read as utc
pub fn parse_date(value: &str) -> CustomResult<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .context(UnparsableDateSnafu { value })?;

    Ok(Utc.from_utc_datetime(&naive))
}

fn sort_key(field: SortField, lap: &Lap) -> CustomResult<SortKey<'_>> {
    let key = match field {
        SortField::Driver => SortKey::Text(&lap.driver),
        SortField::Car => SortKey::Text(&lap.car_name),
        SortField::Track => SortKey::Text(&lap.track_name),
        SortField::LapTimeMs => SortKey::Number(lap.lap_time_ms.unwrap_or(0)),
        SortField::LapCount => SortKey::Number(lap.lap_count.map(u64::from).unwrap_or(0)),
        SortField::Cuts => SortKey::Number(u64::from(lap.cuts)),
        SortField::Valid => SortKey::Flag(lap.valid),
        SortField::Date => SortKey::Time(parse_date(&lap.date)?),
    };
    Ok(key)
}

/// # sort laps
/// the sort is stable, laps with equal keys keep their order in both
/// directions. text is compared case sensitive. when a single date can not
/// be parsed the whole sort fails and nothing is reordered.
///
/// ## Arguments
/// * `laps` - the laps to sort
/// * `state` - the column and direction, without a column the laps are returned as is
///
/// ## Returns
/// * `Vec<&Lap>` - the sorted laps
pub fn sort_laps<'a>(laps: Vec<&'a Lap>, state: &SortState) -> CustomResult<Vec<&'a Lap>> {
    let Some(field) = state.field else {
        return Ok(laps);
    };

    let mut keyed = laps
        .into_iter()
        .map(|lap| -> CustomResult<(SortKey, &Lap)> { Ok((sort_key(field, lap)?, lap)) })
        .collect::<CustomResult<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| state.direction.apply(a.cmp(b)));

    Ok(keyed.into_iter().map(|(_, lap)| lap).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::models::lap::tests::lap;

    fn laps() -> Vec<Lap> {
        let mut laps = vec![
            lap("bert", "T1", Some(90000), true, &[]),
            lap("Anna", "T1", None, false, &[]),
            lap("Carl", "T2", Some(88000), true, &[]),
        ];
        laps[0].date = "2024-05-02T10:00:00Z".to_string();
        laps[1].date = "2024-05-01T10:00:00+02:00".to_string();
        laps[2].date = "2024-05-01 09:00:00".to_string();
        laps[0].cuts = 2;
        laps[2].cuts = 1;
        laps
    }

    fn sorted(laps: &[Lap], state: SortState) -> Vec<String> {
        sort_laps(laps.iter().collect(), &state)
            .unwrap()
            .into_iter()
            .map(|lap| lap.driver.clone())
            .collect()
    }

    fn ascending(field: SortField) -> SortState {
        SortState::default().select(field)
    }

    #[test]
    fn test_absent_lap_time_sorts_as_zero() {
        assert_eq!(sorted(&laps(), ascending(SortField::LapTimeMs)), vec!["Anna", "Carl", "bert"]);
    }

    #[test]
    fn test_text_is_case_sensitive() {
        assert_eq!(sorted(&laps(), ascending(SortField::Driver)), vec!["Anna", "Carl", "bert"]);
    }

    #[test]
    fn test_dates_sort_chronologically() {
        // 08:00 utc, 09:00 utc, next day
        assert_eq!(sorted(&laps(), ascending(SortField::Date)), vec!["Anna", "Carl", "bert"]);
    }

    #[test]
    fn test_cuts() {
        assert_eq!(sorted(&laps(), ascending(SortField::Cuts)), vec!["Anna", "Carl", "bert"]);
    }

    #[test]
    fn test_selecting_twice_reverses() {
        let laps = laps();
        let first = ascending(SortField::LapTimeMs);
        let second = first.select(SortField::LapTimeMs);

        assert_eq!(second.direction, SortDirection::Desc);
        let mut reversed = sorted(&laps, first);
        reversed.reverse();
        assert_eq!(sorted(&laps, second), reversed);
    }

    #[test]
    fn test_new_field_resets_to_ascending() {
        let state = ascending(SortField::Date).select(SortField::Date).select(SortField::Driver);
        assert_eq!(state, SortState { field: Some(SortField::Driver), direction: SortDirection::Asc });
    }

    #[test]
    fn test_ties_keep_input_order() {
        let laps = vec![
            lap("A", "T1", Some(1), true, &[]),
            lap("B", "T1", Some(1), true, &[]),
            lap("C", "T1", Some(0), false, &[]),
        ];
        let valid_first = SortState { field: Some(SortField::Valid), direction: SortDirection::Desc };

        assert_eq!(sorted(&laps, valid_first), vec!["A", "B", "C"]);
        assert_eq!(sorted(&laps, ascending(SortField::Valid)), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_no_field_keeps_order() {
        assert_eq!(sorted(&laps(), SortState::default()), vec!["bert", "Anna", "Carl"]);
    }

    #[test]
    fn test_unparsable_date_fails() {
        let mut laps = laps();
        laps[1].date = "yesterday".to_string();

        let result = sort_laps(laps.iter().collect(), &ascending(SortField::Date));
        assert!(matches!(result, Err(Error::UnparsableDateError { value }) if value == "yesterday"));

        // other columns do not look at the date
        assert!(sort_laps(laps.iter().collect(), &ascending(SortField::Driver)).is_ok());
    }

    #[test]
    fn test_parse_date_forms() {
        assert!(parse_date("2024-05-01T12:00:00.123Z").is_ok());
        assert!(parse_date("2024-05-01T12:00:00").is_ok());
        assert!(parse_date("2024-05-01").is_ok());
        assert!(parse_date("01/05/2024").is_err());
    }

    #[test]
    fn test_parsing_fields_and_directions() {
        assert_eq!("lap_time_ms".parse::<SortField>().unwrap(), SortField::LapTimeMs);
        assert_eq!("-1".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("speed".parse::<SortField>().is_err());
    }
}
