use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::Error;
use crate::modules::models::lap::Lap;

const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackSelector {
    #[default]
    All,
    Track(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValiditySelector {
    #[default]
    All,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DriverSelector {
    #[default]
    All,
    Driver(String),
}

impl TrackSelector {
    fn matches(&self, lap: &Lap) -> bool {
        match self {
            TrackSelector::All => true,
            TrackSelector::Track(track_id) => lap.track_id == *track_id,
        }
    }
}

impl ValiditySelector {
    fn matches(&self, lap: &Lap) -> bool {
        match self {
            ValiditySelector::All => true,
            ValiditySelector::Valid => lap.valid,
            ValiditySelector::Invalid => !lap.valid,
        }
    }
}

impl DriverSelector {
    fn matches(&self, lap: &Lap) -> bool {
        match self {
            DriverSelector::All => true,
            DriverSelector::Driver(driver) => lap.driver == *driver,
        }
    }
}

impl FromStr for TrackSelector {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err(Error::InvalidSelectorError { selector: "track", value: value.to_string() }),
            ALL => Ok(TrackSelector::All),
            track_id => Ok(TrackSelector::Track(track_id.to_string())),
        }
    }
}

impl FromStr for ValiditySelector {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            ALL => Ok(ValiditySelector::All),
            "valid" => Ok(ValiditySelector::Valid),
            "invalid" => Ok(ValiditySelector::Invalid),
            _ => Err(Error::InvalidSelectorError { selector: "validity", value: value.to_string() }),
        }
    }
}

impl FromStr for DriverSelector {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err(Error::InvalidSelectorError { selector: "driver", value: value.to_string() }),
            ALL => Ok(DriverSelector::All),
            driver => Ok(DriverSelector::Driver(driver.to_string())),
        }
    }
}

impl fmt::Display for TrackSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackSelector::All => write!(f, "{ALL}"),
            TrackSelector::Track(track_id) => write!(f, "{track_id}"),
        }
    }
}

impl fmt::Display for ValiditySelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValiditySelector::All => write!(f, "{ALL}"),
            ValiditySelector::Valid => write!(f, "valid"),
            ValiditySelector::Invalid => write!(f, "invalid"),
        }
    }
}

impl fmt::Display for DriverSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DriverSelector::All => write!(f, "{ALL}"),
            DriverSelector::Driver(driver) => write!(f, "{driver}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub track: TrackSelector,
    pub validity: ValiditySelector,
    pub driver: DriverSelector,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    pub laps: Vec<&'a Lap>,
    /// drivers left after the track and validity filters
    pub driver_options: Vec<String>,
    /// the selection that was applied, with the driver reset if it was no longer an option
    pub selection: FilterSelection,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TrackOption {
    pub id: String,
    pub name: String,
}

/// # the sorted, de-duplicated drivers of a set of laps
pub fn driver_options(laps: &[&Lap]) -> Vec<String> {
    laps.iter()
        .map(|lap| lap.driver.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// # the sorted, de-duplicated tracks of a set of laps
pub fn track_options(laps: &[Lap]) -> Vec<TrackOption> {
    laps.iter()
        .map(|lap| (lap.track_id.as_str(), lap.track_name.as_str()))
        .collect::<BTreeSet<(&str, &str)>>()
        .into_iter()
        .map(|(id, name)| TrackOption {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// # apply the filters
/// the filters run in a fixed order: track, validity, then driver.
/// the driver options are taken from what is left after the track and
/// validity filters, so a driver without laps there is not offered. when the
/// selected driver is not one of those options the selection goes back to all.
///
/// ## Arguments
/// * `laps` - all laps of the snapshot
/// * `selection` - the requested selection
///
/// ## Returns
/// * `FilterOutcome` - the remaining laps, the driver options and the applied selection
pub fn apply_filters<'a>(laps: &'a [Lap], selection: &FilterSelection) -> FilterOutcome<'a> {
    let narrowed: Vec<&Lap> = laps
        .iter()
        .filter(|lap| selection.track.matches(lap))
        .filter(|lap| selection.validity.matches(lap))
        .collect();

    let driver_options = driver_options(&narrowed);

    let driver = match &selection.driver {
        DriverSelector::Driver(driver) if !driver_options.contains(driver) => DriverSelector::All,
        driver => driver.clone(),
    };

    let laps = narrowed
        .into_iter()
        .filter(|lap| driver.matches(lap))
        .collect();

    FilterOutcome {
        laps,
        driver_options,
        selection: FilterSelection {
            track: selection.track.clone(),
            validity: selection.validity,
            driver,
        },
    }
}
