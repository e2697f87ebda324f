use serde_json::{Map, Value};

/// The telemetry source writes 24 hours into a sector it did not record.
pub const NOT_RECORDED_MS: u64 = 86_400_000;

/// `s0` through `s9`.
pub const MAX_SECTORS: usize = 10;

/// # raw sector fields of a lap record
/// one slot per `sN` field. the outer option tells if the field was present
/// at all, the inner one if it carried a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorFields {
    slots: [Option<Option<u64>>; MAX_SECTORS],
}

impl SectorFields {
    /// # read the sector fields out of the loose fields of a record
    /// fields that are neither null nor a non-negative integer are rejected
    ///
    /// ## Arguments
    /// * `fields` - the record fields that were not mapped onto a named member
    ///
    /// ## Returns
    /// * `Result<SectorFields, String>` - the sector fields, or the reason they are unusable
    pub fn from_json(fields: &Map<String, Value>) -> Result<SectorFields, String> {
        let mut sector_fields = SectorFields::default();

        for index in 0..MAX_SECTORS {
            let key = format!("s{index}");
            let slot = match fields.get(&key) {
                None => None,
                Some(Value::Null) => Some(None),
                Some(value) => match value.as_u64() {
                    Some(ms) => Some(Some(ms)),
                    None => return Err(format!("sector field {key} is not a non-negative integer: {value}")),
                },
            };
            sector_fields.slots[index] = slot;
        }

        Ok(sector_fields)
    }

    /// mark field `index` as present with the given value
    pub fn with(mut self, index: usize, value: Option<u64>) -> SectorFields {
        if index < MAX_SECTORS {
            self.slots[index] = Some(value);
        }
        self
    }
}

/// # extract the sectors of a lap
/// absent fields are skipped, the sentinel becomes `None` and the trailing
/// run of `None` values is stripped.
pub fn extract_sectors(fields: &SectorFields) -> Vec<Option<u64>> {
    let sectors = fields
        .slots
        .iter()
        .flatten()
        .copied()
        .map(|value| value.filter(|ms| *ms != NOT_RECORDED_MS))
        .collect();

    trim_trailing_absent(sectors)
}

pub fn trim_trailing_absent(mut sectors: Vec<Option<u64>>) -> Vec<Option<u64>> {
    while let Some(None) = sectors.last() {
        sectors.pop();
    }
    sectors
}
