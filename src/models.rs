use serde::{Deserialize, Serialize};
use std::fmt;

/// Province an insured party is registered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Province {
    #[serde(rename = "Province_A")]
    A,
    #[serde(rename = "Province_B")]
    B,
    #[serde(rename = "Province_C")]
    C,
}

impl Province {
    /// Draw order used by the generator.
    pub const ALL: [Province; 3] = [Province::A, Province::B, Province::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Province::A => "Province_A",
            Province::B => "Province_B",
            Province::C => "Province_C",
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender of the insured party
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Draw order used by the generator.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single synthetic policy holder and whether they filed a claim.
///
/// Column names match the CSV header `Province,Gender,Claimed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(rename = "Province")]
    pub province: Province,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Claimed", with = "claimed_flag")]
    pub claimed: bool,
}

/// `claimed` travels as `0` / `1` on disk.
mod claimed_flag {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::custom(format!(
                "claimed flag must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

/// Column of a [`ClaimTable`] that can be cross-tabulated or partitioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Province,
    Gender,
    Claimed,
}

impl Field {
    /// Header name of the column.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Province => "Province",
            Field::Gender => "Gender",
            Field::Claimed => "Claimed",
        }
    }

    /// Categorical label of this column for `record`.
    pub fn label(&self, record: &ClaimRecord) -> &'static str {
        match self {
            Field::Province => record.province.as_str(),
            Field::Gender => record.gender.as_str(),
            Field::Claimed => {
                if record.claimed {
                    "1"
                } else {
                    "0"
                }
            }
        }
    }
}

/// Ordered, immutable collection of claim records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimTable {
    records: Vec<ClaimRecord>,
}

impl ClaimTable {
    pub fn new(records: Vec<ClaimRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ClaimRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClaimRecord> {
        self.records.iter()
    }

    /// Fraction of records with a filed claim. NaN for an empty table.
    pub fn claim_rate(&self) -> f64 {
        let claims = self.records.iter().filter(|r| r.claimed).count();
        claims as f64 / self.records.len() as f64
    }
}

impl FromIterator<ClaimRecord> for ClaimTable {
    fn from_iter<I: IntoIterator<Item = ClaimRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ClaimTable {
    type Item = &'a ClaimRecord;
    type IntoIter = std::slice::Iter<'a, ClaimRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
