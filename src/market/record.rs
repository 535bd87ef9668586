/// One asset from a snapshot, fully normalized: numeric fields that the
/// feed may omit or null out are already defaulted, so downstream code
/// never re-checks optionality.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetRecord {
    pub symbol: String,
    /// Risk score in [0, 100]; absent in the feed means 0.
    pub risk: f32,
    pub price: f64,
    pub volume: f64,
    /// Magnitude factor driving bubble radius.
    pub bubble_size: Option<f32>,
    pub icon: Option<String>,
    pub moralis_link: Option<String>,
    pub warnings: Vec<String>,
    pub change_1m: Option<f32>,
    pub change_2w: Option<f32>,
    pub change_3m: Option<f32>,
}

/// One complete fetch of the risk feed, ordered by descending volume.
/// Symbols are unique within a snapshot but carry no identity across
/// refreshes.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub records: Vec<AssetRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, symbol: &str) -> Option<&AssetRecord> {
        self.records.iter().find(|record| record.symbol == symbol)
    }
}
