use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::record::{AssetRecord, Snapshot};

#[derive(Clone, Debug, Deserialize)]
struct RawAssetEntry {
    #[serde(default)]
    risk: Option<f32>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default, rename = "moralisLink")]
    moralis_link: Option<String>,
    #[serde(default)]
    warnings: Option<Vec<String>>,
    #[serde(default, rename = "1mChange")]
    change_1m: Option<f32>,
    #[serde(default, rename = "2wChange")]
    change_2w: Option<f32>,
    #[serde(default, rename = "3mChange")]
    change_3m: Option<f32>,
    #[serde(default, rename = "bubbleSize")]
    bubble_size: Option<f32>,
}

/// The feed emits bare `NaN` tokens for unknown numbers, which is not
/// valid JSON. They are rewritten to `null` before parsing.
fn sanitize_numeric_tokens(raw: &str) -> String {
    raw.replace("NaN", "null")
}

pub(super) fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    let sanitized = sanitize_numeric_tokens(raw);
    let parsed: Value =
        serde_json::from_str(&sanitized).context("invalid JSON from risk feed")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("unexpected JSON type from risk feed; expected an object"))?;

    let mut records = Vec::with_capacity(object.len());
    for (symbol, value) in object {
        if symbol.is_empty() {
            continue;
        }

        let Ok(entry) = RawAssetEntry::deserialize(value) else {
            continue;
        };

        records.push(AssetRecord {
            symbol: symbol.clone(),
            risk: entry.risk.unwrap_or(0.0),
            price: entry.price.unwrap_or(0.0),
            volume: entry.volume.unwrap_or(0.0),
            bubble_size: entry.bubble_size,
            icon: entry.icon,
            moralis_link: entry.moralis_link,
            warnings: entry.warnings.unwrap_or_default(),
            change_1m: entry.change_1m,
            change_2w: entry.change_2w,
            change_3m: entry.change_3m,
        });
    }

    if records.is_empty() {
        return Err(anyhow!("risk feed snapshot contained no asset entries"));
    }

    records.sort_by(|a, b| {
        b.volume
            .total_cmp(&a.volume)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    Ok(Snapshot { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_tokens_become_null_and_default() {
        let raw = r#"{"BTC": {"risk": NaN, "price": 64000.5, "volume": NaN}}"#;
        let snapshot = parse_snapshot(raw).unwrap();

        let btc = snapshot.get("BTC").unwrap();
        assert_eq!(btc.risk, 0.0);
        assert_eq!(btc.price, 64000.5);
        assert_eq!(btc.volume, 0.0);
    }

    #[test]
    fn absent_fields_take_documented_defaults() {
        let raw = r#"{"ETH": {"price": 3100.0}}"#;
        let snapshot = parse_snapshot(raw).unwrap();

        let eth = snapshot.get("ETH").unwrap();
        assert_eq!(eth.risk, 0.0);
        assert_eq!(eth.volume, 0.0);
        assert!(eth.warnings.is_empty());
        assert!(eth.bubble_size.is_none());
        assert!(eth.change_1m.is_none());
    }

    #[test]
    fn records_are_ordered_by_descending_volume() {
        let raw = r#"{
            "AAA": {"risk": 10, "volume": 5.0},
            "BBB": {"risk": 20, "volume": 50.0},
            "CCC": {"risk": 30, "volume": 20.0}
        }"#;
        let snapshot = parse_snapshot(raw).unwrap();

        let symbols = snapshot
            .records
            .iter()
            .map(|record| record.symbol.as_str())
            .collect::<Vec<_>>();
        assert_eq!(symbols, ["BBB", "CCC", "AAA"]);
    }

    #[test]
    fn warnings_survive_normalization() {
        let raw = r#"{"XYZ": {"risk": 70, "warnings": ["Cycle is falling fast"]}}"#;
        let snapshot = parse_snapshot(raw).unwrap();
        assert_eq!(
            snapshot.get("XYZ").unwrap().warnings,
            vec!["Cycle is falling fast".to_string()]
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(parse_snapshot("[1, 2, 3]").is_err());
        assert!(parse_snapshot("not json").is_err());
    }

    #[test]
    fn empty_object_is_rejected() {
        assert!(parse_snapshot("{}").is_err());
    }
}
