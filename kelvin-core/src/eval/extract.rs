//! End-of-episode metric extraction.
use crate::base::{Info, InfoValue, EPISODE_METRICS_KEY};
use crate::record::EPISODE_REWARD_KEY;
use std::collections::BTreeMap;

/// Normalizes a terminal info map into episode KPI values.
///
/// When the environment reported a KPI map under [`EPISODE_METRICS_KEY`],
/// that map is returned verbatim, as a copy the caller owns. Otherwise the
/// result is a single-entry map carrying `episode_reward` (NaN when no reward
/// was accumulated), so downstream aggregation always has at least one metric
/// name to work with.
///
/// Pure: no side effects, and the same info map always yields the same
/// result.
pub fn extract_metrics(info: &Info, episode_reward: Option<f64>) -> BTreeMap<String, f64> {
    match info.get(EPISODE_METRICS_KEY) {
        Some(InfoValue::Map(kpis)) => kpis.clone(),
        _ => {
            let mut values = BTreeMap::new();
            values.insert(
                EPISODE_REWARD_KEY.to_string(),
                episode_reward.unwrap_or(f64::NAN),
            );
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_with_kpis() -> Info {
        let mut kpis = BTreeMap::new();
        kpis.insert("energy_kwh".to_string(), 41.5);
        kpis.insert("comfort_violation_hours".to_string(), 2.25);
        let mut info = Info::empty();
        info.insert_scalar("indoor_temp_c", 21.0);
        info.insert_map(EPISODE_METRICS_KEY, kpis);
        info
    }

    #[test]
    fn nested_kpi_map_is_returned_verbatim() {
        let info = info_with_kpis();
        let values = extract_metrics(&info, Some(-10.0));
        assert_eq!(values.len(), 2);
        assert_eq!(values["energy_kwh"], 41.5);
        assert_eq!(values["comfort_violation_hours"], 2.25);
    }

    #[test]
    fn falls_back_to_episode_reward() {
        let mut info = Info::empty();
        info.insert_scalar("indoor_temp_c", 21.0);
        let values = extract_metrics(&info, Some(-10.0));
        assert_eq!(values.len(), 1);
        assert_eq!(values[EPISODE_REWARD_KEY], -10.0);
    }

    #[test]
    fn missing_reward_becomes_nan() {
        let values = extract_metrics(&Info::empty(), None);
        assert!(values[EPISODE_REWARD_KEY].is_nan());
    }

    #[test]
    fn result_is_a_copy_and_extraction_is_repeatable() {
        let info = info_with_kpis();
        let mut first = extract_metrics(&info, None);
        first.insert("energy_kwh".to_string(), 0.0);
        first.insert("injected".to_string(), 1.0);

        let second = extract_metrics(&info, None);
        assert_eq!(second["energy_kwh"], 41.5);
        assert!(!second.contains_key("injected"));
        assert_eq!(second, extract_metrics(&info, None));
    }
}
