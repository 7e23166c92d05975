//! Typed view of the planner's saved inputs
//!
//! The store itself is schema-free. This is the shape the planner UI
//! writes; unknown fields are carried in `extra` so nothing is lost when an
//! older build loads a newer record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Days used for monthly estimates
pub const DAYS_PER_MONTH: f64 = 30.0;

/// An appliance line in the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appliance {
    pub name: String,
    /// Power draw in watts
    pub watts: f64,
    pub hours_per_day: f64,
}

impl Appliance {
    pub fn monthly_kwh(&self) -> f64 {
        self.watts * self.hours_per_day * DAYS_PER_MONTH / 1000.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerInputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Tariff in currency per kWh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub appliances: Vec<Appliance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlannerInputs {
    /// Total monthly consumption over all appliances
    pub fn monthly_kwh(&self) -> f64 {
        self.appliances.iter().map(Appliance::monthly_kwh).sum()
    }

    /// Estimated bill, if a rate is set
    pub fn estimated_cost(&self) -> Option<f64> {
        self.rate_per_kwh.map(|rate| self.monthly_kwh() * rate)
    }

    /// Budget minus estimated cost (negative when over budget)
    pub fn budget_remaining(&self) -> Option<f64> {
        Some(self.budget? - self.estimated_cost()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::StorageStore;
    use crate::platform::{FixedClock, MemoryBackend};
    use serde_json::json;

    fn sample() -> PlannerInputs {
        PlannerInputs {
            budget: Some(100.0),
            month: Some("June".into()),
            rate_per_kwh: Some(0.2),
            appliances: vec![
                Appliance {
                    name: "Fridge".into(),
                    watts: 150.0,
                    hours_per_day: 24.0,
                },
                Appliance {
                    name: "Heater".into(),
                    watts: 2000.0,
                    hours_per_day: 2.0,
                },
            ],
            extra: Map::new(),
        }
    }

    #[test]
    fn test_estimates() {
        let inputs = sample();
        // 108 kWh + 120 kWh
        assert!((inputs.monthly_kwh() - 228.0).abs() < 1e-9);
        assert!((inputs.estimated_cost().unwrap() - 45.6).abs() < 1e-9);
        assert!((inputs.budget_remaining().unwrap() - 54.4).abs() < 1e-9);

        let no_rate = PlannerInputs {
            rate_per_kwh: None,
            ..sample()
        };
        assert_eq!(no_rate.estimated_cost(), None);
        assert_eq!(no_rate.budget_remaining(), None);
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["ratePerKwh"], json!(0.2));
        assert_eq!(value["appliances"][1]["hoursPerDay"], json!(2.0));
        assert!(value.get("extra").is_none());

        let empty = serde_json::to_value(PlannerInputs::default()).unwrap();
        assert_eq!(empty, json!({}));
    }

    #[test]
    fn test_unknown_fields_survive_store() {
        let backend = MemoryBackend::new();
        let store = StorageStore::new(&backend).with_clock(FixedClock::new("2024-06-01T00:00:00.000Z"));
        let mut data = serde_json::to_value(sample()).unwrap();
        data["theme"] = json!("dark");
        let Value::Object(data) = data else {
            panic!("not an object")
        };
        assert!(store.save(&data));

        let inputs: PlannerInputs = store.load_as().unwrap();
        assert_eq!(inputs.extra.get("theme"), Some(&json!("dark")));
        assert!(!inputs.extra.contains_key("lastSaved"));

        assert!(store.save_as(&inputs));
        assert_eq!(store.load(), Some(data));
    }
}
