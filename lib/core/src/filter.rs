// Hard filters over raw catalog fields
use crate::RestaurantRecord;

pub trait Filter {
    fn matches(&self, record: &RestaurantRecord) -> bool;
}

/// Filter built from a tree of conditions
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    /// Exact, case-sensitive city match
    CityEquals(String),
    /// `rating >= value`
    MinRating(f64),
    /// `cost <= value`; records without a cost never match
    MaxCost(f64),
    And(Vec<FilterCondition>),
}

impl RecordFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    /// Conjunction of all conditions; an empty list matches everything
    pub fn all(conditions: Vec<FilterCondition>) -> Self {
        Self::new(FilterCondition::And(conditions))
    }

    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    fn matches_condition(condition: &FilterCondition, record: &RestaurantRecord) -> bool {
        match condition {
            FilterCondition::CityEquals(city) => record.city == *city,
            FilterCondition::MinRating(min) => record.rating >= *min,
            FilterCondition::MaxCost(max) => {
                record.cost.map(|cost| cost <= *max).unwrap_or(false)
            }
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, record))
            }
        }
    }
}

impl Filter for RecordFilter {
    fn matches(&self, record: &RestaurantRecord) -> bool {
        Self::matches_condition(&self.condition, record)
    }
}

/// Matches every record
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Filter for AcceptAll {
    fn matches(&self, _record: &RestaurantRecord) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, rating: f64, cost: Option<f64>) -> RestaurantRecord {
        let r = RestaurantRecord::new("R", city, "Chinese", rating);
        match cost {
            Some(c) => r.with_cost(c),
            None => r,
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = RecordFilter::all(vec![
            FilterCondition::MinRating(4.0),
            FilterCondition::MaxCost(300.0),
        ]);
        assert!(filter.matches(&record("Pune", 4.0, Some(300.0))));
        assert!(!filter.matches(&record("Pune", 3.9, Some(300.0))));
        assert!(!filter.matches(&record("Pune", 4.0, Some(300.5))));
    }

    #[test]
    fn test_city_is_case_sensitive() {
        let filter = RecordFilter::new(FilterCondition::CityEquals("Pune".to_string()));
        assert!(filter.matches(&record("Pune", 4.0, None)));
        assert!(!filter.matches(&record("pune", 4.0, None)));
        assert!(!filter.matches(&record("Pune ", 4.0, None)));
    }

    #[test]
    fn test_missing_cost_fails_budget() {
        let filter = RecordFilter::new(FilterCondition::MaxCost(1000.0));
        assert!(!filter.matches(&record("Pune", 4.0, None)));
    }

    #[test]
    fn test_empty_and_matches_all() {
        let filter = RecordFilter::all(Vec::new());
        assert!(filter.matches(&record("Anywhere", 1.0, None)));
        assert!(AcceptAll.matches(&record("Anywhere", 1.0, None)));
    }
}
