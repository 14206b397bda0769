use dishx_core::{Catalog, CuisineSet, Filter, RestaurantRecord};
use dishx_schema::{FeatureEncoder, FeatureRecord};
use dishx_similarity::{CatalogIndex, Preference, QueryBuilder, Ranker};
use proptest::prelude::*;

const CITIES: [&str; 4] = ["Pune", "Delhi", "Goa", "Mumbai"];
const CUISINES: [&str; 5] = ["Chinese", "North Indian", "Italian", "Thai", "Cafe"];

fn record_strategy() -> impl Strategy<Value = RestaurantRecord> {
    (
        0..CITIES.len(),
        proptest::sample::subsequence(CUISINES.to_vec(), 1..=3),
        1.0f64..5.0,
        0.0f64..2000.0,
        100.0f64..2000.0,
    )
        .prop_map(|(city, tags, rating, votes, cost)| {
            RestaurantRecord::new("Place", CITIES[city], tags.join(", "), rating)
                .with_rating_count(votes.round())
                .with_cost(cost.round())
        })
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    proptest::collection::vec(record_strategy(), 1..40)
        .prop_map(|records| Catalog::from_records(records).unwrap())
}

fn preference_strategy() -> impl Strategy<Value = Preference> {
    (
        prop_oneof![
            (0..CITIES.len()).prop_map(|i| CITIES[i].to_string()),
            Just("Atlantis".to_string()),
        ],
        prop_oneof![
            (0..CUISINES.len()).prop_map(|i| CUISINES[i].to_string()),
            Just("Martian|Chinese".to_string()),
            Just("Klingon".to_string()),
        ],
        0.0f64..5.0,
        0.0f64..2500.0,
    )
        .prop_map(|(city, cuisine, min_rating, max_budget)| Preference {
            city,
            cuisine,
            min_rating,
            max_budget,
        })
}

proptest! {
    #[test]
    fn encoding_is_deterministic(catalog in catalog_strategy()) {
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        for record in catalog.records() {
            let first = encoder.encode_row(record).unwrap();
            let second = encoder.encode_row(record).unwrap();
            let first_bits: Vec<u32> = first.as_slice().iter().map(|v| v.to_bits()).collect();
            let second_bits: Vec<u32> = second.as_slice().iter().map(|v| v.to_bits()).collect();
            prop_assert_eq!(first_bits, second_bits);
        }
    }

    #[test]
    fn query_encoding_is_deterministic(catalog in catalog_strategy(), pref in preference_strategy()) {
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let first = QueryBuilder::new(&catalog).build(&pref).unwrap();
        let second = QueryBuilder::new(&catalog).build(&pref).unwrap();
        prop_assert_eq!(&first.record, &second.record);

        let first_bits: Vec<u32> = encoder
            .encode(&first.record)
            .unwrap()
            .as_slice()
            .iter()
            .map(|v| v.to_bits())
            .collect();
        let second_bits: Vec<u32> = encoder
            .encode(&second.record)
            .unwrap()
            .as_slice()
            .iter()
            .map(|v| v.to_bits())
            .collect();
        prop_assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn extreme_budgets_never_produce_nan(catalog in catalog_strategy(), exponent in 0i32..308) {
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let index = CatalogIndex::build(&catalog, &encoder).unwrap();
        let pref = Preference {
            city: CITIES[0].to_string(),
            cuisine: CUISINES[0].to_string(),
            min_rating: 0.0,
            max_budget: 10f64.powi(exponent),
        };
        let query = QueryBuilder::new(&catalog).build(&pref).unwrap();
        let query_encoded = encoder.encode(&query.record).unwrap();
        let ranking = Ranker::default()
            .rank(&catalog, &index, &query_encoded, &query.filter)
            .unwrap();
        for result in &ranking.results {
            prop_assert!(result.score.is_finite());
        }
    }

    #[test]
    fn every_vector_has_schema_width(catalog in catalog_strategy(), pref in preference_strategy()) {
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let index = CatalogIndex::build(&catalog, &encoder).unwrap();
        let width = encoder.schema().width();

        prop_assert_eq!(index.width(), width);
        for row in index.rows() {
            prop_assert_eq!(row.dim(), width);
        }

        let query = QueryBuilder::new(&catalog).build(&pref).unwrap();
        prop_assert_eq!(encoder.encode(&query.record).unwrap().dim(), width);
    }

    #[test]
    fn unknown_categories_encode_to_zero(catalog in catalog_strategy()) {
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let query = FeatureRecord {
            city: "Atlantis".to_string(),
            cuisines: CuisineSet::parse("Martian/Klingon"),
            ..FeatureRecord::default()
        };
        let encoded = encoder.encode(&query).unwrap();
        let schema = encoder.schema();
        prop_assert!(encoded.block(schema.city_range()).iter().all(|v| *v == 0.0));
        prop_assert!(encoded.block(schema.cuisine_range()).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn results_pass_filters_in_order(
        catalog in catalog_strategy(),
        pref in preference_strategy(),
        top_k in 1usize..10,
    ) {
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let index = CatalogIndex::build(&catalog, &encoder).unwrap();
        let query = QueryBuilder::new(&catalog).build(&pref).unwrap();
        let query_encoded = encoder.encode(&query.record).unwrap();

        let ranking = Ranker::new(top_k)
            .rank(&catalog, &index, &query_encoded, &query.filter)
            .unwrap();

        for result in &ranking.results {
            let record = catalog.get(result.row).unwrap();
            prop_assert!(record.rating >= pref.min_rating);
            prop_assert!(record.cost.unwrap() <= pref.max_budget);
            prop_assert_eq!(&record.city, &pref.city);
        }
        for pair in ranking.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn result_count_is_bounded_by_top_k(
        catalog in catalog_strategy(),
        pref in preference_strategy(),
        top_k in 0usize..10,
    ) {
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let index = CatalogIndex::build(&catalog, &encoder).unwrap();
        let query = QueryBuilder::new(&catalog).build(&pref).unwrap();
        let query_encoded = encoder.encode(&query.record).unwrap();

        let ranking = Ranker::new(top_k)
            .rank(&catalog, &index, &query_encoded, &query.filter)
            .unwrap();

        let passing = catalog.records().iter().filter(|r| query.filter.matches(r)).count();
        prop_assert_eq!(ranking.matching, passing);
        prop_assert!(ranking.results.len() <= top_k);
        prop_assert_eq!(ranking.results.len(), top_k.min(passing));
    }
}
