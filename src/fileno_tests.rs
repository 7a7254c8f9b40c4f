use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn collect(years: &[u32], numbers_per_year: u32) -> Vec<Record> {
    FileNumbers::new(DEFAULT_CATEGORY, years.to_vec(), numbers_per_year).collect()
}

#[test]
fn single_year_emits_numbers_in_order() {
    let records = collect(&[1981], 3);
    assert_eq!(
        records,
        vec![
            Record {
                category: Category::ConAgRc,
                year: 1981,
                number: 1,
                file_no: "CON-AG-RC-1981-1".to_string()
            },
            Record {
                category: Category::ConAgRc,
                year: 1981,
                number: 2,
                file_no: "CON-AG-RC-1981-2".to_string()
            },
            Record {
                category: Category::ConAgRc,
                year: 1981,
                number: 3,
                file_no: "CON-AG-RC-1981-3".to_string()
            },
        ]
    );
}

#[test]
fn years_are_outer_loop() {
    let records = collect(&[1981, 1982], 1);
    let pairs: Vec<(u32, u32)> = records.iter().map(|r| (r.year, r.number)).collect();
    assert_eq!(pairs, vec![(1981, 1), (1982, 1)]);
}

#[test]
fn years_keep_supplied_order() {
    let records = collect(&[2025, 1981], 2);
    let pairs: Vec<(u32, u32)> = records.iter().map(|r| (r.year, r.number)).collect();
    assert_eq!(pairs, vec![(2025, 1), (2025, 2), (1981, 1), (1981, 2)]);
}

#[test]
fn invalid_bounds_produce_empty_sequence() {
    assert!(collect(&[], 10).is_empty());
    assert!(collect(&[1981, 1982], 0).is_empty());
    assert_eq!(FileNumbers::new(DEFAULT_CATEGORY, vec![], 5).len(), 0);
    assert_eq!(FileNumbers::new(DEFAULT_CATEGORY, vec![1981], 0).len(), 0);
}

#[test]
fn full_scale_boundaries() {
    let years = years_between(DEFAULT_START_YEAR, DEFAULT_END_YEAR);
    assert_eq!(years.len(), 45);
    let records = FileNumbers::new(DEFAULT_CATEGORY, years, DEFAULT_NUMBERS_PER_YEAR);
    assert_eq!(records.len(), 225_000);

    let mut records = records;
    let first = records.next().expect("first record");
    assert_eq!(first.file_no, "CON-AG-RC-1981-1");
    let fifth_thousandth = records.nth(4998).expect("record 5000");
    assert_eq!(fifth_thousandth.file_no, "CON-AG-RC-1981-5000");
    let next_year = records.next().expect("record 5001");
    assert_eq!(next_year.file_no, "CON-AG-RC-1982-1");
    let last = records.last().expect("last record");
    assert_eq!(last.file_no, "CON-AG-RC-2025-5000");
}

#[test]
fn size_hint_tracks_progress() {
    let mut records = FileNumbers::new(DEFAULT_CATEGORY, vec![1990, 1991], 3);
    assert_eq!(records.len(), 6);
    records.next();
    records.next();
    assert_eq!(records.len(), 4);
    records.next();
    assert_eq!(records.len(), 3);
    assert_eq!(records.by_ref().count(), 3);
    assert_eq!(records.len(), 0);
    assert_eq!(records.total(), 6);
}

#[test]
fn clone_restarts_from_same_position() {
    let original = FileNumbers::new(DEFAULT_CATEGORY, vec![2000], 4);
    let first_pass: Vec<Record> = original.clone().collect();
    let second_pass: Vec<Record> = original.collect();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn categories_are_outermost_loop() {
    let records: Vec<Record> =
        FileNumbers::with_categories(vec![Category::Res, Category::ConAg], vec![1990, 1991], 2)
            .collect();
    let ids: Vec<&str> = records.iter().map(|r| r.file_no.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "RES-1990-1",
            "RES-1990-2",
            "RES-1991-1",
            "RES-1991-2",
            "CON-AG-1990-1",
            "CON-AG-1990-2",
            "CON-AG-1991-1",
            "CON-AG-1991-2",
        ]
    );
    assert_eq!(records[4].category, Category::ConAg);
}

#[test]
fn all_categories_yield_unique_identifiers() {
    let records = FileNumbers::with_categories(Category::ALL.to_vec(), vec![1981, 2025], 30);
    assert_eq!(records.len(), 12 * 2 * 30);
    let ids: HashSet<String> = records.map(|r| r.file_no).collect();
    assert_eq!(ids.len(), 12 * 2 * 30);
}

#[test]
fn cap_stops_each_category_mid_year() {
    let records: Vec<Record> =
        FileNumbers::with_categories(vec![Category::Res, Category::Com], vec![1981, 1982], 3)
            .max_per_category(Some(4))
            .collect();
    let pairs: Vec<(Category, u32, u32)> =
        records.iter().map(|r| (r.category, r.year, r.number)).collect();
    assert_eq!(
        pairs,
        vec![
            (Category::Res, 1981, 1),
            (Category::Res, 1981, 2),
            (Category::Res, 1981, 3),
            (Category::Res, 1982, 1),
            (Category::Com, 1981, 1),
            (Category::Com, 1981, 2),
            (Category::Com, 1981, 3),
            (Category::Com, 1982, 1),
        ]
    );
}

#[test]
fn cap_larger_than_range_is_ignored() {
    let capped = FileNumbers::new(Category::Ag, vec![2000], 5).max_per_category(Some(50));
    assert_eq!(capped.per_category(), 5);
    assert_eq!(capped.count(), 5);
}

#[test]
fn size_hint_tracks_progress_across_categories() {
    let mut records =
        FileNumbers::with_categories(vec![Category::Res, Category::Com], vec![2001, 2002], 2)
            .max_per_category(Some(3));
    assert_eq!(records.len(), 6);
    for expected in (0..6).rev() {
        assert!(records.next().is_some());
        assert_eq!(records.len(), expected);
    }
    assert!(records.next().is_none());
    assert_eq!(records.len(), 0);
    assert_eq!(records.total(), 6);
}

#[test]
fn empty_category_list_is_empty_sequence() {
    let records = FileNumbers::with_categories(Vec::new(), vec![1981], 3);
    assert_eq!(records.len(), 0);
    assert_eq!(records.count(), 0);
}

#[test]
fn plain_decimal_rejects_sign_and_padding() {
    assert!(is_plain_decimal("0"));
    assert!(is_plain_decimal("1981"));
    assert!(!is_plain_decimal("+1981"));
    assert!(!is_plain_decimal("02"));
    assert!(!is_plain_decimal(" 1"));
    assert!(!is_plain_decimal(""));
}

#[test]
fn years_between_is_inclusive_and_empty_when_reversed() {
    assert_eq!(years_between(1981, 1983), vec![1981, 1982, 1983]);
    assert_eq!(years_between(2025, 2025), vec![2025]);
    assert!(years_between(2025, 1981).is_empty());
}

#[test]
fn category_prefixes_round_trip_through_from_str() {
    for category in Category::ALL {
        assert_eq!(category.prefix().parse::<Category>(), Ok(category));
        assert_eq!(category.to_string(), category.prefix());
    }
    let err = "CON-XX".parse::<Category>().expect_err("unknown prefix");
    assert!(err.contains("CON-AG-RC"), "{err}");
}

#[test]
fn registry_and_land_use_rules() {
    assert_eq!(Category::Res.registry(1985), Registry::One);
    assert_eq!(Category::Com.registry(1995), Registry::Two);
    assert_eq!(Category::Ag.registry(1990), Registry::One);
    assert_eq!(Category::ConRes.registry(2020), Registry::Three);
    assert_eq!(Category::ConComRc.registry(1985), Registry::Three);
    assert_eq!(Category::ResRc.registry(2000), Registry::Two);
    assert_eq!(Category::AgRc.registry(1975), Registry::Two);

    assert_eq!(Category::ConAgRc.land_use(), LandUse::Agriculture);
    assert_eq!(Category::ComRc.land_use(), LandUse::Commercial);
    assert_eq!(Category::ConRes.land_use(), LandUse::Residential);
    assert_eq!(Registry::Three.as_str(), "Registry 3");
}

#[test]
fn category_serializes_as_prefix() {
    let json = serde_json::to_string(&Category::ConAgRc).expect("serialize");
    assert_eq!(json, "\"CON-AG-RC\"");
    let parsed: Category = serde_json::from_str("\"RES-RC\"").expect("deserialize");
    assert_eq!(parsed, Category::ResRc);
}

#[test]
fn parse_file_no_rejects_malformed_identifiers() {
    assert_eq!(
        parse_file_no("CON-AG-RC-1981-5000"),
        Some((Category::ConAgRc, 1981, 5000))
    );
    assert_eq!(parse_file_no("RES-2001-7"), Some((Category::Res, 2001, 7)));
    assert_eq!(parse_file_no("CON-AG-RC-1981-05"), None);
    assert_eq!(parse_file_no(" CON-AG-RC-1981-5"), None);
    assert_eq!(parse_file_no("CON-AG-RC-1981-5 "), None);
    assert_eq!(parse_file_no("CON-XX-1981-5"), None);
    assert_eq!(parse_file_no("CON-AG-RC-1981"), None);
    assert_eq!(parse_file_no("CON-AG-RC-1981-99999999999"), None);
}

fn distinct_years() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1900u32..2100, 1..6)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn distinct_categories() -> impl Strategy<Value = Vec<Category>> {
    prop::sample::subsequence(Category::ALL.to_vec(), 1..=12).prop_shuffle()
}

proptest! {
    #[test]
    fn capped_categories_emit_min_of_cap_and_range(
        categories in distinct_categories(),
        years in distinct_years(),
        n in 1u32..10,
        cap in 1usize..60,
    ) {
        let records: Vec<Record> =
            FileNumbers::with_categories(categories.clone(), years.clone(), n)
                .max_per_category(Some(cap))
                .collect();
        let per_category = cap.min(years.len() * n as usize);
        prop_assert_eq!(records.len(), categories.len() * per_category);
        for (block, category) in records.chunks(per_category).zip(&categories) {
            prop_assert!(block.iter().all(|r| r.category == *category));
        }
        let unique: HashSet<&str> = records.iter().map(|r| r.file_no.as_str()).collect();
        prop_assert_eq!(unique.len(), records.len());
    }

    #[test]
    fn produces_years_times_numbers_records(years in distinct_years(), n in 1u32..40) {
        let records = collect(&years, n);
        prop_assert_eq!(records.len(), years.len() * n as usize);
    }

    #[test]
    fn identifier_matches_template(years in distinct_years(), n in 1u32..40) {
        for record in collect(&years, n) {
            prop_assert_eq!(
                &record.file_no,
                &format!("CON-AG-RC-{}-{}", record.year, record.number)
            );
            prop_assert_eq!(
                parse_file_no(&record.file_no),
                Some((DEFAULT_CATEGORY, record.year, record.number))
            );
        }
    }

    #[test]
    fn identifiers_are_unique(years in distinct_years(), n in 1u32..40) {
        let records = collect(&years, n);
        let unique: HashSet<&str> = records.iter().map(|r| r.file_no.as_str()).collect();
        prop_assert_eq!(unique.len(), records.len());
    }

    #[test]
    fn each_year_block_is_contiguous(years in distinct_years(), n in 1u32..40) {
        let records = collect(&years, n);
        for (block, year) in records.chunks(n as usize).zip(&years) {
            let numbers: Vec<u32> = block.iter().map(|r| r.number).collect();
            prop_assert_eq!(numbers, (1..=n).collect::<Vec<_>>());
            prop_assert!(block.iter().all(|r| r.year == *year));
        }
    }
}
