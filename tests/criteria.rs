use criteria::prelude::*;

fn sample_predicate() -> Expression {
    let expr = Criteria::expr();
    expr.property("fieldName", expr.equals("test")).unwrap()
}

#[test]
fn default_criteria_is_empty() {
    let criteria = Criteria::new();

    assert_eq!(criteria.predicate(), None);
    assert!(criteria.ordering().is_empty());
    assert_eq!(criteria.offset(), 0);
    assert_eq!(criteria.limit(), None);
    assert_eq!(criteria.includes(), &[] as &[String]);
}

#[test]
fn order_by_round_trips_in_insertion_order() {
    let mut criteria = Criteria::new();
    criteria.order_by([("key1", SortOrder::Desc), ("key2", SortOrder::Asc)]);

    let ordering: Vec<(&str, SortOrder)> = criteria
        .ordering()
        .iter()
        .map(|(field, order)| (field.as_str(), *order))
        .collect();
    assert_eq!(
        ordering,
        vec![("key1", SortOrder::Desc), ("key2", SortOrder::Asc)]
    );
}

#[test]
fn order_by_replaces_the_whole_map() {
    let mut criteria = Criteria::new();
    criteria.order_by([("key1", SortOrder::Desc)]);
    criteria.order_by([("key2", SortOrder::Asc)]);

    assert_eq!(criteria.ordering().len(), 1);
    assert_eq!(criteria.ordering().get("key2"), Some(&SortOrder::Asc));
}

#[test]
fn sort_order_accepts_the_two_symbol_domain_only() {
    assert_eq!(SortOrder::try_from(4), Ok(SortOrder::Asc));
    assert_eq!(SortOrder::try_from(3), Ok(SortOrder::Desc));
    assert!(matches!(
        SortOrder::try_from(0),
        Err(CriteriaError::InvalidArgument(_))
    ));

    assert_eq!("asc".parse(), Ok(SortOrder::Asc));
    assert_eq!("DESC".parse(), Ok(SortOrder::Desc));
    assert!(matches!(
        "ascending".parse::<SortOrder>(),
        Err(CriteriaError::InvalidArgument(_))
    ));

    assert_eq!(SortOrder::Asc.to_string(), "asc");
    assert_eq!(SortOrder::Desc.reversed(), SortOrder::Asc);
}

#[test]
fn offset_round_trips() {
    let mut criteria = Criteria::new();
    assert_eq!(criteria.offset(), 0);

    criteria.set_offset(25);
    assert_eq!(criteria.offset(), 25);
}

#[test]
fn include_round_trips_verbatim() {
    let mut criteria = Criteria::new();
    criteria.include(["relName", "chained.relName", "relName"]);

    assert_eq!(
        criteria.includes(),
        &["relName", "chained.relName", "relName"]
    );
}

#[test]
fn limit_round_trips_and_clears() {
    let mut criteria = Criteria::new();
    assert_eq!(criteria.limit(), None);

    criteria.set_limit(25).unwrap();
    assert_eq!(criteria.limit(), Some(25));

    criteria.set_limit(None).unwrap();
    assert_eq!(criteria.limit(), None);
}

#[test]
fn zero_limit_fails_and_keeps_the_prior_value() {
    let mut criteria = Criteria::new();
    criteria.set_limit(25).unwrap();

    let err = criteria.set_limit(0).unwrap_err();
    assert!(matches!(err, CriteriaError::InvalidArgument(_)));
    assert_eq!(criteria.limit(), Some(25));
}

#[test]
fn where_stores_the_predicate() {
    let mut criteria = Criteria::new();
    assert_eq!(criteria.predicate(), None);

    let predicate = sample_predicate();
    criteria.r#where(Some(predicate.clone()));
    assert_eq!(criteria.predicate(), Some(&predicate));

    criteria.r#where(None);
    assert_eq!(criteria.predicate(), None);
}

#[test]
fn merge_overrides_all_facets() {
    let predicate = sample_predicate();

    let base = Criteria::new();
    let mut other = Criteria::new();
    other
        .set_limit(50)
        .unwrap()
        .set_offset(20)
        .include(["includeA"])
        .order_by([("orderAsc", SortOrder::Asc)])
        .r#where(Some(predicate.clone()));

    let base_before = base.clone();
    let other_before = other.clone();

    let merged = base.merge(&other);

    assert_eq!(merged.limit(), Some(50));
    assert_eq!(merged.offset(), 20);
    assert_eq!(merged.includes(), &["includeA"]);
    assert_eq!(merged.ordering().get("orderAsc"), Some(&SortOrder::Asc));
    assert_eq!(merged.predicate(), Some(&predicate));

    // merge never mutates its operands
    assert_eq!(base, base_before);
    assert_eq!(other, other_before);
}

#[test]
fn merge_overrides_partially() {
    let mut base = Criteria::new();
    base.set_offset(50);

    let mut other = Criteria::new();
    other.set_offset(20);

    let merged = base.merge(&other);

    assert_eq!(merged.offset(), 20);
    assert_eq!(merged.limit(), base.limit());
    assert_eq!(merged.includes(), base.includes());
    assert_eq!(merged.ordering(), base.ordering());
    assert_eq!(merged.predicate(), base.predicate());
}

#[test]
fn merge_keeps_left_facets_that_the_right_side_does_not_carry() {
    let predicate = sample_predicate();

    let mut base = Criteria::new();
    base.set_limit(10)
        .unwrap()
        .set_offset(50)
        .include(["author"])
        .order_by([("name", SortOrder::Asc)])
        .r#where(Some(predicate.clone()));

    let mut other = Criteria::new();
    other.set_offset(20);

    let merged = base.merge(&other);

    // offset always takes the right-hand value, everything else is
    // present/non-empty-wins
    assert_eq!(merged.offset(), 20);
    assert_eq!(merged.limit(), Some(10));
    assert_eq!(merged.includes(), &["author"]);
    assert_eq!(merged.ordering().get("name"), Some(&SortOrder::Asc));
    assert_eq!(merged.predicate(), Some(&predicate));
}

#[test]
fn merge_with_own_derivative_does_not_mutate() {
    let mut base = Criteria::new();
    base.set_offset(5);

    let mut derived = base.merge(&base);
    derived.set_offset(7);

    let merged = base.merge(&derived);
    assert_eq!(base.offset(), 5);
    assert_eq!(derived.offset(), 7);
    assert_eq!(merged.offset(), 7);
}

#[test]
fn expr_entry_point_builds_expressions() {
    let expr = Criteria::expr();
    assert!(expr.r#true().evaluate(&serde_json::json!(42)));
}

#[test]
fn criteria_serde_round_trip() {
    let mut criteria = Criteria::new();
    criteria
        .set_limit(25)
        .unwrap()
        .set_offset(50)
        .order_by([("key1", SortOrder::Desc), ("key2", SortOrder::Asc)])
        .include(["author"])
        .r#where(Some(sample_predicate()));

    let encoded = serde_json::to_string(&criteria).unwrap();
    let decoded: Criteria = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, criteria);
}
