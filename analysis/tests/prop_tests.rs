use proptest::prelude::*;

use fundflow_analysis::{filter_sort_limit, CounterpartyAggregate, FilterParams};
use fundflow_types::SortOrder;

fn aggregates(totals: &[u32]) -> Vec<CounterpartyAggregate> {
    totals
        .iter()
        .enumerate()
        .map(|(i, t)| CounterpartyAggregate {
            address: format!("cp{i}"),
            amount: f64::from(*t) / 10.0,
            transactions: Vec::new(),
        })
        .collect()
}

proptest! {
    /// Output never exceeds the limit and is a subset of the input.
    #[test]
    fn output_bounded_by_limit(totals in prop::collection::vec(0u32..1000, 0..50), limit in 0usize..60) {
        let input = aggregates(&totals);
        let params = FilterParams { limit, ..Default::default() };
        let out = filter_sort_limit(input.clone(), &params);
        prop_assert!(out.len() <= limit);
        prop_assert!(out.len() <= input.len());
        for entry in &out {
            prop_assert!(input.contains(entry));
        }
    }

    /// Every surviving total honours the min/max/zero filters.
    #[test]
    fn survivors_honour_bounds(
        totals in prop::collection::vec(0u32..1000, 0..50),
        min in 0u32..500,
        max in prop::option::of(0u32..1000),
        include_zero in any::<bool>(),
    ) {
        let params = FilterParams {
            min_amount: f64::from(min) / 10.0,
            max_amount: max.map(|m| f64::from(m) / 10.0),
            include_zero,
            limit: usize::MAX,
            ..Default::default()
        };
        let out = filter_sort_limit(aggregates(&totals), &params);
        for entry in &out {
            prop_assert!(entry.amount >= params.min_amount);
            if let Some(max) = params.max_amount {
                prop_assert!(entry.amount <= max);
            }
            if !include_zero {
                prop_assert!(entry.amount != 0.0);
            }
        }
    }

    /// Results are ordered by total in the requested direction, ties in
    /// input order.
    #[test]
    fn ordered_and_stable(totals in prop::collection::vec(0u32..20, 0..40), asc in any::<bool>()) {
        let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
        let params = FilterParams { sort_order: order, limit: usize::MAX, ..Default::default() };
        let out = filter_sort_limit(aggregates(&totals), &params);
        prop_assert_eq!(out.len(), totals.len());
        for pair in out.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.amount == b.amount {
                let ia: usize = a.address[2..].parse().unwrap();
                let ib: usize = b.address[2..].parse().unwrap();
                prop_assert!(ia < ib, "tie broken out of input order");
            } else if asc {
                prop_assert!(a.amount < b.amount);
            } else {
                prop_assert!(a.amount > b.amount);
            }
        }
    }
}
