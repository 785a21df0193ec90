//! Tests for strategy selection

use pathmine::{select_strategy, MiningStrategy, SelectorConfig};

#[test]
fn default_bands() {
    let config = SelectorConfig::default();
    // avg = 4 -> sparse
    assert_eq!(
        select_strategy(10, 40, &config),
        MiningStrategy::JoinExpansion
    );
    // avg = 5 (lower bound inclusive) -> traversal
    assert_eq!(
        select_strategy(10, 50, &config),
        MiningStrategy::TraversalExpansion
    );
    // avg = 20 (upper bound inclusive) -> traversal
    assert_eq!(
        select_strategy(10, 200, &config),
        MiningStrategy::TraversalExpansion
    );
    // avg = 21 -> dense
    assert_eq!(select_strategy(10, 210, &config), MiningStrategy::GraphDfs);
}

#[test]
fn custom_cutoffs_are_honored() {
    let config = SelectorConfig {
        sparse_below: 2.0,
        dense_above: 3.0,
    };
    assert_eq!(select_strategy(10, 10, &config), MiningStrategy::JoinExpansion);
    assert_eq!(
        select_strategy(10, 25, &config),
        MiningStrategy::TraversalExpansion
    );
    assert_eq!(select_strategy(10, 40, &config), MiningStrategy::GraphDfs);
}

#[test]
fn selection_is_pure() {
    let config = SelectorConfig::default();
    for _ in 0..3 {
        assert_eq!(
            select_strategy(7, 77, &config),
            select_strategy(7, 77, &config)
        );
    }
}

#[test]
fn strategy_parses_from_str() {
    assert_eq!(
        "join".parse::<MiningStrategy>().unwrap(),
        MiningStrategy::JoinExpansion
    );
    assert_eq!(
        "traversal-expansion".parse::<MiningStrategy>().unwrap(),
        MiningStrategy::TraversalExpansion
    );
    assert_eq!(
        "graph-dfs".parse::<MiningStrategy>().unwrap(),
        MiningStrategy::GraphDfs
    );
    assert!("unknown".parse::<MiningStrategy>().is_err());
}

#[test]
fn strategy_round_trips_display() {
    for strategy in [
        MiningStrategy::JoinExpansion,
        MiningStrategy::TraversalExpansion,
        MiningStrategy::GraphDfs,
    ] {
        assert_eq!(strategy.to_string().parse::<MiningStrategy>(), Ok(strategy));
    }
}
