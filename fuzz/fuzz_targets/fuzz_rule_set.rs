#![no_main]

use libfuzzer_sys::fuzz_target;
use mzlipid::peak::Peak;
use mzlipid::query::QueryBuilder;
use mzlipid::rules::RuleSet;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Loading must fail cleanly, never panic
    let Ok(rule_set) = RuleSet::from_toml_str(text) else {
        return;
    };

    // Any table that passed validation must be usable
    let builder = QueryBuilder::new(&rule_set.classification);
    for (mz, rt) in [(0.5, 0.5), (600.0, 350.0), (1500.0, 500.0), (f64::MAX, f64::MAX)] {
        let queries = builder.build(&Peak::new(mz, rt), 5.0, 30000.0);
        assert!(!queries.is_empty());
    }
});
