use crate::models::AggregateResult;

/// Turn a category → total mapping into a list sorted by category name.
///
/// Hash-map iteration order is unspecified, so the sort is what makes the
/// encoded output byte-for-byte reproducible across runs.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use sumetife_core::formatting::format_results;
///
/// let totals = HashMap::from([("level2".to_string(), 5), ("level1".to_string(), 7)]);
/// let results = format_results(totals);
/// assert_eq!(results[0].category, "level1");
/// assert_eq!(results[1].total, 5);
/// ```
pub fn format_results<I>(totals: I) -> Vec<AggregateResult>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let mut results: Vec<AggregateResult> = totals
        .into_iter()
        .map(|(category, total)| AggregateResult { category, total })
        .collect();
    results.sort_by(|a, b| a.category.cmp(&b.category));
    results
}

/// One console line for a category total.
///
/// # Examples
///
/// ```
/// use sumetife_core::formatting::summary_line;
/// use sumetife_core::models::AggregateResult;
///
/// let result = AggregateResult { category: "level1".into(), total: 126 };
/// assert_eq!(summary_line(&result), "Level name: level1, total value: 126");
/// ```
pub fn summary_line(result: &AggregateResult) -> String {
    format!(
        "Level name: {}, total value: {}",
        result.category, result.total
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
