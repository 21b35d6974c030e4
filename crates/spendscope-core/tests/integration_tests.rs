//! Integration tests for spendscope-core
//!
//! These tests exercise the full import → analyze → rank workflow.

use spendscope_core::{
    import::parse_csv,
    models::Timeframe,
    patterns::{PatternSummary, SortKey, TypeFilter},
    Impact, PatternEngine, PatternQuery, PatternType, TrendDirection,
};

/// One month of categorized spending:
/// - Food & Dining: 10 meals, first five average 200, last five average 300
/// - Bills: 4 recurring 500 charges
/// - Transport: rides on Mondays only (2024-01-01 is a Monday)
fn sample_csv() -> &'static str {
    r#"id,date,amount,category,description,merchant,recurring
f01,2024-01-01,150,Food & Dining,Lunch,NOODLE BAR,no
f02,2024-01-03,250,Food & Dining,Dinner,GRILL HOUSE,no
f03,2024-01-06,200,Food & Dining,Lunch,NOODLE BAR,no
f04,2024-01-09,180,Food & Dining,Breakfast,CAFE,no
f05,2024-01-12,220,Food & Dining,Dinner,GRILL HOUSE,no
f06,2024-01-16,300,Food & Dining,Dinner,STEAKHOUSE,no
f07,2024-01-19,280,Food & Dining,Lunch,SUSHI,no
f08,2024-01-23,320,Food & Dining,Dinner,STEAKHOUSE,no
f09,2024-01-26,290,Food & Dining,Lunch,SUSHI,no
f10,2024-01-30,310,Food & Dining,Dinner,STEAKHOUSE,no
b01,2024-01-02,500,Bills,Electricity,POWER CO,yes
b02,2024-01-05,500,Bills,Water,WATER CO,yes
b03,2024-01-10,500,Bills,Internet,FIBERNET,yes
b04,2024-01-20,500,Bills,Phone,MOBILECO,yes
t01,2024-01-01,80,Transport,Taxi,CITY TAXI,no
t02,2024-01-08,60,Transport,Taxi,CITY TAXI,no
t03,2024-01-15,80,Transport,Taxi,CITY TAXI,no
t04,2024-01-22,60,Transport,Taxi,CITY TAXI,no
"#
}

#[test]
fn test_full_analysis_workflow() {
    let transactions = parse_csv(sample_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(transactions.len(), 18);

    let engine = PatternEngine::new();
    let patterns = engine
        .analyze(&transactions, Timeframe::Month)
        .expect("Analysis failed");

    assert!(!patterns.is_empty());
    assert!(patterns
        .iter()
        .all(|p| (0.0..=1.0).contains(&p.confidence)));
    assert!(patterns.iter().all(|p| p.timeframe == Timeframe::Month));
}

#[test]
fn test_food_and_dining_trend_scenario() {
    let transactions = parse_csv(sample_csv().as_bytes()).unwrap();
    let engine = PatternEngine::new();
    let query = PatternQuery::new(TypeFilter::Only(PatternType::Trend), SortKey::Impact);
    let trends = engine
        .analyze_ranked(&transactions, Timeframe::Month, &query)
        .unwrap();

    let food = trends
        .iter()
        .find(|p| p.category == "Food & Dining")
        .expect("expected a Food & Dining trend");
    assert!((food.data.percentage.unwrap() - 50.0).abs() < 1e-9);
    assert_eq!(food.impact, Impact::High);
    assert_eq!(food.data.trend, Some(TrendDirection::Increasing));
    assert!((food.data.prediction.unwrap() - 330.0).abs() < 1e-9);
}

#[test]
fn test_bills_recurring_scenario() {
    let transactions = parse_csv(sample_csv().as_bytes()).unwrap();
    let patterns = PatternEngine::new()
        .analyze(&transactions, Timeframe::Month)
        .unwrap();

    let bills = patterns
        .iter()
        .find(|p| p.id == "recurring:bills")
        .expect("expected a recurring Bills pattern");
    assert_eq!(bills.data.percentage, Some(100.0));
    assert_eq!(bills.impact, Impact::High);

    // No other category has recurring flags
    assert_eq!(
        patterns
            .iter()
            .filter(|p| p.pattern_type == PatternType::Recurring)
            .count(),
        1
    );
}

#[test]
fn test_transport_behavioral_scenario() {
    let transactions = parse_csv(sample_csv().as_bytes()).unwrap();
    let patterns = PatternEngine::new()
        .analyze(&transactions, Timeframe::Month)
        .unwrap();

    let transport = patterns
        .iter()
        .find(|p| p.id == "behavioral:transport")
        .expect("expected a behavioral Transport pattern");
    assert_eq!(transport.data.percentage, Some(100.0));
    assert!(transport.title.contains("Monday"));
}

#[test]
fn test_analysis_ignores_input_order() {
    let transactions = parse_csv(sample_csv().as_bytes()).unwrap();
    let mut shuffled = transactions.clone();
    shuffled.reverse();
    shuffled.rotate_left(7);

    let engine = PatternEngine::new();
    let a = engine.analyze(&transactions, Timeframe::Month).unwrap();
    let b = engine.analyze(&shuffled, Timeframe::Month).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_ranked_by_impact_and_summary() {
    let transactions = parse_csv(sample_csv().as_bytes()).unwrap();
    let engine = PatternEngine::new();
    let ranked = engine
        .analyze_ranked(&transactions, Timeframe::Month, &PatternQuery::default())
        .unwrap();

    assert!(ranked.windows(2).all(|w| w[0].impact >= w[1].impact));

    let summary = PatternSummary::from_patterns(&ranked);
    assert_eq!(summary.total, ranked.len());
    assert_eq!(summary.by_type.recurring, 1);
    assert!(summary.increasing_trends >= 1);
}

#[test]
fn test_detail_view_series() {
    let transactions = parse_csv(sample_csv().as_bytes()).unwrap();
    let engine = PatternEngine::new();

    let detail = engine
        .detail(&transactions, Timeframe::Month, "behavioral:transport")
        .unwrap();
    assert_eq!(detail.series.points.len(), 7);
    assert_eq!(detail.series.points[1].label, "Monday");
    assert_eq!(detail.series.points[1].value, 280.0);
    assert!(detail.series.points[1].highlighted);

    let again = engine
        .detail(&transactions, Timeframe::Month, "behavioral:transport")
        .unwrap();
    assert_eq!(detail, again);
}
