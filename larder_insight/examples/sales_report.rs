use chrono::{Duration, NaiveDate};
use larder_insight::intelligence::{generate_business_intelligence, QualitySnapshot, StockItem};
use larder_insight::logging::{init_logging, LoggingConfig};
use larder_insight::predictive::{
    analyze_seasonal_patterns, detect_sales_insights, plan_restock, predict_sales_pattern,
};
use larder_insight::{AnalysisConfig, Analyzer, Series};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::development())?;

    // Eight weeks of daily takings with a weekend bump and one catering order
    let start = NaiveDate::from_ymd_opt(2024, 3, 4).ok_or("invalid start date")?;
    let week = [820.0, 760.0, 790.0, 880.0, 1150.0, 1420.0, 1300.0];
    let daily: Vec<(NaiveDate, f64)> = (0..56)
        .map(|i| {
            let base = week[i % 7] + i as f64 * 4.0;
            let value = if i == 40 { base + 3500.0 } else { base };
            (start + Duration::days(i as i64), value)
        })
        .collect();

    let series = Series::from_dated(&daily)?;
    let analyzer = Analyzer::new(AnalysisConfig::default())?;
    let report = analyzer.full_analysis(&series)?;

    println!("== Statistical report ==");
    println!("{}", report.to_json_pretty()?);

    let stock = vec![
        StockItem::new("flour", 42.0),
        StockItem::new("mozzarella", 6.0),
        StockItem::new("tomatoes", 18.0).with_min_stock(20.0),
    ];
    let quality = QualitySnapshot {
        accuracy_rate: 93.0,
        error_rate: 2.1,
        customer_satisfaction: 87.5,
    };
    let intelligence = generate_business_intelligence(series.values(), &stock, quality)?;

    println!("\n== Business intelligence ==");
    println!("{}", serde_json::to_string_pretty(&intelligence)?);

    let last_day = daily.last().map(|(date, _)| *date).unwrap_or(start);
    let pattern = predict_sales_pattern(series.values(), last_day)?;

    println!("\n== Next 7 days ==");
    for point in pattern.iter().take(7) {
        println!(
            "{}: {:>6.0} ({:.0}..{:.0}, {:.1}% confidence)",
            point.period, point.predicted_value, point.lower_bound, point.upper_bound, point.confidence
        );
    }

    println!("\n== Insights ==");
    let mut insights = detect_sales_insights(series.values());
    insights.extend(analyze_seasonal_patterns(&daily));
    for insight in &insights {
        println!("[{:?}] {} - {}", insight.impact, insight.title, insight.description);
    }

    println!("\n== Restock ==");
    let mozzarella_usage: Vec<f64> = (0..30).map(|i| 8.0 + (i % 7) as f64).collect();
    let plan = plan_restock(&stock[1], &mozzarella_usage)?;
    println!(
        "{}: order {} (demand {}, risk {:?})",
        plan.product, plan.recommended_order, plan.predicted_demand, plan.risk_level
    );

    Ok(())
}
