//! 引擎再製造廠庫存績效報表示例

use chrono::{Duration, Utc};
use invperf::calc::CsvExporter;
use invperf::model::{AbcClass, CountRecord, InventoryItem, MemoryDataSource, Movement, TurnoverClass};
use invperf::{AnalysisPeriod, PerformanceCalculator, ReportCache, ReportService};
use rust_decimal::Decimal;

const ORG: &str = "REMAN-TPE";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== 庫存績效報表示例 ===\n");

    let now = Utc::now();
    let items = vec![
        InventoryItem::new("101".to_string(), Decimal::from(12), Decimal::from(850))
            .with_part_code("CYL-HEAD-2.0".to_string())
            .with_part_name("Cylinder head, 2.0L".to_string()),
        InventoryItem::new("102".to_string(), Decimal::from(40), Decimal::from(95))
            .with_part_code("TURBO-CORE".to_string())
            .with_part_name("Turbo core".to_string()),
        InventoryItem::new("103".to_string(), Decimal::from(300), Decimal::new(450, 2))
            .with_part_code("GASKET-HG".to_string())
            .with_part_name("Head gasket".to_string()),
        InventoryItem::new("104".to_string(), Decimal::from(6), Decimal::from(1200))
            .with_part_code("CRANK-V6".to_string())
            .with_part_name("Crankshaft, V6".to_string()),
    ];

    let movements = vec![
        Movement::outbound("101".to_string(), Decimal::from(9), now - Duration::days(20)),
        Movement::outbound("102".to_string(), Decimal::from(35), now - Duration::days(40)),
        Movement::outbound("103".to_string(), Decimal::from(900), now - Duration::days(5)),
        Movement::inbound("104".to_string(), Decimal::from(6), now - Duration::days(60)),
    ];

    let counts = vec![
        CountRecord::new("CNT-01".to_string(), "101".to_string(), Decimal::from(11), now - Duration::days(3)),
        CountRecord::new("CNT-01".to_string(), "103".to_string(), Decimal::from(300), now - Duration::days(3)),
    ];

    let source = MemoryDataSource::new()
        .with_items(ORG, items)
        .with_movements(ORG, movements)
        .with_counts(ORG, counts);
    let service = ReportService::new(source, PerformanceCalculator::default());
    let cache = ReportCache::new();

    cache.refresh(&service, ORG, AnalysisPeriod::Days90, now)?;
    let report = cache
        .get(AnalysisPeriod::Days90)
        .ok_or_else(|| anyhow::anyhow!("報表尚未產生"))?;

    let metrics = &report.metrics;
    println!("品項數: {}", metrics.total_items);
    println!("庫存總值: {}", metrics.total_value);
    println!("平均精確度: {}%", metrics.average_accuracy.round_dp(2));
    println!("平均週轉率: {}", metrics.average_turnover.round_dp(2));
    println!("呆滯庫存價值: {}", metrics.dead_stock_value);
    println!("快速流動品項: {}", metrics.fast_moving_items);

    println!("\nABC 分布:");
    for class in AbcClass::ALL {
        let breakdown = metrics.abc(class);
        println!("  {}: {} 項，價值 {}", class, breakdown.count, breakdown.value);
    }

    println!("\n週轉分布:");
    for class in TurnoverClass::ALL {
        let breakdown = metrics.turnover(class);
        println!("  {}: {} 項，價值 {}", class, breakdown.count, breakdown.value);
    }

    if !report.warnings.is_empty() {
        println!("\n警告:");
        for warning in &report.warnings {
            println!("  [{:?}] {}: {}", warning.severity, warning.item_id, warning.message);
        }
    }

    println!("\n--- ABC 分析 CSV ---");
    print!("{}", CsvExporter::to_csv(&report.abc)?);

    Ok(())
}
