use {
    anyhow::{Context, Result},
    clap::Parser,
    fib_radar::{
        AnalysisResult, BatchError, BinanceSource, Cli, FailoverProvider, GlobalRateLimiter,
        OkxSource, RefreshCoordinator, RefreshCycle, SymbolPair,
        config::{ANALYSIS, BINANCE, OKX, REFRESH},
        data::discover_usdt_pairs,
        engine::demo_cycle,
        models::StrategyKind,
        utils::epoch_ms_to_time_string,
    },
    std::{collections::BTreeMap, sync::Arc},
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Pair")]
    pair: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "24h %")]
    change: String,
    #[tabled(rename = "Trend")]
    trend: &'static str,
    #[tabled(rename = "Support")]
    support: String,
    #[tabled(rename = "Resistance")]
    resistance: String,
    #[tabled(rename = "Strength")]
    strength: String,
    #[tabled(rename = "Strategy")]
    strategy: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl ResultRow {
    fn from_result(result: &AnalysisResult) -> Self {
        let strategy = match result.strategy.kind {
            StrategyKind::ResistanceBreakout => format!(
                "break {:.4} -> {:.4}",
                result.strategy.from_level, result.strategy.target_level
            ),
            StrategyKind::SupportBreak => format!(
                "lose {:.4} -> {:.4}",
                result.strategy.from_level, result.strategy.target_level
            ),
        };
        ResultRow {
            pair: result.symbol.name().to_string(),
            price: format!("{:.4}", result.current_price),
            change: format!("{:+.2}%", result.price_change_pct),
            trend: if result.is_up_trend { "up" } else { "down" },
            support: format!("{:.4}", result.levels.support),
            resistance: format!("{:.4}", result.levels.resistance),
            strength: result.strength.to_string(),
            strategy,
            updated: epoch_ms_to_time_string(result.updated_at_ms),
        }
    }
}

fn print_results(results: &BTreeMap<SymbolPair, AnalysisResult>, args: &Cli, demo: bool) {
    let rows: Vec<ResultRow> = results
        .values()
        .filter(|r| match args.min_strength {
            Some(min) => r.strength >= min,
            None => true,
        })
        .map(ResultRow::from_result)
        .collect();

    if demo {
        println!("=== DEMO DATA (synthetic, no exchange was reachable) ===");
    }
    if rows.is_empty() {
        println!("(no pairs matched the strength filter)");
        return;
    }
    println!("{}", Table::new(rows).with(Style::sharp()));
}

/// Merge one cycle into the retained map. Failed symbols keep their previous
/// result (with its original timestamp); overwrite-on-failure is a decision
/// this layer makes, not the coordinator.
fn merge_cycle(results: &mut BTreeMap<SymbolPair, AnalysisResult>, cycle: &RefreshCycle) {
    for (symbol, outcome) in &cycle.outcomes {
        if let Ok(result) = outcome {
            results.insert(symbol.clone(), result.clone());
        }
    }
}

async fn resolve_symbols(args: &Cli) -> Result<Vec<SymbolPair>> {
    if args.discover {
        let pairs = discover_usdt_pairs(args.max_pairs)
            .await
            .context("symbol discovery failed on both exchanges")?;
        log::info!("discovered {} USDT pairs", pairs.len());
        return Ok(pairs);
    }
    Ok(args
        .symbols
        .iter()
        .map(SymbolPair::new)
        .take(args.max_pairs)
        .collect())
}

#[tokio::main]
async fn main() -> Result<()> {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("fib_radar"), my_code_level)
        .init();

    let args = Cli::parse();
    let symbols = resolve_symbols(&args).await?;

    let primary = Arc::new(BinanceSource::new(
        GlobalRateLimiter::new(BINANCE.limits.weight_limit_minute),
        ANALYSIS.window_limit,
    ));
    let secondary = Arc::new(OkxSource::new(
        GlobalRateLimiter::new(OKX.limits.weight_limit_minute),
        ANALYSIS.window_limit,
    ));
    let coordinator = RefreshCoordinator::new(FailoverProvider::new(primary, secondary));

    let mut results: BTreeMap<SymbolPair, AnalysisResult> = BTreeMap::new();

    loop {
        match coordinator.refresh_all(&symbols).await {
            Ok(cycle) => {
                merge_cycle(&mut results, &cycle);
                println!(
                    "last update {} ({} ok, {} failed)",
                    epoch_ms_to_time_string(cycle.completed_at_ms),
                    cycle.succeeded(),
                    cycle.failed()
                );
                print_results(&results, &args, false);
            }
            Err(BatchError::Empty { attempted }) if args.demo_on_empty => {
                log::error!(
                    "no usable result from any of {} symbols; showing demo data",
                    attempted
                );
                let cycle = demo_cycle(&symbols);
                let mut demo_results = BTreeMap::new();
                merge_cycle(&mut demo_results, &cycle);
                print_results(&demo_results, &args, true);
            }
            Err(e @ BatchError::Empty { .. }) => {
                // Batch-fatal for this cycle, but the tracker keeps running.
                log::error!("{}", e);
                eprintln!("refresh failed: {}", e);
            }
            Err(e) => return Err(e).context("refresh cycle could not start"),
        }

        if args.once {
            break;
        }
        tokio::time::sleep(REFRESH.interval).await;
    }

    Ok(())
}
