use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use buildops_analytics::{
    AgingBuckets, BudgetLineSnapshot, CashFlowForecastInput, EquipmentSnapshot,
    ProjectBudgetSnapshot, SafetyMetricsSnapshot, calculate_earned_value, forecast_cash_flow,
    predict_budget_overrun, predict_equipment_failure, score_safety_risk,
};

fn bench_scalar_calculators(c: &mut Criterion) {
    let budget = ProjectBudgetSnapshot {
        budget: 1_000_000.0,
        actual_cost: 600_000.0,
        completion_pct: 0.5,
    };
    let safety = SafetyMetricsSnapshot {
        incident_count: 4,
        severe_incident_count: 1,
        avg_inspection_score: 88.0,
        cert_gap_count: 2,
        days_since_last_incident: 40,
        project_count: 3,
    };
    let equipment = EquipmentSnapshot {
        age_months: 60,
        usage_hours: 5_000.0,
        maintenance_count: 6,
        days_since_last_service: 120,
        expected_service_interval_days: 90,
    };
    let buckets = AgingBuckets {
        current: 120_000.0,
        days30: 40_000.0,
        days60: 15_000.0,
        days90_plus: 8_000.0,
    };
    let cash = CashFlowForecastInput {
        current_cash: 250_000.0,
        ar_aging: buckets.clone(),
        ap_aging: buckets,
        monthly_burn_rate: 60_000.0,
    };

    let mut group = c.benchmark_group("calculators");
    group.bench_function("budget_overrun", |b| {
        b.iter(|| predict_budget_overrun(black_box(&budget)))
    });
    group.bench_function("safety_risk", |b| b.iter(|| score_safety_risk(black_box(&safety))));
    group.bench_function("equipment_failure", |b| {
        b.iter(|| predict_equipment_failure(black_box(&equipment)))
    });
    group.bench_function("cash_flow", |b| b.iter(|| forecast_cash_flow(black_box(&cash))));
    group.finish();
}

fn bench_earned_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("earned_value");
    for size in [10usize, 100, 1_000] {
        let lines: Vec<BudgetLineSnapshot> = (0..size)
            .map(|i| BudgetLineSnapshot {
                budgeted_amount: 1_000.0 + i as f64,
                actual_amount: 900.0 + (i % 300) as f64,
            })
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            b.iter(|| calculate_earned_value(black_box(lines)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scalar_calculators, bench_earned_value);
criterion_main!(benches);
