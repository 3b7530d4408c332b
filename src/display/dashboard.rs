//! Dashboard and status display

use crate::models::Money;
use crate::services::{DashboardSummary, MetricSource, OnboardingWizard, Screen};

use super::transaction::format_transaction_table;

/// Format the dashboard: metrics, cost breakdown and recent records
pub fn format_dashboard(summary: &DashboardSummary, symbol: &str, date_format: &str) -> String {
    let metrics = &summary.metrics;
    let mut output = String::new();

    if summary.user_name.is_empty() {
        output.push_str("MoneyUP Dashboard\n");
    } else {
        output.push_str(&format!("MoneyUP Dashboard for {}\n", summary.user_name));
    }
    output.push_str(&format!(
        "Period: {} to {}\n\n",
        metrics.period.start.format(date_format),
        metrics.period.end.format(date_format)
    ));

    output.push_str(&metric_line("Income", metrics.income, Some(metrics.income_source), symbol));
    output.push_str(&metric_line(
        "Fixed costs",
        metrics.fixed_costs,
        Some(metrics.fixed_costs_source),
        symbol,
    ));
    output.push_str(&metric_line("Available", metrics.available_budget, None, symbol));
    output.push_str(&format!(
        "  {:<14} {:>12.1}%\n",
        "Savings rate",
        metrics.savings_rate * 100.0
    ));

    if !summary.breakdown.total().is_zero() {
        output.push_str("\nDeclared fixed costs (monthly):\n");
        for (label, amount) in summary.breakdown.groups() {
            if amount.is_zero() {
                continue;
            }
            output.push_str(&format!(
                "  {:<20} {:>12}\n",
                label,
                amount.format_with_symbol(symbol)
            ));
        }
    }

    output.push_str("\nRecent transactions:\n");
    output.push_str(&format_transaction_table(&summary.recent, symbol, date_format));

    output
}

fn metric_line(label: &str, amount: Money, source: Option<MetricSource>, symbol: &str) -> String {
    match source {
        Some(source) => format!(
            "  {:<14} {:>13}  ({})\n",
            label,
            amount.format_with_symbol(symbol),
            source
        ),
        None => format!("  {:<14} {:>13}\n", label, amount.format_with_symbol(symbol)),
    }
}

/// Describe the current screen and what to do next
pub fn format_status(screen: Screen, wizard: &OnboardingWizard) -> String {
    match screen {
        Screen::Onboarding => format!(
            "Screen: onboarding ({})\nRun `moneyup onboard` to continue.\n",
            wizard.step()
        ),
        Screen::Payment => {
            "Screen: payment\nRun `moneyup pay --name <NAME> --email <EMAIL>` to unlock the dashboard.\n"
                .to_string()
        }
        Screen::Dashboard => "Screen: dashboard\nRun `moneyup dashboard` to view it.\n".to_string(),
    }
}
