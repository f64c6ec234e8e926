//! Chart generation and rendering for the dashboard.
//!
//! Each chart is built with `charming` as an ECharts configuration, serialized
//! to JSON and initialized by a script in the page head:
//! - **Daily Spending**: a bar per day of the month with spending
//! - **Spending by Category**: a donut chart in the category colors
//! - **Budget vs Actual**: grouped bars of budget and spend per category

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Tooltip, Trigger,
    },
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    dashboard::aggregation::{BudgetUtilization, CategorySpend, DailySpend},
    html::HeadElement,
};

/// The color used for uncategorized spending.
const UNCATEGORIZED_COLOR: &str = "#9ca3af";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string, `None` if there is nothing to chart.
    pub options: Option<String>,
    /// Shown in place of the chart when there is nothing to chart.
    pub empty_message: &'static str,
}

/// Renders the HTML containers for dashboard charts.
///
/// Charts without data are rendered as a short message instead.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    @if chart.options.is_some() {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    } @else {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded border border-dashed
                                border-gray-300 dark:border-gray-600 flex
                                items-center justify-center text-gray-500
                                dark:text-gray-400"
                            data-empty-chart="true"
                        {
                            p { (chart.empty_message) }
                        }
                    }
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing. Charts without data are skipped.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .filter_map(|chart| chart.options.as_ref().map(|options| (chart.id, options)))
        .map(|(id, options)| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                id, options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Convert an amount to the float ECharts expects, rounded to cents.
fn chart_value(amount: Decimal) -> f64 {
    amount.round_dp(2).to_f64().unwrap_or_default()
}

/// A bar per day of the month that has spending, labelled "Day N".
///
/// Returns `None` if there is no spending.
pub(super) fn daily_spending_chart(daily_series: &[DailySpend]) -> Option<Chart> {
    if daily_series.is_empty() {
        return None;
    }

    let labels: Vec<String> = daily_series
        .iter()
        .map(|daily_spend| format!("Day {}", daily_spend.day))
        .collect();
    let values: Vec<f64> = daily_series
        .iter()
        .map(|daily_spend| chart_value(daily_spend.amount))
        .collect();

    Some(
        Chart::new()
            .title(Title::new().text("Daily Spending"))
            .tooltip(currency_tooltip())
            .grid(
                Grid::new()
                    .left("3%")
                    .right("4%")
                    .bottom("3%")
                    .contain_label(true),
            )
            .x_axis(Axis::new().type_(AxisType::Category).data(labels))
            .y_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .axis_label(AxisLabel::new().formatter(currency_formatter())),
            )
            .series(bar::Bar::new().name("Spent").data(values)),
    )
}

/// A donut chart of spending per category, largest first.
///
/// Returns `None` if there is no spending.
pub(super) fn category_spending_chart(breakdown: &[CategorySpend]) -> Option<Chart> {
    if breakdown.is_empty() {
        return None;
    }

    let mut sorted: Vec<&CategorySpend> = breakdown.iter().collect();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));

    let colors: Vec<Color> = sorted
        .iter()
        .map(|spend| Color::from(spend.color.as_deref().unwrap_or(UNCATEGORIZED_COLOR)))
        .collect();
    let data: Vec<(f64, &str)> = sorted
        .iter()
        .map(|spend| (chart_value(spend.amount), spend.name.as_str()))
        .collect();

    Some(
        Chart::new()
            .title(Title::new().text("Spending by Category"))
            .tooltip(
                Tooltip::new()
                    .trigger(Trigger::Item)
                    .value_formatter(currency_formatter()),
            )
            .legend(Legend::new().bottom("0"))
            .color(colors)
            .series(
                Pie::new()
                    .name("Spending")
                    .radius(vec!["40%", "70%"])
                    .data(data),
            ),
    )
}

/// Grouped bars of the budget and the actual spending for each category.
///
/// Returns `None` if no category has a budget or any spending.
pub(super) fn budget_vs_actual_chart(utilization: &[BudgetUtilization]) -> Option<Chart> {
    let rows: Vec<&BudgetUtilization> = utilization
        .iter()
        .filter(|row| !row.budget_amount.is_zero() || !row.actual_amount.is_zero())
        .collect();

    if rows.is_empty() {
        return None;
    }

    let labels: Vec<String> = rows.iter().map(|row| row.category_name.clone()).collect();
    let budgets: Vec<f64> = rows.iter().map(|row| chart_value(row.budget_amount)).collect();
    let actuals: Vec<f64> = rows.iter().map(|row| chart_value(row.actual_amount)).collect();

    Some(
        Chart::new()
            .title(Title::new().text("Budget vs Actual"))
            .tooltip(currency_tooltip())
            .legend(Legend::new().top("1%").right("4%"))
            .grid(
                Grid::new()
                    .left("3%")
                    .right("4%")
                    .bottom("3%")
                    .top(60)
                    .contain_label(true),
            )
            .x_axis(Axis::new().type_(AxisType::Category).data(labels))
            .y_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .axis_label(AxisLabel::new().formatter(currency_formatter())),
            )
            .series(bar::Bar::new().name("Budget").data(budgets))
            .series(bar::Bar::new().name("Actual").data(actuals)),
    )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use scraper::{Html, Selector};

    use crate::{
        dashboard::aggregation::{BudgetUtilization, CategorySpend, DailySpend},
        html::HeadElement,
    };

    use super::{
        DashboardChart, budget_vs_actual_chart, category_spending_chart, charts_script,
        charts_view, daily_spending_chart,
    };

    fn utilization(name: &str, budget: Decimal, actual: Decimal) -> BudgetUtilization {
        BudgetUtilization {
            category_id: 1,
            category_name: name.to_owned(),
            budget_amount: budget,
            actual_amount: actual,
            percent_used: Decimal::ZERO,
            percent_used_unclamped: Decimal::ZERO,
            is_over_budget: actual > budget,
        }
    }

    #[test]
    fn daily_chart_labels_days() {
        let chart = daily_spending_chart(&[
            DailySpend {
                day: 5,
                amount: dec!(30),
            },
            DailySpend {
                day: 12,
                amount: dec!(5.5),
            },
        ])
        .unwrap();

        let options = chart.to_string();
        assert!(options.contains("\"Day 5\""));
        assert!(options.contains("\"Day 12\""));
        assert!(options.contains("5.5"));
    }

    #[test]
    fn empty_series_have_no_chart() {
        assert!(daily_spending_chart(&[]).is_none());
        assert!(category_spending_chart(&[]).is_none());
        assert!(budget_vs_actual_chart(&[]).is_none());
        assert!(budget_vs_actual_chart(&[utilization("Food", dec!(0), dec!(0))]).is_none());
    }

    #[test]
    fn category_chart_uses_category_colors() {
        let chart = category_spending_chart(&[
            CategorySpend {
                category_id: None,
                name: "Uncategorized".to_owned(),
                color: None,
                amount: dec!(5),
            },
            CategorySpend {
                category_id: Some(1),
                name: "Food".to_owned(),
                color: Some("#22c55e".to_owned()),
                amount: dec!(50),
            },
        ])
        .unwrap();

        let options = chart.to_string();
        let food_color = options.find("#22c55e").unwrap();
        let uncategorized_color = options.find("#9ca3af").unwrap();
        assert!(
            food_color < uncategorized_color,
            "the largest category should come first"
        );
    }

    #[test]
    fn budget_chart_has_budget_and_actual_series() {
        let chart = budget_vs_actual_chart(&[
            utilization("Food", dec!(200), dec!(50)),
            utilization("Unused", dec!(0), dec!(0)),
        ])
        .unwrap();

        let options = chart.to_string();
        assert!(options.contains("\"Budget\""));
        assert!(options.contains("\"Actual\""));
        assert!(!options.contains("Unused"));
    }

    #[test]
    fn empty_chart_renders_message_without_script() {
        let charts = [
            DashboardChart {
                id: "daily-spending-chart",
                options: None,
                empty_message: "No spending this month",
            },
            DashboardChart {
                id: "category-chart",
                options: Some("{}".to_owned()),
                empty_message: "",
            },
        ];

        let html = Html::parse_fragment(&charts_view(&charts).into_string());
        let message: String = html
            .select(&Selector::parse("[data-empty-chart] p").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(message, "No spending this month");

        let HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("expected an inline script");
        };
        assert!(script.0.contains("category-chart"));
        assert!(!script.0.contains("daily-spending-chart"));
    }
}
