//! ECharts chart configurations built from the trend series.
//!
//! Each function returns a [charming] `Chart`; callers serialize it with
//! `to_string()` and hand the JSON to an ECharts instance. Only the chart
//! *data shape* is decided here; sizing and theming belong to the embedding
//! page.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Label, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};

use crate::{
    dates::format_date,
    trend::{DailyPoint, DistributionEntry, MonthlyTrendRow},
};

/// The category distribution as a pie chart.
///
/// Segments keep their legend entry regardless of size; inline labels are
/// suppressed for segments flagged `show_label: false`.
pub fn distribution_chart(entries: &[DistributionEntry]) -> Chart {
    let data: Vec<(f64, String)> = entries
        .iter()
        .map(|entry| (entry.value, entry.name.clone()))
        .collect();

    Chart::new()
        .title(Title::new().text("Spending by category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("right").top("middle"))
        .series(
            Pie::new()
                .name("Spending")
                .radius("60%")
                .label(Label::new().formatter(JsFunction::new_with_args(
                    "params",
                    "return params.percent >= 5
                        ? params.name + ' (' + params.percent.toFixed(0) + '%)'
                        : '';",
                )))
                .data(data),
        )
}

/// Daily spending as a line chart over the days that actually have
/// transactions.
pub fn daily_trend_chart(points: &[DailyPoint]) -> Chart {
    let labels: Vec<String> = points
        .iter()
        .map(|point| format_date(point.date, "dd/MM/yyyy"))
        .collect();
    let values: Vec<f64> = points.iter().map(|point| point.amount).collect();

    Chart::new()
        .title(Title::new().text("Daily spend"))
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
        .series(Line::new().name("Spent").data(values))
}

/// Per-description amounts as grouped bars, one bar series per comparison
/// period.
pub fn monthly_trend_chart(rows: &[MonthlyTrendRow], period_labels: &[String]) -> Chart {
    let descriptions: Vec<String> = rows.iter().map(|row| row.description.clone()).collect();

    let mut chart = Chart::new()
        .title(Title::new().text("Trends by description").left(20).top("1%"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(descriptions))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    for (index, label) in period_labels.iter().enumerate() {
        let values: Vec<f64> = rows.iter().map(|row| row.amounts[index]).collect();
        chart = chart.series(
            bar::Bar::new()
                .name(label)
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(values),
        );
    }

    chart
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
    use time::macros::date;

    use crate::trend::{DailyPoint, DistributionEntry, MonthlyTrendRow};

    use super::{daily_trend_chart, distribution_chart, monthly_trend_chart};

    #[test]
    fn distribution_chart_contains_every_entry() {
        let entries = vec![
            DistributionEntry {
                name: "Travel".to_owned(),
                value: 500.0,
                percentage: 62.5,
                show_label: true,
            },
            DistributionEntry {
                name: "Health".to_owned(),
                value: 300.0,
                percentage: 37.5,
                show_label: true,
            },
        ];

        let options = distribution_chart(&entries).to_string();

        assert!(options.contains("Travel"));
        assert!(options.contains("Health"));
    }

    #[test]
    fn daily_trend_chart_labels_days() {
        let points = vec![DailyPoint {
            date: date!(2025 - 03 - 02),
            amount: 50.0,
        }];

        let options = daily_trend_chart(&points).to_string();

        assert!(options.contains("02/03/2025"));
    }

    #[test]
    fn monthly_trend_chart_has_one_series_per_period() {
        let rows = vec![MonthlyTrendRow {
            category: "Housing".to_owned(),
            description: "Rent".to_owned(),
            total: 3000.0,
            amounts: [0.0, 1500.0, 1500.0, 0.0, 0.0],
        }];
        let labels: Vec<String> = ["Today", "Mar-25", "Feb-25", "Jan-25", "Dec-24"]
            .iter()
            .map(|label| (*label).to_owned())
            .collect();

        let options = monthly_trend_chart(&rows, &labels).to_string();

        for label in &labels {
            assert!(options.contains(label.as_str()), "missing series {label}");
        }
        assert!(options.contains("Rent"));
    }
}
