//!
//! The gas report table.
//!

use colored::ColoredString;
use colored::Colorize;
use term_table::row::Row;
use term_table::table_cell::Alignment;
use term_table::table_cell::TableCell;

use super::Report;

/// The number of the table columns.
const COLUMNS: usize = 7;

///
/// Renders the report table.
///
pub fn render(report: &Report, colors: bool) -> String {
    let paint = |text: String, style: fn(&str) -> ColoredString| -> String {
        if colors {
            style(text.as_str()).to_string()
        } else {
            text
        }
    };
    let number = |text: String| {
        TableCell::builder(text)
            .col_span(1)
            .alignment(Alignment::Right)
            .build()
    };
    let currency = report.settings.currency.as_str();

    let mut table = term_table::Table::new();
    table.style = term_table::TableStyle::simple();
    table.separate_rows = false;

    table.add_row(Row::new(vec![
        TableCell::builder(paint("Gas".to_owned(), |text| text.bright_green().bold()))
            .col_span(COLUMNS - 2)
            .alignment(Alignment::Center)
            .build(),
        TableCell::builder(paint(
            format!("Block limit: {} gas", report.snapshot.block_gas_limit),
            |text| text.bright_black(),
        ))
        .col_span(2)
        .alignment(Alignment::Center)
        .build(),
    ]));

    if let Some(solc) = report.solc.as_ref() {
        table.add_row(Row::new(vec![
            TableCell::builder(format!("Solc version: {}", solc.version))
                .col_span(3)
                .build(),
            TableCell::builder(format!("Optimizer enabled: {}", solc.optimizer))
                .col_span(2)
                .build(),
            TableCell::builder(format!("Runs: {}", solc.runs))
                .col_span(2)
                .build(),
        ]));
    }

    let title = paint("Methods".to_owned(), |text| text.bright_green().bold());
    match report.settings.prices {
        Some((eth_price, gas_price)) => table.add_row(Row::new(vec![
            TableCell::builder(title).col_span(3).build(),
            TableCell::builder(paint(format!("{gas_price} gwei/gas"), |text| {
                text.bright_black()
            }))
            .col_span(2)
            .alignment(Alignment::Right)
            .build(),
            TableCell::builder(paint(format!("{eth_price:.2} {currency}/eth"), |text| {
                text.red()
            }))
            .col_span(2)
            .alignment(Alignment::Right)
            .build(),
        ])),
        None => table.add_row(Row::new(vec![TableCell::builder(title)
            .col_span(COLUMNS)
            .build()])),
    };

    table.add_row(Row::new(
        [
            "Contract".to_owned(),
            "Method".to_owned(),
            "Min".to_owned(),
            "Max".to_owned(),
            "Avg".to_owned(),
            "# calls".to_owned(),
            format!("{currency} (avg)"),
        ]
        .into_iter()
        .map(|text| TableCell::new(paint(text, |text| text.bold())))
        .collect::<Vec<_>>(),
    ));

    for row in report.method_rows() {
        let (min, max, average) = match row.statistics {
            Some(statistics) if statistics.is_uniform() => {
                ("-".to_owned(), "-".to_owned(), statistics.average.to_string())
            }
            Some(statistics) => (
                statistics.min.to_string(),
                statistics.max.to_string(),
                statistics.average.to_string(),
            ),
            None => ("-".to_owned(), "-".to_owned(), "-".to_owned()),
        };
        let cost = row
            .statistics
            .and_then(|statistics| report.cost(statistics.average))
            .unwrap_or_else(|| "-".to_owned());

        table.add_row(Row::new(vec![
            TableCell::new(paint(row.contract, |text| text.bright_black())),
            TableCell::new(row.method),
            number(paint(min, |text| text.cyan())),
            number(paint(max, |text| text.red())),
            number(average),
            number(paint(row.calls.to_string(), |text| text.bright_black())),
            number(paint(cost, |text| text.green())),
        ]));
    }

    let deployments = report.deployment_rows();
    if !deployments.is_empty() {
        table.add_row(Row::new(vec![
            TableCell::builder(paint("Deployments".to_owned(), |text| {
                text.bright_green().bold()
            }))
            .col_span(5)
            .build(),
            TableCell::new(paint("% of limit".to_owned(), |text| text.bold())),
            TableCell::new(""),
        ]));
        for row in deployments {
            let (min, max) = if row.statistics.is_uniform() {
                ("-".to_owned(), "-".to_owned())
            } else {
                (row.statistics.min.to_string(), row.statistics.max.to_string())
            };
            let cost = report
                .cost(row.statistics.average)
                .unwrap_or_else(|| "-".to_owned());

            table.add_row(Row::new(vec![
                TableCell::builder(row.name).col_span(2).build(),
                number(paint(min, |text| text.cyan())),
                number(paint(max, |text| text.red())),
                number(row.statistics.average.to_string()),
                number(paint(format!("{} %", row.percent_of_limit), |text| {
                    text.bright_black()
                })),
                number(paint(cost, |text| text.green())),
            ]));
        }
    }

    if report.unresolved_calls > 0 {
        table.add_row(Row::new(vec![TableCell::builder(paint(
            format!(
                "Unresolved calls: {} (not attributed to any method)",
                report.unresolved_calls
            ),
            |text| text.yellow(),
        ))
        .col_span(COLUMNS)
        .build()]));
    }

    table.render()
}
