//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use driver_lib::{Column, DriverOutput, Table, Variable};
use tabled::{builder::Builder, settings::Style};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Render a driver result for the terminal
pub fn print_driver_output(output: &DriverOutput) {
    match output {
        DriverOutput::Table(table) => print_result_table(table),
        DriverOutput::Variables(variables) => print_variables(variables),
    }
}

fn column_heading(column: &Column) -> String {
    match &column.unit {
        Some(unit) => format!("{} ({})", column.label, unit),
        None => column.label.clone(),
    }
}

fn print_result_table(table: &Table) {
    println!("{}", table.title.bold());

    if table.is_empty() {
        println!("{}", "No records collected".yellow());
        return;
    }

    let mut builder = Builder::default();
    let mut heading = vec!["ID".to_string()];
    heading.extend(table.columns.iter().map(column_heading));
    builder.push_record(heading);

    for row in table.rows() {
        let mut record = vec![row.id.clone()];
        record.extend(row.values.iter().cloned());
        builder.push_record(record);
    }

    println!("{}", builder.build().with(Style::rounded()));
}

fn print_variables(variables: &[Variable]) {
    if variables.is_empty() {
        println!("{}", "No variables collected".yellow());
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Label", "Value", "Unit"]);
    for variable in variables {
        builder.push_record([
            variable.uid.as_str(),
            variable.label.as_str(),
            variable.value.as_str(),
            variable.unit.as_deref().unwrap_or(""),
        ]);
    }

    println!("{}", builder.build().with(Style::rounded()));
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
