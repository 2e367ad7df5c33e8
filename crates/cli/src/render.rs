//! Table output.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

/// Write `rows` under `headers` as a rounded table, right-aligning the
/// columns listed in `numeric`.
pub(crate) fn table<const N: usize>(
    out: &mut impl io::Write,
    headers: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
    numeric: &[usize],
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(headers);

    let mut empty = true;

    for row in rows {
        builder.push_record(row);
        empty = false;
    }

    if empty {
        return writeln!(out, "nothing to show");
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    for column in numeric {
        table.modify(Columns::new(*column..=*column), Alignment::right());
    }

    writeln!(out, "{table}")
}

/// Write a `label: value` line.
pub(crate) fn line(
    out: &mut impl io::Write,
    label: &str,
    value: impl std::fmt::Display,
) -> io::Result<()> {
    writeln!(out, "{label}: {value}")
}
