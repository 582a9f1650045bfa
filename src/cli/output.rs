//! Console rendering of user listings.

use crate::store::User;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Serialize)]
struct UserRow<'a> {
    id: u64,
    username: &'a str,
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    roles: &'a [String],
}

const HEADERS: [&str; 6] = ["id", "username", "email", "first_name", "last_name", "roles"];

fn cells(user: &User) -> [String; 6] {
    [
        user.id.to_string(),
        user.username.clone(),
        user.email.clone(),
        user.first_name.clone(),
        user.last_name.clone(),
        user.roles.to_string(),
    ]
}

fn pad_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Render users as an aligned plain-text table
#[must_use]
pub fn render_user_table(users: &[User]) -> String {
    let header: Vec<String> = HEADERS.iter().map(ToString::to_string).collect();
    let rows: Vec<[String; 6]> = users.iter().map(cells).collect();

    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![pad_row(&header, &widths)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|row| pad_row(row, &widths)));
    lines.join("\n")
}

/// Render users in the requested format
pub fn render_users(users: &[User], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_user_table(users)),
        OutputFormat::Json => {
            let rows: Vec<UserRow<'_>> = users
                .iter()
                .map(|u| UserRow {
                    id: u.id.0,
                    username: &u.username,
                    email: &u.email,
                    first_name: &u.first_name,
                    last_name: &u.last_name,
                    roles: u.roles.names(),
                })
                .collect();
            serde_json::to_string_pretty(&rows)
        }
    }
}
