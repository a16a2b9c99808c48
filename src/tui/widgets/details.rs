//! Detail page for a single result

use crate::models::{DistinguishedName, ProbeResult};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("- {:<13}: ", label), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ])
}

fn optional_field(lines: &mut Vec<Line<'static>>, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        lines.push(field(label, value));
    }
}

fn subject_fields(lines: &mut Vec<Line<'static>>, subject: &DistinguishedName) {
    optional_field(lines, "Common Name", &subject.common_name);
    optional_field(lines, "Organization", &subject.organization);
    optional_field(lines, "Locality", &subject.locality);
    optional_field(lines, "State", &subject.state);
    optional_field(lines, "Country", &subject.country);
}

/// Lines of the detail page
pub fn detail_lines(result: &ProbeResult) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            result.domain.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("environment: {}", result.environment),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];

    let details = match &result.outcome {
        Ok(details) => details,
        Err(error) => {
            lines.push(field("Error", &error.to_string()));
            return lines;
        }
    };

    lines.push(heading("Issuer"));
    optional_field(&mut lines, "Organization", &details.issuer.organization);
    optional_field(&mut lines, "Common Name", &details.issuer.common_name);
    optional_field(&mut lines, "Country", &details.issuer.country);
    lines.push(Line::default());

    lines.push(heading("Validity"));
    lines.push(field("Not before", &details.not_before.format(DATE_FORMAT).to_string()));
    lines.push(field("Not after", &details.not_after.format(DATE_FORMAT).to_string()));
    lines.push(Line::default());

    lines.push(heading("Certificate Details"));
    subject_fields(&mut lines, &details.subject);
    lines.push(field("Serial", &details.serial_number.to_str_radix(16)));
    lines.push(Line::default());

    lines.push(heading("Alternate Names"));
    if details.subject_alt_names.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for name in &details.subject_alt_names {
        lines.push(Line::from(format!("  - {}", name)));
    }

    lines
}
