use ariadne::{Color, Label, Report, ReportKind, Source};
use unitcanon::CanonError;

const SOURCE_ID: &str = "<unit>";

/// Format a CanonError with fancy terminal output using Ariadne
pub fn format_error(error: &CanonError) -> String {
    match error {
        CanonError::Parse(details) | CanonError::Normalize(details) => {
            let mut output = Vec::new();

            let error_type = match error {
                CanonError::Parse(_) => "Parse error",
                _ => "Invalid expression",
            };

            // Zero-width spans (end of input) still need a visible marker
            let end = details.span.end.max(details.span.start + 1);
            let mut report = Report::build(ReportKind::Error, SOURCE_ID, details.span.start)
                .with_message(format!("{}: {}", error_type, details.message))
                .with_label(
                    Label::new((SOURCE_ID, details.span.start..end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (SOURCE_ID, Source::from(details.source_text.as_ref())),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        CanonError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        CanonError::Table(_) | CanonError::Empty(_) | CanonError::Engine(_) => error.to_string(),
    }
}
