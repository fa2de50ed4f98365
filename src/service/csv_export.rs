//! CSV rendering for the attendance export.
//!
//! Output is RFC 4180: CRLF line endings, and fields containing a comma,
//! quote, CR or LF are quoted with embedded quotes doubled.

use crate::domain::AttendanceRecord;

/// Header row of the export.
pub const HEADER: [&str; 4] = ["Name", "Type", "Check-in Time", "Server Received Time"];

/// File name offered in the `Content-Disposition` header.
pub const FILE_NAME: &str = "attendance.csv";

/// Renders the header plus one row per record, in the given order.
#[must_use]
pub fn render(records: &[AttendanceRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER);
    for record in records {
        let received_at = record.server_received_at.to_rfc3339();
        push_row(
            &mut out,
            [
                record.name.as_str(),
                record.attendee_type.as_str(),
                record.client_timestamp.as_str(),
                received_at.as_str(),
            ],
        );
    }
    out
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
