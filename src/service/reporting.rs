use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::model::record::AttendanceRecord;
use crate::model::session::from_unix;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const CSV_HEADER: [&str; 7] = [
    "Name",
    "Enrollment",
    "Program",
    "Semester",
    "Subject",
    "Time Slot",
    "Recorded At",
];

/// Export row; the serde names are the CSV header.
#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Enrollment")]
    enrollment: &'a str,
    #[serde(rename = "Program")]
    program: &'a str,
    #[serde(rename = "Semester")]
    semester: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "Time Slot")]
    time_slot: &'a str,
    #[serde(rename = "Recorded At")]
    recorded_at: &'a str,
}

impl<'a> From<&'a AttendanceRecord> for CsvRow<'a> {
    fn from(r: &'a AttendanceRecord) -> Self {
        CsvRow {
            name: &r.name,
            enrollment: &r.enrollment,
            program: &r.program,
            semester: &r.semester,
            subject: &r.subject,
            time_slot: &r.time_slot,
            recorded_at: &r.recorded_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    full_name: String,
    enrollment: String,
    program: String,
    semester: String,
    subject: String,
    time_slot: String,
    recorded_at: i64,
}

impl From<RecordRow> for AttendanceRecord {
    fn from(row: RecordRow) -> Self {
        AttendanceRecord {
            name: row.full_name,
            enrollment: row.enrollment,
            program: row.program,
            semester: row.semester,
            subject: row.subject,
            time_slot: row.time_slot,
            recorded_at: from_unix(row.recorded_at)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

/// Full attendance history, newest first.
pub async fn list_attendance(pool: &SqlitePool) -> Result<Vec<AttendanceRecord>, AppError> {
    let rows = sqlx::query_as::<_, RecordRow>(
        r#"
        SELECT st.full_name, st.enrollment, st.program, st.semester,
               se.subject, se.time_slot, ev.recorded_at
        FROM attendance_events ev
        JOIN students st ON st.id = ev.student_id
        JOIN sessions se ON se.id = ev.session_id
        ORDER BY ev.recorded_at DESC, ev.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(AttendanceRecord::from).collect())
}

pub async fn attendance_count(pool: &SqlitePool) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance_events")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// CSV with a header row, one line per record.
pub fn export_csv(records: &[AttendanceRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    // serialize() only emits the header alongside the first row
    if records.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for r in records {
        writer.serialize(CsvRow::from(r))?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}
