use crate::{
    data::roster::Roster,
    error::{CsvFlushSnafu, CsvWriteSnafu, RosterResult},
    state::RosterState,
};
use axum::{extract::State, http::header, response::IntoResponse};
use serde::Serialize;
use snafu::ResultExt;

#[derive(Serialize)]
struct CsvStudent<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    #[serde(rename = "studentId")]
    student_id: &'a str,
    name: &'a str,
    picture: Option<&'a str>,
}

fn students_csv(roster: &Roster) -> RosterResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for student in roster.students() {
        writer
            .serialize(CsvStudent {
                id: student.key.as_str(),
                student_id: &student.student_id,
                name: &student.name,
                picture: student.pic.as_ref().and_then(|pic| pic.file_name()),
            })
            .context(CsvWriteSnafu)?;
    }

    writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)
        .context(CsvFlushSnafu)
}

///pictures stay in memory, only their file names make it into the CSV
pub async fn get_students_csv(State(state): State<RosterState>) -> RosterResult<impl IntoResponse> {
    let bytes = students_csv(&*state.roster().await)?;
    debug!(len = bytes.len(), "Exported students CSV");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"students.csv\"",
            ),
        ],
        bytes,
    ))
}
