use crate::{data::draft::MissingFields, maud_conveniences::alert};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::{num::ParseIntError, str::ParseBoolError};

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Please fill in all fields and upload a picture."))]
    MissingRequiredField { missing: MissingFields },
    #[snafu(display("Student with the same ID already exists."))]
    DuplicateIdentifier { student_id: String },
    #[snafu(display("Error with multipart form input"))]
    Multipart {
        source: axum::extract::multipart::MultipartError,
    },
    #[snafu(display("Form was sent with an unreadable round"))]
    ParseFormRound { source: ParseIntError },
    #[snafu(display("Error writing CSV rows"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error flushing CSV output"))]
    CsvFlush { source: std::io::Error },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseEnvNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as `true` or `false`", name))]
    ParseEnvFlag {
        source: ParseBoolError,
        name: &'static str,
    },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
}

impl RosterError {
    ///errors the person filling in the form can fix themselves
    pub const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. } | Self::DuplicateIdentifier { .. }
        )
    }

    fn details(&self) -> Vec<&'static str> {
        match self {
            Self::MissingRequiredField { missing } => missing.as_nice_list().collect(),
            _ => vec![],
        }
    }
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error

        //user mistakes stay 200; error statuses rely on the page shell's htmx `responseHandling`
        let status_code = match &self {
            Self::MissingRequiredField { .. } | Self::DuplicateIdentifier { .. } => StatusCode::OK,
            Self::Multipart { source } => source.status(),
            Self::ParseFormRound { .. } => StatusCode::BAD_REQUEST,
            Self::CsvWrite { .. } | Self::CsvFlush { .. } => ISE,
            Self::BadEnvVar { .. } => ISE,
            Self::ParseEnvNumber { .. } | Self::ParseEnvFlag { .. } => ISE,
            Self::BindListener { .. } | Self::Serve { .. } => ISE,
        };

        if self.is_user_input() {
            info!(%self, "Rejected form submission");
        } else {
            error!(?self, "Error!");
        }

        (
            status_code,
            [("HX-Retarget", "#alerts"), ("HX-Reswap", "innerHTML")],
            alert(self.to_string(), self.details()),
        )
            .into_response()
    }
}
