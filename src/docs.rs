use crate::api::attendance::SubmitResponse;
use crate::api::report::AttendanceReport;
use crate::api::session::StartSessionResponse;
use crate::model::record::AttendanceRecord;
use crate::model::role::Role;
use crate::models::{LoginReq, LoginResponse};
use crate::service::recorder::{Outcome, Submission};
use crate::service::session::{NewSession, SessionDisplay};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "0.1.0",
        description = r#"
## Session-based attendance

Faculty open a time-boxed attendance window and display its code (or the
scannable payload, refreshed every few seconds). Students submit their
details against the code. Admins review and export the records.

### Roles
- **Student**: no token, submits attendance
- **Faculty**: `POST /auth/login` with `role=faculty`, starts sessions
- **Admin**: `POST /auth/login` with `role=admin` and the shared password, reads reports

Protected endpoints take `Authorization: Bearer <token>`.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::attendance::submit_attendance,

        crate::api::session::start_session,
        crate::api::session::session_display,

        crate::api::report::list_attendance,
        crate::api::report::export_attendance
    ),
    components(
        schemas(
            LoginReq,
            LoginResponse,
            Role,
            Submission,
            SubmitResponse,
            Outcome,
            NewSession,
            StartSessionResponse,
            SessionDisplay,
            AttendanceRecord,
            AttendanceReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Role tokens"),
        (name = "Attendance", description = "Student submissions"),
        (name = "Session", description = "Attendance windows"),
        (name = "Report", description = "Admin review and export"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
