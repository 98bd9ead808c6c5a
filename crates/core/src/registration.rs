//! Student self-registration: request validation, visible id generation,
//! and the account + student write.

use chrono::{Datelike, Utc};
use rand::Rng;
use tracing::{info, warn};

use crate::{
    errors::{CampusError, CampusResult},
    models::{
        account::{NewAccount, RegisterRequest, RegisterResponse, Role},
        student::NewStudent,
    },
    repository::{AccountRepository, StudentDirectory},
    validation::{limit_all, limits, optional, require_all},
};

/// How many candidate visible ids to try before giving up.
pub const STUDENT_ID_ATTEMPTS: usize = 10;

/// Builds a visible student id: two-digit year, a zero-padded number in
/// `1..900`, and the two-digit year again, e.g. `2504225`.
pub fn generate_student_id<R: Rng + ?Sized>(year: i32, rng: &mut R) -> String {
    let prefix = year.rem_euclid(100);
    let number: u32 = rng.gen_range(1..900);
    format!("{prefix:02}{number:03}{prefix:02}")
}

pub fn validate_registration(request: &RegisterRequest) -> CampusResult<()> {
    require_all(&[
        ("userId", request.user_id.as_str()),
        ("password", request.password.as_str()),
        ("firstName", request.first_name.as_str()),
        ("lastName", request.last_name.as_str()),
        ("course", request.course.as_str()),
    ])?;
    limit_all(&[
        ("userId", request.user_id.as_str(), limits::USER_ID),
        ("firstName", request.first_name.as_str(), limits::PERSON_NAME),
        (
            "middleInitial",
            request.middle_initial.as_deref().unwrap_or_default(),
            limits::MIDDLE_INITIAL,
        ),
        ("lastName", request.last_name.as_str(), limits::PERSON_NAME),
        ("course", request.course.as_str(), limits::COURSE),
    ])?;

    if request.year_level <= 0 {
        return Err(CampusError::Validation(
            "Year level must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Registers a student account. `password` is the value to store, already
/// hashed by the caller.
pub async fn register_student(
    accounts: &dyn AccountRepository,
    students: &dyn StudentDirectory,
    request: &RegisterRequest,
    password: String,
) -> CampusResult<RegisterResponse> {
    validate_registration(request)?;
    let user_id = request.user_id.trim();

    if accounts.find_account_by_user_id(user_id).await?.is_some() {
        return Err(CampusError::Conflict("User ID is already taken".to_string()));
    }

    let student_id = unused_student_id(students).await?;

    let (account, student) = accounts
        .register_student(
            NewAccount {
                user_id: user_id.to_string(),
                password,
                role: Role::Student,
                display_name: None,
            },
            NewStudent {
                student_id,
                first_name: request.first_name.trim().to_string(),
                middle_initial: optional(request.middle_initial.as_deref()),
                last_name: request.last_name.trim().to_string(),
                year_level: request.year_level,
                course: request.course.trim().to_uppercase(),
            },
        )
        .await?;

    info!(user_id = %account.user_id, student_id = %student.student_id, "Student registered");

    Ok(RegisterResponse {
        acc_index: account.id,
        acc_user_id: account.user_id,
        acc_role: account.role,
        stud_student_id: student.student_id,
        stud_first_name: student.first_name,
        stud_middle_initial: student.middle_initial,
        stud_last_name: student.last_name,
        stud_year_level: student.year_level,
        stud_course: student.course,
    })
}

async fn unused_student_id(students: &dyn StudentDirectory) -> CampusResult<String> {
    let year = Utc::now().year();
    for _ in 0..STUDENT_ID_ATTEMPTS {
        let candidate = generate_student_id(year, &mut rand::thread_rng());
        if students.find_student_by_visible_id(&candidate).await?.is_none() {
            return Ok(candidate);
        }
        warn!(candidate = %candidate, "Generated student id already in use, retrying");
    }
    Err(CampusError::Conflict(
        "Could not allocate a student id, try again".to_string(),
    ))
}
