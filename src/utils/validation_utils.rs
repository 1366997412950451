use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, QueryPayloadError},
    web,
};
use serde_json::json;
use std::{borrow::Cow, collections::HashMap, sync::Arc};
use validator::{ValidationError, ValidationErrors};

use crate::{
    models::{
        harvest_model::{HarvestRecord, HarvestRow},
        member_model::{Member, MemberRow},
        user_profile_model::{UserProfile, UserProfileRow},
    },
    types::responses::api_response::{ApiResponse, ErrorDetails},
    utils::locale_utils::{MessageCatalog, Messages, get_lang},
    validations::{
        email::validate_email,
        fields::{parse_area, parse_date, parse_enum, parse_timestamp, parse_uuid, required},
        name::validate_name,
    },
};

pub fn handle_validation_error(errors: ValidationErrors, msg: &str) -> HttpResponse {
    let error_details = ErrorDetails::new("validation_failed", Some(json!(&errors)));
    HttpResponse::BadRequest().json(ApiResponse::<()>::error(msg, error_details))
}

/// Answers query strings that cannot be deserialized at all with the same
/// envelope as filters that fail validation.
pub fn handle_query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let fallback = Messages::default();
    let messages = req
        .app_data::<web::Data<Arc<MessageCatalog>>>()
        .map(|catalog| catalog.get(get_lang(req)))
        .unwrap_or(&fallback);

    let mut errors = ValidationErrors::new();
    errors.add(
        "query",
        add_error(
            "query.malformed",
            messages.get_validation_message("query.malformed", "Query string could not be read"),
            &err.to_string(),
        ),
    );
    let err_msg = messages.get_list_message("filter.invalid", "Invalid list filters");
    let response = handle_validation_error(errors, &err_msg);
    InternalError::from_response(err, response).into()
}

pub fn add_error(code: &'static str, message: String, field_value: &str) -> ValidationError {
    ValidationError {
        code: code.into(),
        message: Some(Cow::Owned(message)),
        params: {
            let mut params = HashMap::new();
            params.insert("value".into(), json!(field_value));
            params
        },
    }
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.add(field, error);
            None
        }
    }
}

fn checked_name(value: Option<&str>, messages: &Messages) -> Result<String, ValidationError> {
    let name = required(value, messages)?;
    validate_name(name, messages)?;
    Ok(name.to_string())
}

fn checked_email(value: Option<&str>, messages: &Messages) -> Result<String, ValidationError> {
    let email = required(value, messages)?;
    validate_email(email, messages)?;
    Ok(email.to_string())
}

fn validate_profile_row(
    row: &UserProfileRow,
    errors: &mut ValidationErrors,
    messages: &Messages,
) -> Option<UserProfile> {
    let id = collect(errors, "user.id", parse_uuid(row.id.as_deref(), messages));
    let email = collect(errors, "user.email", checked_email(row.email.as_deref(), messages));
    let full_name = collect(
        errors,
        "user.full_name",
        checked_name(row.full_name.as_deref(), messages),
    );
    let created_at = collect(
        errors,
        "user.created_at",
        parse_timestamp(row.created_at.as_deref(), messages),
    );

    Some(UserProfile {
        id: id?,
        email: email?,
        full_name: full_name?,
        created_at: created_at?,
    })
}

/// Turns an untrusted member row into a [`Member`], reporting every failing
/// field at once.
pub fn validate_member_row(row: &MemberRow, messages: &Messages) -> Result<Member, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let id = collect(&mut errors, "id", parse_uuid(row.id.as_deref(), messages));
    let created_at = collect(
        &mut errors,
        "created_at",
        parse_timestamp(row.created_at.as_deref(), messages),
    );
    let user_id = collect(&mut errors, "user_id", parse_uuid(row.user_id.as_deref(), messages));
    let role = collect(&mut errors, "role", parse_enum(row.role.as_deref(), messages));
    let status = collect(&mut errors, "status", parse_enum(row.status.as_deref(), messages));
    let user = match &row.user {
        Some(profile) => validate_profile_row(profile, &mut errors, messages),
        None => {
            errors.add(
                "user",
                add_error(
                    "user.missing",
                    messages.get_validation_message("user.missing", "Member has no user profile"),
                    "",
                ),
            );
            None
        }
    };

    match (id, created_at, user_id, role, status, user) {
        (Some(id), Some(created_at), Some(user_id), Some(role), Some(status), Some(user)) => {
            Ok(Member {
                id,
                created_at,
                user_id,
                role,
                status,
                user,
            })
        }
        _ => Err(errors),
    }
}

pub fn validate_harvest_row(
    row: &HarvestRow,
    messages: &Messages,
) -> Result<HarvestRecord, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let id = collect(&mut errors, "id", parse_uuid(row.id.as_deref(), messages));
    let farmer_name = collect(
        &mut errors,
        "farmer_name",
        checked_name(row.farmer_name.as_deref(), messages),
    );
    let crop = collect(&mut errors, "crop", parse_enum(row.crop.as_deref(), messages));
    let area_hectares = collect(
        &mut errors,
        "area_hectares",
        parse_area(row.area_hectares, messages),
    );
    let harvested_on = collect(
        &mut errors,
        "harvested_on",
        parse_date(row.harvested_on.as_deref(), messages),
    );
    let status = collect(&mut errors, "status", parse_enum(row.status.as_deref(), messages));
    let created_at = collect(
        &mut errors,
        "created_at",
        parse_timestamp(row.created_at.as_deref(), messages),
    );

    match (id, farmer_name, crop, area_hectares, harvested_on, status, created_at) {
        (
            Some(id),
            Some(farmer_name),
            Some(crop),
            Some(area_hectares),
            Some(harvested_on),
            Some(status),
            Some(created_at),
        ) => Ok(HarvestRecord {
            id,
            farmer_name,
            crop,
            area_hectares,
            harvested_on,
            status,
            created_at,
        }),
        _ => Err(errors),
    }
}
