use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    models::user_profile_model::{UserProfile, UserProfileRow},
    types::{
        filters::selection::Selection,
        models::member::{
            defaults::{default_role, default_status},
            member_status::MemberStatus,
            role::Role,
        },
    },
    utils::{locale_utils::Messages, validation_utils::validate_member_row},
    validations::name::validate_name,
    view_models::{
        list_record::{ListRecord, SearchField},
        list_view_model::ListViewModel,
    },
};

/// Binds a user account to a role in the agriculture office.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Member {
    pub id: Uuid,

    pub created_at: DateTime<Utc>,

    pub user_id: Uuid,

    #[serde(default = "default_role")]
    pub role: Role,

    #[serde(default = "default_status")]
    pub status: MemberStatus,

    pub user: UserProfile,
}

/// A member row exactly as the remote query layer returns it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MemberRow {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub user: Option<UserProfileRow>,
}

impl Member {
    /// Validates and normalises a row from the query layer.
    pub fn try_from_row(row: &MemberRow, messages: &Messages) -> Result<Self, ValidationErrors> {
        validate_member_row(row, messages)
    }

    pub fn assign_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn promote(&mut self) {
        self.assign_role(Role::Admin);
    }

    /// Members are never removed; resigning only changes their status.
    pub fn resign(&mut self) {
        self.status = MemberStatus::Resigned;
    }

    pub fn rename(&mut self, full_name: &str, messages: &Messages) -> Result<(), ValidationError> {
        let full_name = full_name.trim();
        validate_name(full_name, messages)?;
        self.user.full_name = full_name.to_string();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

fn full_name(member: &Member) -> Cow<'_, str> {
    Cow::Borrowed(&member.user.full_name)
}

fn email(member: &Member) -> Cow<'_, str> {
    Cow::Borrowed(&member.user.email)
}

fn role(member: &Member) -> Cow<'_, str> {
    Cow::Borrowed(member.role.as_ref())
}

fn status(member: &Member) -> Cow<'_, str> {
    Cow::Borrowed(member.status.as_ref())
}

pub const FULL_NAME_FIELD: SearchField<Member> = SearchField::new("full_name", full_name);
pub const EMAIL_FIELD: SearchField<Member> = SearchField::new("email", email);
pub const ROLE_FIELD: SearchField<Member> = SearchField::new("role", role);
pub const STATUS_FIELD: SearchField<Member> = SearchField::new("status", status);

impl ListRecord for Member {
    type Category = Role;
    type Status = MemberStatus;

    fn category(&self) -> &Role {
        &self.role
    }

    fn status(&self) -> &MemberStatus {
        &self.status
    }

    fn default_search_fields() -> Vec<SearchField<Self>> {
        vec![FULL_NAME_FIELD, ROLE_FIELD, STATUS_FIELD]
    }
}

impl ListViewModel<Member> {
    pub fn set_role_filter(&mut self, role: Selection<Role>) {
        self.set_category_filter(role);
    }

    pub fn role_filter(&self) -> &Selection<Role> {
        self.category_filter()
    }
}
