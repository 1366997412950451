use super::{member_status::MemberStatus, role::Role};

pub fn default_role() -> Role {
    Role::Technician
}

pub fn default_status() -> MemberStatus {
    MemberStatus::Active
}
