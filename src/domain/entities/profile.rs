use std::str::FromStr;

use crate::application::app_error::AppError;
use crate::domain::entities::{id::Id, user::User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Marketing,
    Sales,
    Engineering,
    Hr,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Marketing,
        Department::Sales,
        Department::Engineering,
        Department::Hr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Marketing => "MARKETING",
            Department::Sales => "SALES",
            Department::Engineering => "ENGINEERING",
            Department::Hr => "HR",
        }
    }
}

impl FromStr for Department {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MARKETING" => Ok(Department::Marketing),
            "SALES" => Ok(Department::Sales),
            "ENGINEERING" => Ok(Department::Engineering),
            "HR" => Ok(Department::Hr),
            _ => Err(AppError::InvalidDepartment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: Id<User>,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<Department>,
    pub profile_picture: Option<String>,
}

impl Profile {
    pub fn new(user_id: Id<User>, first_name: String, last_name: String) -> Self {
        Self {
            user_id,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            department: None,
            profile_picture: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Department;
    use crate::application::app_error::AppError;

    #[rstest]
    #[case("MARKETING", Department::Marketing)]
    #[case("sales", Department::Sales)]
    #[case(" Engineering ", Department::Engineering)]
    #[case("hr", Department::Hr)]
    fn test_department_parse(#[case] raw: &str, #[case] expected: Department) {
        assert_eq!(raw.parse::<Department>().unwrap(), expected);
    }

    #[test]
    fn test_department_unknown() {
        assert!(matches!("LEGAL".parse::<Department>(), Err(AppError::InvalidDepartment(_))));
    }

    #[test]
    fn test_department_label_round_trip() {
        for department in Department::ALL {
            assert_eq!(department.as_str().parse::<Department>().unwrap(), department);
        }
    }
}
