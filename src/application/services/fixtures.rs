//! Input builders shared by service tests.

use super::company_service::{NewAddress, NewCompany, NewRepresentative};
use super::student_service::NewStudent;
use super::user_service::NewAccount;
use crate::domain::StudentStatus;

pub(crate) fn account(email: &str) -> NewAccount {
    NewAccount {
        email: email.into(),
        password: "password".into(),
        first_name: "Ann".into(),
        last_name: "Bos".into(),
    }
}

pub(crate) fn new_representative(email: &str) -> NewRepresentative {
    NewRepresentative {
        account: account(email),
        job_title: "CEO".into(),
    }
}

pub(crate) fn new_company(name: &str, email: &str) -> NewCompany {
    NewCompany {
        name: name.into(),
        information: "Software house".into(),
        description: "We build things".into(),
        locations: vec![NewAddress {
            street: "Main Street".into(),
            zipcode: "1234 AB".into(),
            city: "Utrecht".into(),
            number: "1".into(),
        }],
        representatives: vec![new_representative(email)],
    }
}

pub(crate) fn new_student(email: &str) -> NewStudent {
    NewStudent {
        account: account(email),
        university: "Hogeschool Utrecht".into(),
        skills: vec!["rust".into()],
        experiences: vec![],
        status: StudentStatus::Available,
    }
}
