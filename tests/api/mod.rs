mod access_tests;
mod auth_tests;
mod company_tests;
mod health_tests;
mod invite_tests;
mod student_tests;
