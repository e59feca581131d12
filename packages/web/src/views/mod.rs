mod home;
pub use home::Home;

mod admin;
pub use admin::{AdminDashboard, AdminSettings, AdminShell};

mod applicant;
pub use applicant::{ApplicantDashboard, ApplicantShell};
