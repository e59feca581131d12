mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod dashboard_layout;
pub use dashboard_layout::DashboardLayout;

mod user_access_manager;
pub use user_access_manager::UserAccessManager;

mod applicant_profile;
pub use applicant_profile::ApplicantProfileModal;
