//! View components for the application.

pub mod change_password;
pub mod edit_profile;
pub mod events;
pub mod home;
pub mod layout;
pub mod login;
pub mod password_reset;
pub mod profile;
pub mod register;
pub mod schedule;
pub mod shop;
pub mod verify;

pub use change_password::ChangePassword;
pub use edit_profile::EditProfile;
pub use events::Events;
pub use home::Home;
pub use layout::SiteLayout;
pub use login::Login;
pub use password_reset::{ResetPassword, SendVerificationCode, VerifyResetCode};
pub use profile::Profile;
pub use register::Register;
pub use schedule::SchedulePage;
pub use shop::Shop;
pub use verify::Verify;
