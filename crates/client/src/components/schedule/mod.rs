//! Components for the schedule page.

pub mod message_notification;
pub mod registration_button;
pub mod schedule_card;
pub mod session_calendar;
pub mod status_indicator;

pub use message_notification::MessageNotification;
pub use registration_button::RegistrationButton;
pub use schedule_card::ScheduleCard;
pub use session_calendar::SessionCalendar;
pub use status_indicator::StatusIndicator;
