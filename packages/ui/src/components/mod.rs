//! Small styled building blocks shared by the views.

mod badge;
pub use badge::{Badge, BadgeVariant};

mod button;
pub use button::{Button, ButtonSize, ButtonVariant};

mod form;
pub use form::{Input, Label};

mod switch;
pub use switch::Switch;

mod tabs;
pub use tabs::TabList;

mod toast;
pub use toast::{use_toast, NoticeToasts, ToastOptions, ToastProvider, Toasts};
