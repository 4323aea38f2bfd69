mod appointment;
mod client;
mod invitation;
mod refresh_token;
mod service;
mod stylist;
mod user;

pub use appointment::{APPOINTMENT_STATUSES, Appointment};
pub use client::Client;
pub use invitation::Invitation;
pub use refresh_token::RefreshToken;
pub use service::Service;
pub use stylist::Stylist;
pub use user::User;
