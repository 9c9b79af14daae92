//! External delivery channels for platform notifications.
//!
//! Currently only email: collaboration invites notify the invitee out of
//! band when SMTP is configured.

pub mod email;
